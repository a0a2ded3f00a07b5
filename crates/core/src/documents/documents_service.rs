use crate::constants::{CONTEXT_SNIPPET_LEN, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::documents::documents_model::{
    Document, DocumentInput, NewDocument, SearchHit, SearchQuery, SearchResponse,
};
use crate::documents::documents_traits::{DocumentRepositoryTrait, DocumentServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

pub struct DocumentService {
    document_repo: Arc<dyn DocumentRepositoryTrait>,
}

impl DocumentService {
    pub fn new(document_repo: Arc<dyn DocumentRepositoryTrait>) -> Self {
        DocumentService { document_repo }
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Overlap coefficient of the query tokens against the document tokens,
/// in [0, 1]. A document containing every query word scores 1.
fn similarity(query_tokens: &HashSet<String>, document: &Document) -> f64 {
    if query_tokens.is_empty() {
        return 0.0;
    }
    let doc_tokens = tokenize(&format!("{} {}", document.title, document.content));
    let overlap = query_tokens.intersection(&doc_tokens).count();
    overlap as f64 / query_tokens.len() as f64
}

fn snippet(content: &str) -> String {
    if content.chars().count() <= CONTEXT_SNIPPET_LEN {
        content.to_string()
    } else {
        let cut: String = content.chars().take(CONTEXT_SNIPPET_LEN).collect();
        format!("{}…", cut.trim_end())
    }
}

#[async_trait]
impl DocumentServiceTrait for DocumentService {
    fn search(&self, user_id: Option<&str>, query: SearchQuery) -> Result<SearchResponse> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(Error::validation("query must not be empty"));
        }
        if query.source.requires_identity() && user_id.is_none() {
            return Err(Error::Unauthorized(format!(
                "search source '{}'",
                query.source.as_str()
            )));
        }

        let limit = query
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .min(MAX_SEARCH_LIMIT);
        let min_similarity = query.min_similarity.unwrap_or(0.0);

        let documents = self.document_repo.get_documents(query.source, user_id)?;
        debug!(
            "Searching {} documents in source '{}'",
            documents.len(),
            query.source.as_str()
        );

        let query_tokens = tokenize(text);
        let mut hits: Vec<SearchHit> = documents
            .iter()
            .filter(|doc| match &query.doc_id {
                Some(id) => &doc.id == id,
                None => true,
            })
            .filter_map(|doc| {
                let score = similarity(&query_tokens, doc);
                if score < min_similarity || score == 0.0 {
                    return None;
                }
                Some(SearchHit {
                    doc_id: doc.id.clone(),
                    title: doc.title.clone(),
                    snippet: snippet(&doc.content),
                    score,
                    source: if doc.is_kb() { "kb" } else { "user" }.to_string(),
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.title.cmp(&b.title))
        });
        hits.truncate(limit);

        let context = if query.build_context && !hits.is_empty() {
            Some(
                hits.iter()
                    .map(|h| format!("[{}] {}\n{}", h.source, h.title, h.snippet))
                    .collect::<Vec<_>>()
                    .join("\n\n---\n\n"),
            )
        } else {
            None
        };

        Ok(SearchResponse {
            results: hits,
            query: text.to_string(),
            source: query.source.as_str().to_string(),
            context,
        })
    }

    fn get_user_documents(&self, user_id: &str) -> Result<Vec<Document>> {
        self.document_repo.get_user_documents(user_id)
    }

    async fn create_document(&self, user_id: &str, input: DocumentInput) -> Result<Document> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::validation("document title must not be empty"));
        }

        let now = Utc::now().to_rfc3339();
        let new_document = NewDocument {
            id: None,
            user_id: Some(user_id.to_string()),
            title,
            content: input.content,
            created_at: now.clone(),
            updated_at: now,
        };

        self.document_repo.create_document(new_document).await
    }

    async fn delete_document(&self, user_id: &str, id: &str) -> Result<usize> {
        self.document_repo.delete_document(user_id, id).await
    }
}
