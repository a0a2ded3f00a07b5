use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Database model for stored documents. Rows with `user_id = NULL` form the
/// shared knowledge base; owned rows are a user's private notes.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub user_id: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Document {
    pub fn is_kb(&self) -> bool {
        self.user_id.is_none()
    }
}

/// Model for creating a new document
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::documents)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Client input for creating a user document
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    pub title: String,
    pub content: String,
}

/// Which document pool a search runs against
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchSource {
    #[default]
    Kb,
    User,
    All,
}

impl SearchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSource::Kb => "kb",
            SearchSource::User => "user",
            SearchSource::All => "all",
        }
    }

    /// Sources that read private documents require an authenticated caller.
    pub fn requires_identity(&self) -> bool {
        matches!(self, SearchSource::User | SearchSource::All)
    }
}

/// Search request body
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub source: SearchSource,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub min_similarity: Option<f64>,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub build_context: bool,
}

/// One scored search hit
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub doc_id: String,
    pub title: String,
    pub snippet: String,
    pub score: f64,
    pub source: String,
}

/// Search response envelope
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub query: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}
