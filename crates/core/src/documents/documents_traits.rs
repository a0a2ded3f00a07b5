use crate::documents::documents_model::{
    Document, DocumentInput, NewDocument, SearchQuery, SearchResponse, SearchSource,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for document repository operations
#[async_trait]
pub trait DocumentRepositoryTrait: Send + Sync {
    /// Documents visible for the given source: kb rows, the user's rows, or both.
    /// `user_id` is ignored for the kb source.
    fn get_documents(&self, source: SearchSource, user_id: Option<&str>) -> Result<Vec<Document>>;

    /// List a user's own documents
    fn get_user_documents(&self, user_id: &str) -> Result<Vec<Document>>;

    /// Create a new document
    async fn create_document(&self, new_document: NewDocument) -> Result<Document>;

    /// Delete a document owned by the user (kb rows cannot be deleted)
    async fn delete_document(&self, user_id: &str, id: &str) -> Result<usize>;
}

/// Trait for document service operations
#[async_trait]
pub trait DocumentServiceTrait: Send + Sync {
    /// Score documents against a query. `user_id` is the authenticated caller,
    /// when there is one; sources reading private documents reject anonymous
    /// callers with an Unauthorized error.
    fn search(&self, user_id: Option<&str>, query: SearchQuery) -> Result<SearchResponse>;

    /// List the user's own documents
    fn get_user_documents(&self, user_id: &str) -> Result<Vec<Document>>;

    /// Create a private document for the user
    async fn create_document(&self, user_id: &str, input: DocumentInput) -> Result<Document>;

    /// Delete one of the user's documents
    async fn delete_document(&self, user_id: &str, id: &str) -> Result<usize>;
}
