pub mod documents_model;
pub mod documents_repository;
pub mod documents_service;
pub mod documents_traits;

pub use documents_model::{
    Document, DocumentInput, NewDocument, SearchHit, SearchQuery, SearchResponse, SearchSource,
};
pub use documents_repository::DocumentRepository;
pub use documents_service::DocumentService;
pub use documents_traits::{DocumentRepositoryTrait, DocumentServiceTrait};
