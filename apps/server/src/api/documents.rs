use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use spendwise_core::documents::{Document, DocumentInput};

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn list_documents(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Document>>> {
    let documents = state.document_service.get_user_documents(&user)?;
    Ok(Json(documents))
}

async fn create_document(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<DocumentInput>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let document = state.document_service.create_document(&user, input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn delete_document(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.document_service.delete_document(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route("/documents/{id}", axum::routing::delete(delete_document))
}
