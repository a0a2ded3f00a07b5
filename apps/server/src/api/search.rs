use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use spendwise_core::documents::{SearchQuery, SearchResponse};
use spendwise_core::Error as CoreError;

use crate::auth::MaybeUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

/// Search over the knowledge base and/or the caller's own documents.
///
/// The body is taken as a raw value so that shape errors come back as a 400
/// with a readable message instead of the framework's default rejection.
async fn search(
    MaybeUser(user): MaybeUser,
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> ApiResult<Json<SearchResponse>> {
    let query: SearchQuery = serde_json::from_value(body)
        .map_err(|e| CoreError::validation(format!("invalid search request: {}", e)))?;

    let response = state.document_service.search(user.as_deref(), query)?;
    Ok(Json(response))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/search", post(search))
}
