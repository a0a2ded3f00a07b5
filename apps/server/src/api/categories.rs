use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use spendwise_core::categories::{Category, CategoryInput, CategoryWithChildren, UpdateCategory};
use spendwise_core::Error as CoreError;

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_categories(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CategoryWithChildren>>> {
    let categories = state.category_service.get_categories_hierarchical(&user)?;
    Ok(Json(categories))
}

async fn get_category(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Category>> {
    let category = state
        .category_service
        .get_category(&user, &id)?
        .ok_or_else(|| CoreError::NotFound(format!("category {}", id)))?;
    Ok(Json(category))
}

async fn create_category(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<CategoryInput>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.category_service.create_category(&user, input).await?;
    state.overview_cache.invalidate(&user);
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<UpdateCategory>,
) -> ApiResult<Json<Category>> {
    let category = state
        .category_service
        .update_category(&user, &id, update)
        .await?;
    state.overview_cache.invalidate(&user);
    Ok(Json(category))
}

async fn delete_category(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.category_service.delete_category(&user, &id).await?;
    state.overview_cache.invalidate(&user);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}
