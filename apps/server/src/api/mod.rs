pub mod auth;
pub mod budget;
pub mod categories;
pub mod documents;
pub mod expenses;
pub mod overview;
pub mod search;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(categories::router())
        .merge(expenses::router())
        .merge(budget::router())
        .merge(documents::router())
        .merge(search::router())
        .merge(overview::router());

    Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
