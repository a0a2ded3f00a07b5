use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use spendwise_core::budget::{BudgetShift, BudgetShiftInput, BudgetVsActual};
use spendwise_core::months::MonthRef;

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_budget_vs_actual(
    AuthedUser(user): AuthedUser,
    Path((year, month)): Path<(i32, u32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetVsActual>> {
    let month = MonthRef::new(year, month)?;
    let report = state.budget_service.budget_vs_actual(&user, month)?;
    Ok(Json(report))
}

async fn get_shifts(
    AuthedUser(user): AuthedUser,
    Path((year, month)): Path<(i32, u32)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetShift>>> {
    let month = MonthRef::new(year, month)?;
    let shifts = state.budget_service.get_shifts(&user, month)?;
    Ok(Json(shifts))
}

async fn create_shift(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<BudgetShiftInput>,
) -> ApiResult<(StatusCode, Json<BudgetShift>)> {
    let shift = state.budget_service.create_shift(&user, input).await?;
    state.overview_cache.invalidate(&user);
    Ok((StatusCode::CREATED, Json(shift)))
}

async fn delete_shift(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.budget_service.delete_shift(&user, &id).await?;
    state.overview_cache.invalidate(&user);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budget/{year}/{month}", get(get_budget_vs_actual))
        .route("/budget/{year}/{month}/shifts", get(get_shifts))
        .route("/budget/shifts", post(create_shift))
        .route("/budget/shifts/{id}", delete(delete_shift))
}
