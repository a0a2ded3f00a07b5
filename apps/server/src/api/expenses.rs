use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use spendwise_core::expenses::{Expense, ExpenseInput, ExpenseUpdateInput};
use spendwise_core::months::MonthRef;
use spendwise_core::Error as CoreError;

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseListQuery {
    year: Option<i32>,
    month: Option<u32>,
    category_id: Option<String>,
}

async fn list_expenses(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseListQuery>,
) -> ApiResult<Json<Vec<Expense>>> {
    let month = match (params.year, params.month) {
        (Some(year), Some(month)) => Some(MonthRef::new(year, month)?),
        (None, None) => None,
        _ => {
            return Err(
                CoreError::validation("year and month must be provided together").into(),
            )
        }
    };

    let expenses =
        state
            .expense_service
            .list_expenses(&user, month, params.category_id.as_deref())?;
    Ok(Json(expenses))
}

async fn get_expense(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Expense>> {
    let expense = state
        .expense_service
        .get_expense(&user, &id)?
        .ok_or_else(|| CoreError::NotFound(format!("expense {}", id)))?;
    Ok(Json(expense))
}

async fn create_expense(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
    Json(input): Json<ExpenseInput>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let expense = state.expense_service.create_expense(&user, input).await?;
    state.overview_cache.invalidate(&user);
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_expense(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<ExpenseUpdateInput>,
) -> ApiResult<Json<Expense>> {
    let expense = state
        .expense_service
        .update_expense(&user, &id, input)
        .await?;
    state.overview_cache.invalidate(&user);
    Ok(Json(expense))
}

async fn delete_expense(
    AuthedUser(user): AuthedUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.expense_service.delete_expense(&user, &id).await?;
    state.overview_cache.invalidate(&user);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}
