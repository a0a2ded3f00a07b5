use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use spendwise_core::budget::BudgetVsActual;
use spendwise_core::categories::CategoryWithChildren;
use spendwise_core::expenses::Expense;
use spendwise_core::months::MonthRef;
use spendwise_core::Error as CoreError;

use crate::auth::AuthedUser;
use crate::error::ApiResult;
use crate::main_lib::AppState;

/// Composed dashboard payload for the current month.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub month: MonthRef,
    pub categories: Vec<CategoryWithChildren>,
    pub recent_expenses: Vec<Expense>,
    pub budget: Option<BudgetVsActual>,
}

/// Unwraps one of the overview's independent fetches, degrading failures to
/// an empty section. Reads on this page never take the whole dashboard down;
/// the failure is only logged.
fn degrade<T>(
    section: &str,
    joined: Result<Result<T, CoreError>, tokio::task::JoinError>,
) -> Option<T> {
    match joined {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            tracing::warn!("overview {} fetch failed, serving empty section: {}", section, e);
            None
        }
        Err(e) => {
            tracing::warn!("overview {} fetch panicked or was cancelled: {}", section, e);
            None
        }
    }
}

/// The page composer: the three per-user reads are independent, so they run
/// concurrently and each one fails on its own.
async fn get_overview(
    AuthedUser(user): AuthedUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Overview>> {
    if let Some(cached) = state.overview_cache.get(&user) {
        return Ok(Json(cached));
    }

    let month = MonthRef::current();

    let categories_task = {
        let state = state.clone();
        let user = user.clone();
        tokio::task::spawn_blocking(move || {
            state.category_service.get_categories_hierarchical(&user)
        })
    };
    let expenses_task = {
        let state = state.clone();
        let user = user.clone();
        tokio::task::spawn_blocking(move || {
            state.expense_service.list_expenses(&user, Some(month), None)
        })
    };
    let budget_task = {
        let state = state.clone();
        let user = user.clone();
        tokio::task::spawn_blocking(move || state.budget_service.budget_vs_actual(&user, month))
    };

    let (categories, expenses, budget) =
        tokio::join!(categories_task, expenses_task, budget_task);

    let overview = Overview {
        month,
        categories: degrade("categories", categories).unwrap_or_default(),
        recent_expenses: degrade("expenses", expenses).unwrap_or_default(),
        budget: degrade("budget", budget),
    };

    state.overview_cache.insert(&user, overview.clone());
    Ok(Json(overview))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/overview", get(get_overview))
}
