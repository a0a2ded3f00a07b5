use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::months::MonthRef;

/// A manual reallocation of budget between two categories within one month.
/// Shifts never change the categories' base budgets; they adjust a single
/// month's figures.
#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budget_shifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct BudgetShift {
    pub id: String,
    pub user_id: String,
    pub year: i32,
    pub month: i32,
    pub from_category_id: String,
    pub to_category_id: String,
    pub amount: String,
    pub note: Option<String>,
    pub created_at: String,
}

impl BudgetShift {
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO)
    }
}

/// Input for creating/updating a budget shift
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budget_shifts)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetShift {
    pub id: Option<String>,
    pub user_id: String,
    pub year: i32,
    pub month: i32,
    pub from_category_id: String,
    pub to_category_id: String,
    pub amount: String,
    pub note: Option<String>,
    pub created_at: String,
}

/// Client input for creating a budget shift
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetShiftInput {
    pub year: i32,
    pub month: u32,
    pub from_category_id: String,
    pub to_category_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

/// Month navigation envelope embedded in the monthly report
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MonthNavigation {
    pub previous: MonthRef,
    pub next: Option<MonthRef>,
    pub is_current: bool,
}

/// Budget vs actual comparison for one month
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVsActual {
    pub month: MonthRef,
    pub month_key: String,
    pub navigation: MonthNavigation,
    pub totals: BudgetVsActualSummary,
    pub by_category: Vec<CategoryBudgetVsActual>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVsActualSummary {
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub difference: Decimal,
    pub percent_used: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudgetVsActual {
    pub category_id: String,
    pub category_name: String,
    pub category_color: Option<String>,
    pub budgeted: Decimal,
    pub actual: Decimal,
    pub difference: Decimal,
    pub percent_used: Decimal,
    pub is_over_budget: bool,
}
