use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Database model for recorded expenses. Amounts are stored as decimal
/// strings; `expense_date` is an ISO `YYYY-MM-DD` string so lexicographic
/// range filters match chronological order.
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub sub_category_id: Option<String>,
    pub name: Option<String>,
    pub amount: String,
    pub currency: String,
    pub expense_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Expense {
    /// Amount as a decimal; unparseable rows read as zero.
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expense_date, "%Y-%m-%d").ok()
    }
}

/// Model for creating a new expense
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub user_id: String,
    pub category_id: String,
    pub sub_category_id: Option<String>,
    pub name: Option<String>,
    pub amount: String,
    pub currency: String,
    pub expense_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Model for updating an expense
#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::expenses)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpense {
    pub category_id: Option<String>,
    // Some(None) detaches the subcategory, None leaves it untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<Option<String>>,
    pub name: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub expense_date: Option<String>,
    // Stamped by the service; not part of the wire payload
    #[serde(default)]
    pub updated_at: String,
}

/// Client input for creating an expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub category_id: String,
    #[serde(default)]
    pub sub_category_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    pub expense_date: NaiveDate,
}

/// Client input for updating an expense
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdateInput {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category_id: Option<Option<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub expense_date: Option<NaiveDate>,
}
