use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Database model for expense categories.
///
/// A row with `parent_id = NULL` is a top-level category; a row pointing at a
/// parent is one of its subcategories. Budget figures are only meaningful on
/// top-level rows.
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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_tracked: i32,
    pub monthly_budget: Option<String>,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl Category {
    pub fn is_parent(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn tracked(&self) -> bool {
        self.is_tracked == 1
    }

    /// Budget figure as a decimal; unset or unparseable figures read as zero.
    pub fn budget_decimal(&self) -> Decimal {
        self.monthly_budget
            .as_deref()
            .and_then(|b| b.parse().ok())
            .unwrap_or(Decimal::ZERO)
    }
}

/// Model for creating a new category
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub user_id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_tracked: i32,
    pub monthly_budget: Option<String>,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Model for updating a category
#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_tracked: Option<i32>,
    // Some(None) clears the budget figure, None leaves it untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<Option<String>>,
    pub sort_order: Option<i32>,
    // Stamped by the service; not part of the wire payload
    #[serde(default)]
    pub updated_at: String,
}

/// Category with its subcategories (for hierarchical display)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

/// Client input for creating a category
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_tracked")]
    pub is_tracked: bool,
    #[serde(default)]
    pub monthly_budget: Option<Decimal>,
}

fn default_tracked() -> bool {
    true
}
