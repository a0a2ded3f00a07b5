use crate::expenses::expenses_model::{
    Expense, ExpenseInput, ExpenseUpdateInput, NewExpense, UpdateExpense,
};
use crate::errors::Result;
use crate::months::MonthRef;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for expense repository operations, owner-scoped throughout.
#[async_trait]
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// List a user's expenses, newest first, optionally restricted to a date
    /// range (inclusive) and/or a category.
    fn list_expenses(
        &self,
        user_id: &str,
        range: Option<(NaiveDate, NaiveDate)>,
        category_id: Option<&str>,
    ) -> Result<Vec<Expense>>;

    /// Get one of the user's expenses by ID
    fn get_expense_by_id(&self, user_id: &str, id: &str) -> Result<Option<Expense>>;

    /// Create a new expense
    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense>;

    /// Update an expense owned by the user
    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateExpense,
    ) -> Result<Expense>;

    /// Delete an expense owned by the user
    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<usize>;
}

/// Trait for expense service operations
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    /// List the user's expenses, optionally restricted to one month and/or category
    fn list_expenses(
        &self,
        user_id: &str,
        month: Option<MonthRef>,
        category_id: Option<&str>,
    ) -> Result<Vec<Expense>>;

    /// Get one of the user's expenses by ID
    fn get_expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>>;

    /// Record a new expense for the user
    async fn create_expense(&self, user_id: &str, input: ExpenseInput) -> Result<Expense>;

    /// Update one of the user's expenses
    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        input: ExpenseUpdateInput,
    ) -> Result<Expense>;

    /// Delete one of the user's expenses
    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<usize>;
}
