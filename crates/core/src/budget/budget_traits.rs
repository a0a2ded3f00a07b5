use crate::budget::budget_model::{BudgetShift, BudgetShiftInput, BudgetVsActual, NewBudgetShift};
use crate::errors::Result;
use crate::months::MonthRef;
use async_trait::async_trait;

/// Trait for budget repository operations (budget shift storage)
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// List the user's shifts for one month
    fn get_shifts(&self, user_id: &str, month: MonthRef) -> Result<Vec<BudgetShift>>;

    /// Get one of the user's shifts by ID
    fn get_shift_by_id(&self, user_id: &str, id: &str) -> Result<Option<BudgetShift>>;

    /// Create a new shift
    async fn create_shift(&self, new_shift: NewBudgetShift) -> Result<BudgetShift>;

    /// Delete a shift owned by the user
    async fn delete_shift(&self, user_id: &str, id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Compare budgeted amounts with recorded spending for every tracked
    /// category of the user in the given month.
    fn budget_vs_actual(&self, user_id: &str, month: MonthRef) -> Result<BudgetVsActual>;

    /// List the user's budget shifts for one month
    fn get_shifts(&self, user_id: &str, month: MonthRef) -> Result<Vec<BudgetShift>>;

    /// Reallocate budget between two tracked categories for one month
    async fn create_shift(&self, user_id: &str, input: BudgetShiftInput) -> Result<BudgetShift>;

    /// Delete one of the user's budget shifts
    async fn delete_shift(&self, user_id: &str, id: &str) -> Result<usize>;
}
