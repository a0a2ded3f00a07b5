pub mod budget_model;
pub mod budget_repository;
pub mod budget_service;
pub mod budget_traits;

#[cfg(test)]
mod budget_service_tests;

pub use budget_model::{
    BudgetShift, BudgetShiftInput, BudgetVsActual, BudgetVsActualSummary, CategoryBudgetVsActual,
    MonthNavigation, NewBudgetShift,
};
pub use budget_repository::BudgetRepository;
pub use budget_service::BudgetService;
pub use budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
