use crate::budget::budget_model::{
    BudgetShift, BudgetShiftInput, BudgetVsActual, BudgetVsActualSummary, CategoryBudgetVsActual,
    MonthNavigation, NewBudgetShift,
};
use crate::budget::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::expenses::ExpenseRepositoryTrait;
use crate::months::MonthRef;
use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        BudgetService {
            budget_repo,
            category_repo,
            expense_repo,
        }
    }
}

fn percent_used(actual: Decimal, budgeted: Decimal) -> Decimal {
    if budgeted > Decimal::zero() {
        (actual / budgeted) * Decimal::from(100)
    } else {
        Decimal::zero()
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn budget_vs_actual(&self, user_id: &str, month: MonthRef) -> Result<BudgetVsActual> {
        debug!("Building budget vs actual for {}", month);

        let tracked = self.category_repo.get_tracked_categories(user_id)?;

        let expenses = self.expense_repo.list_expenses(
            user_id,
            Some((month.first_day(), month.last_day())),
            None,
        )?;

        // Subcategory expenses carry their parent category id, so grouping by
        // category_id already folds them into the right bucket.
        let mut actual_by_category: HashMap<String, Decimal> = HashMap::new();
        for expense in &expenses {
            *actual_by_category
                .entry(expense.category_id.clone())
                .or_insert(Decimal::ZERO) += expense.amount_decimal();
        }

        // Shifts move budget between categories for this month only
        let mut shift_adjustment: HashMap<String, Decimal> = HashMap::new();
        for shift in self.budget_repo.get_shifts(user_id, month)? {
            let amount = shift.amount_decimal();
            *shift_adjustment
                .entry(shift.from_category_id.clone())
                .or_insert(Decimal::ZERO) -= amount;
            *shift_adjustment
                .entry(shift.to_category_id.clone())
                .or_insert(Decimal::ZERO) += amount;
        }

        let mut total_budgeted = Decimal::ZERO;
        let mut total_actual = Decimal::ZERO;

        let by_category: Vec<CategoryBudgetVsActual> = tracked
            .into_iter()
            .map(|category| {
                // Categories without a budget figure report budgeted = 0
                let budgeted = category.budget_decimal()
                    + shift_adjustment
                        .get(&category.id)
                        .copied()
                        .unwrap_or(Decimal::ZERO);
                let actual = actual_by_category
                    .get(&category.id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);

                total_budgeted += budgeted;
                total_actual += actual;

                CategoryBudgetVsActual {
                    category_id: category.id,
                    category_name: category.name,
                    category_color: category.color,
                    budgeted: budgeted.round_dp(DISPLAY_DECIMAL_PRECISION),
                    actual: actual.round_dp(DISPLAY_DECIMAL_PRECISION),
                    difference: (budgeted - actual).round_dp(DISPLAY_DECIMAL_PRECISION),
                    percent_used: percent_used(actual, budgeted)
                        .round_dp(DISPLAY_DECIMAL_PRECISION),
                    is_over_budget: actual > budgeted,
                }
            })
            .collect();

        Ok(BudgetVsActual {
            month,
            month_key: month.key(),
            navigation: MonthNavigation {
                previous: month.previous(),
                next: month.next_navigable(),
                is_current: month.is_current(),
            },
            totals: BudgetVsActualSummary {
                budgeted: total_budgeted.round_dp(DISPLAY_DECIMAL_PRECISION),
                actual: total_actual.round_dp(DISPLAY_DECIMAL_PRECISION),
                difference: (total_budgeted - total_actual).round_dp(DISPLAY_DECIMAL_PRECISION),
                percent_used: percent_used(total_actual, total_budgeted)
                    .round_dp(DISPLAY_DECIMAL_PRECISION),
            },
            by_category,
        })
    }

    fn get_shifts(&self, user_id: &str, month: MonthRef) -> Result<Vec<BudgetShift>> {
        self.budget_repo.get_shifts(user_id, month)
    }

    async fn create_shift(&self, user_id: &str, input: BudgetShiftInput) -> Result<BudgetShift> {
        let month = MonthRef::new(input.year, input.month)?;

        if input.amount <= Decimal::ZERO {
            return Err(Error::validation("shift amount must be positive"));
        }
        if input.from_category_id == input.to_category_id {
            return Err(Error::validation(
                "cannot shift budget from a category to itself",
            ));
        }

        for category_id in [&input.from_category_id, &input.to_category_id] {
            let category = self
                .category_repo
                .get_category_by_id(user_id, category_id)?
                .ok_or_else(|| Error::NotFound(format!("category {}", category_id)))?;
            if !category.is_parent() || !category.tracked() {
                return Err(Error::validation(format!(
                    "budget shifts require tracked top-level categories, {} is not one",
                    category_id
                )));
            }
        }

        let new_shift = NewBudgetShift {
            id: None,
            user_id: user_id.to_string(),
            year: month.year,
            month: month.month as i32,
            from_category_id: input.from_category_id,
            to_category_id: input.to_category_id,
            amount: input.amount.to_string(),
            note: input.note,
            created_at: Utc::now().to_rfc3339(),
        };

        self.budget_repo.create_shift(new_shift).await
    }

    async fn delete_shift(&self, user_id: &str, id: &str) -> Result<usize> {
        self.budget_repo.delete_shift(user_id, id).await
    }
}
