use crate::categories::{Category, CategoryRepositoryTrait};
use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{Error, Result};
use crate::expenses::expenses_model::{
    Expense, ExpenseInput, ExpenseUpdateInput, NewExpense, UpdateExpense,
};
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::months::MonthRef;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct ExpenseService {
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl ExpenseService {
    pub fn new(
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        ExpenseService {
            expense_repo,
            category_repo,
        }
    }

    /// Resolves the caller's category and checks the optional subcategory
    /// really is one of its children.
    fn resolve_category(
        &self,
        user_id: &str,
        category_id: &str,
        sub_category_id: Option<&str>,
    ) -> Result<Category> {
        let category = self
            .category_repo
            .get_category_by_id(user_id, category_id)?
            .ok_or_else(|| Error::NotFound(format!("category {}", category_id)))?;

        if !category.is_parent() {
            return Err(Error::validation(
                "expenses must reference a top-level category",
            ));
        }

        if let Some(sub_id) = sub_category_id {
            let sub = self
                .category_repo
                .get_category_by_id(user_id, sub_id)?
                .ok_or_else(|| Error::NotFound(format!("category {}", sub_id)))?;
            if sub.parent_id.as_deref() != Some(category_id) {
                return Err(Error::validation(format!(
                    "subcategory {} does not belong to category {}",
                    sub_id, category_id
                )));
            }
        }

        Ok(category)
    }
}

fn validate_amount(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation("expense amount must be positive"));
    }
    Ok(amount)
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn list_expenses(
        &self,
        user_id: &str,
        month: Option<MonthRef>,
        category_id: Option<&str>,
    ) -> Result<Vec<Expense>> {
        let range = month.map(|m| (m.first_day(), m.last_day()));
        self.expense_repo.list_expenses(user_id, range, category_id)
    }

    fn get_expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>> {
        self.expense_repo.get_expense_by_id(user_id, id)
    }

    async fn create_expense(&self, user_id: &str, input: ExpenseInput) -> Result<Expense> {
        let amount = validate_amount(input.amount)?;
        self.resolve_category(user_id, &input.category_id, input.sub_category_id.as_deref())?;

        let now = Utc::now().to_rfc3339();
        let new_expense = NewExpense {
            id: None,
            user_id: user_id.to_string(),
            category_id: input.category_id,
            sub_category_id: input.sub_category_id,
            name: input.name,
            amount: amount.to_string(),
            currency: input
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            expense_date: input.expense_date.format("%Y-%m-%d").to_string(),
            created_at: now.clone(),
            updated_at: now,
        };

        self.expense_repo.create_expense(new_expense).await
    }

    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        input: ExpenseUpdateInput,
    ) -> Result<Expense> {
        let amount = input.amount.map(validate_amount).transpose()?;

        // Re-check the category linkage when either side of it changes. When
        // the row is missing or foreign the repository raises the precise
        // ownership error below, so a missing read here is not a failure.
        if input.category_id.is_some() || input.sub_category_id.is_some() {
            if let Some(existing) = self.expense_repo.get_expense_by_id(user_id, id)? {
                let category_id = input
                    .category_id
                    .clone()
                    .unwrap_or_else(|| existing.category_id.clone());
                let sub_category_id = match &input.sub_category_id {
                    Some(sub) => sub.clone(),
                    None => existing.sub_category_id.clone(),
                };
                self.resolve_category(user_id, &category_id, sub_category_id.as_deref())?;
            }
        }

        let update = UpdateExpense {
            category_id: input.category_id,
            sub_category_id: input.sub_category_id,
            name: input.name,
            amount: amount.map(|a| a.to_string()),
            currency: input.currency,
            expense_date: input
                .expense_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            updated_at: Utc::now().to_rfc3339(),
        };

        self.expense_repo.update_expense(user_id, id, update).await
    }

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<usize> {
        self.expense_repo.delete_expense(user_id, id).await
    }
}
