//! Tests for the budget vs actual aggregator and budget shift validation.

#[cfg(test)]
mod tests {
    use crate::budget::budget_model::{BudgetShift, BudgetShiftInput, NewBudgetShift};
    use crate::budget::budget_service::BudgetService;
    use crate::budget::budget_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
    use crate::categories::{Category, CategoryRepositoryTrait, NewCategory, UpdateCategory};
    use crate::errors::{Error, Result};
    use crate::expenses::{Expense, ExpenseRepositoryTrait, NewExpense, UpdateExpense};
    use crate::months::MonthRef;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    const USER: &str = "usr_test";

    fn category(id: &str, budget: Option<&str>, tracked: bool) -> Category {
        Category {
            id: id.to_string(),
            user_id: USER.to_string(),
            name: id.to_uppercase(),
            parent_id: None,
            color: None,
            icon: None,
            is_tracked: if tracked { 1 } else { 0 },
            monthly_budget: budget.map(|b| b.to_string()),
            sort_order: 0,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn expense(id: &str, category_id: &str, amount: &str, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: USER.to_string(),
            category_id: category_id.to_string(),
            sub_category_id: None,
            name: None,
            amount: amount.to_string(),
            currency: "USD".to_string(),
            expense_date: date.to_string(),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn shift(from: &str, to: &str, amount: &str, month: MonthRef) -> BudgetShift {
        BudgetShift {
            id: format!("bsh_{}_{}", from, to),
            user_id: USER.to_string(),
            year: month.year,
            month: month.month as i32,
            from_category_id: from.to_string(),
            to_category_id: to.to_string(),
            amount: amount.to_string(),
            note: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[derive(Default)]
    struct StubCategoryRepo {
        categories: Vec<Category>,
    }

    #[async_trait]
    impl CategoryRepositoryTrait for StubCategoryRepo {
        fn get_all_categories(&self, user_id: &str) -> Result<Vec<Category>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect())
        }

        fn get_category_by_id(&self, user_id: &str, id: &str) -> Result<Option<Category>> {
            Ok(self
                .categories
                .iter()
                .find(|c| c.user_id == user_id && c.id == id)
                .cloned())
        }

        fn get_parent_categories(&self, user_id: &str) -> Result<Vec<Category>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.user_id == user_id && c.parent_id.is_none())
                .cloned()
                .collect())
        }

        fn get_tracked_categories(&self, user_id: &str) -> Result<Vec<Category>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.user_id == user_id && c.parent_id.is_none() && c.is_tracked == 1)
                .cloned()
                .collect())
        }

        fn get_children(&self, user_id: &str, parent_id: &str) -> Result<Vec<Category>> {
            Ok(self
                .categories
                .iter()
                .filter(|c| c.user_id == user_id && c.parent_id.as_deref() == Some(parent_id))
                .cloned()
                .collect())
        }

        async fn create_category(&self, _new_category: NewCategory) -> Result<Category> {
            unimplemented!("not needed by budget tests")
        }

        async fn update_category(
            &self,
            _user_id: &str,
            _id: &str,
            _update: UpdateCategory,
        ) -> Result<Category> {
            unimplemented!("not needed by budget tests")
        }

        async fn delete_category(&self, _user_id: &str, _id: &str) -> Result<usize> {
            unimplemented!("not needed by budget tests")
        }

        fn has_expenses(&self, _user_id: &str, _category_id: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[derive(Default)]
    struct StubExpenseRepo {
        expenses: Vec<Expense>,
    }

    #[async_trait]
    impl ExpenseRepositoryTrait for StubExpenseRepo {
        fn list_expenses(
            &self,
            user_id: &str,
            range: Option<(NaiveDate, NaiveDate)>,
            category_id: Option<&str>,
        ) -> Result<Vec<Expense>> {
            Ok(self
                .expenses
                .iter()
                .filter(|e| e.user_id == user_id)
                .filter(|e| match range {
                    Some((start, end)) => {
                        let date = e.date().expect("test expense has a valid date");
                        date >= start && date <= end
                    }
                    None => true,
                })
                .filter(|e| match category_id {
                    Some(cat) => e.category_id == cat,
                    None => true,
                })
                .cloned()
                .collect())
        }

        fn get_expense_by_id(&self, user_id: &str, id: &str) -> Result<Option<Expense>> {
            Ok(self
                .expenses
                .iter()
                .find(|e| e.user_id == user_id && e.id == id)
                .cloned())
        }

        async fn create_expense(&self, _new_expense: NewExpense) -> Result<Expense> {
            unimplemented!("not needed by budget tests")
        }

        async fn update_expense(
            &self,
            _user_id: &str,
            _id: &str,
            _update: UpdateExpense,
        ) -> Result<Expense> {
            unimplemented!("not needed by budget tests")
        }

        async fn delete_expense(&self, _user_id: &str, _id: &str) -> Result<usize> {
            unimplemented!("not needed by budget tests")
        }
    }

    #[derive(Default)]
    struct StubBudgetRepo {
        shifts: Mutex<Vec<BudgetShift>>,
    }

    #[async_trait]
    impl BudgetRepositoryTrait for StubBudgetRepo {
        fn get_shifts(&self, user_id: &str, month: MonthRef) -> Result<Vec<BudgetShift>> {
            Ok(self
                .shifts
                .lock()
                .unwrap()
                .iter()
                .filter(|s| {
                    s.user_id == user_id
                        && s.year == month.year
                        && s.month == month.month as i32
                })
                .cloned()
                .collect())
        }

        fn get_shift_by_id(&self, user_id: &str, id: &str) -> Result<Option<BudgetShift>> {
            Ok(self
                .shifts
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.user_id == user_id && s.id == id)
                .cloned())
        }

        async fn create_shift(&self, new_shift: NewBudgetShift) -> Result<BudgetShift> {
            let created = BudgetShift {
                id: new_shift.id.unwrap_or_else(|| "bsh_new".to_string()),
                user_id: new_shift.user_id,
                year: new_shift.year,
                month: new_shift.month,
                from_category_id: new_shift.from_category_id,
                to_category_id: new_shift.to_category_id,
                amount: new_shift.amount,
                note: new_shift.note,
                created_at: new_shift.created_at,
            };
            self.shifts.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn delete_shift(&self, _user_id: &str, _id: &str) -> Result<usize> {
            unimplemented!("not needed by budget tests")
        }
    }

    fn service(
        categories: Vec<Category>,
        expenses: Vec<Expense>,
        shifts: Vec<BudgetShift>,
    ) -> BudgetService {
        BudgetService::new(
            Arc::new(StubBudgetRepo {
                shifts: Mutex::new(shifts),
            }),
            Arc::new(StubCategoryRepo { categories }),
            Arc::new(StubExpenseRepo { expenses }),
        )
    }

    fn march() -> MonthRef {
        MonthRef::new(2024, 3).unwrap()
    }

    #[test]
    fn sums_expenses_against_budgets_per_category() {
        let svc = service(
            vec![
                category("c1", Some("500"), true),
                category("c2", None, true),
            ],
            vec![
                expense("e1", "c1", "100", "2024-03-05"),
                expense("e2", "c1", "50", "2024-03-20"),
            ],
            vec![],
        );

        let report = svc.budget_vs_actual(USER, march()).unwrap();
        assert_eq!(report.by_category.len(), 2);

        let c1 = report
            .by_category
            .iter()
            .find(|c| c.category_id == "c1")
            .unwrap();
        assert_eq!(c1.budgeted, dec!(500));
        assert_eq!(c1.actual, dec!(150));
        assert_eq!(c1.difference, dec!(350));
        assert_eq!(c1.percent_used, dec!(30));
        assert!(!c1.is_over_budget);

        let c2 = report
            .by_category
            .iter()
            .find(|c| c.category_id == "c2")
            .unwrap();
        assert_eq!(c2.budgeted, dec!(0));
        assert_eq!(c2.actual, dec!(0));
        assert_eq!(c2.percent_used, dec!(0));

        assert_eq!(report.totals.budgeted, dec!(500));
        assert_eq!(report.totals.actual, dec!(150));
        assert_eq!(report.month_key, "2024-03");
    }

    #[test]
    fn user_without_categories_gets_empty_report() {
        let svc = service(vec![], vec![], vec![]);
        let report = svc.budget_vs_actual(USER, march()).unwrap();
        assert!(report.by_category.is_empty());
        assert_eq!(report.totals.budgeted, dec!(0));
        assert_eq!(report.totals.actual, dec!(0));
    }

    #[test]
    fn ignores_expenses_outside_the_month() {
        let svc = service(
            vec![category("c1", Some("100"), true)],
            vec![
                expense("e1", "c1", "40", "2024-02-29"),
                expense("e2", "c1", "25", "2024-03-01"),
                expense("e3", "c1", "60", "2024-04-01"),
            ],
            vec![],
        );

        let report = svc.budget_vs_actual(USER, march()).unwrap();
        assert_eq!(report.by_category[0].actual, dec!(25));
    }

    #[test]
    fn untracked_categories_are_excluded() {
        let svc = service(
            vec![
                category("c1", Some("100"), true),
                category("c2", Some("999"), false),
            ],
            vec![expense("e1", "c2", "10", "2024-03-10")],
            vec![],
        );

        let report = svc.budget_vs_actual(USER, march()).unwrap();
        assert_eq!(report.by_category.len(), 1);
        assert_eq!(report.by_category[0].category_id, "c1");
    }

    #[test]
    fn shifts_move_budget_between_categories() {
        let svc = service(
            vec![
                category("c1", Some("500"), true),
                category("c2", Some("200"), true),
            ],
            vec![],
            vec![shift("c1", "c2", "150", march())],
        );

        let report = svc.budget_vs_actual(USER, march()).unwrap();
        let c1 = report
            .by_category
            .iter()
            .find(|c| c.category_id == "c1")
            .unwrap();
        let c2 = report
            .by_category
            .iter()
            .find(|c| c.category_id == "c2")
            .unwrap();
        assert_eq!(c1.budgeted, dec!(350));
        assert_eq!(c2.budgeted, dec!(350));
        // Reallocation is budget-neutral overall
        assert_eq!(report.totals.budgeted, dec!(700));
    }

    #[test]
    fn flags_over_budget_categories() {
        let svc = service(
            vec![category("c1", Some("100"), true)],
            vec![expense("e1", "c1", "130", "2024-03-15")],
            vec![],
        );

        let report = svc.budget_vs_actual(USER, march()).unwrap();
        assert!(report.by_category[0].is_over_budget);
        assert_eq!(report.by_category[0].difference, dec!(-30));
        assert_eq!(report.by_category[0].percent_used, dec!(130));
    }

    #[tokio::test]
    async fn create_shift_rejects_invalid_months() {
        let svc = service(
            vec![
                category("c1", Some("500"), true),
                category("c2", Some("200"), true),
            ],
            vec![],
            vec![],
        );

        let result = svc
            .create_shift(
                USER,
                BudgetShiftInput {
                    year: 2024,
                    month: 13,
                    from_category_id: "c1".to_string(),
                    to_category_id: "c2".to_string(),
                    amount: dec!(50),
                    note: None,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn create_shift_rejects_self_and_unknown_categories() {
        let svc = service(vec![category("c1", Some("500"), true)], vec![], vec![]);

        let self_shift = svc
            .create_shift(
                USER,
                BudgetShiftInput {
                    year: 2024,
                    month: 3,
                    from_category_id: "c1".to_string(),
                    to_category_id: "c1".to_string(),
                    amount: dec!(50),
                    note: None,
                },
            )
            .await;
        assert!(matches!(self_shift, Err(Error::Validation(_))));

        let unknown = svc
            .create_shift(
                USER,
                BudgetShiftInput {
                    year: 2024,
                    month: 3,
                    from_category_id: "c1".to_string(),
                    to_category_id: "missing".to_string(),
                    amount: dec!(50),
                    note: None,
                },
            )
            .await;
        assert!(matches!(unknown, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn create_shift_requires_tracked_categories() {
        let svc = service(
            vec![
                category("c1", Some("500"), true),
                category("c2", None, false),
            ],
            vec![],
            vec![],
        );

        let result = svc
            .create_shift(
                USER,
                BudgetShiftInput {
                    year: 2024,
                    month: 3,
                    from_category_id: "c1".to_string(),
                    to_category_id: "c2".to_string(),
                    amount: dec!(50),
                    note: None,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
