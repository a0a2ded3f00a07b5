use crate::db::{get_connection, WriteHandle};
use crate::errors::{Error, Result};
use crate::expenses::expenses_model::{Expense, NewExpense, UpdateExpense};
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::schema::expenses;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct ExpenseRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ExpenseRepository { pool, writer }
    }
}

fn load_owned(conn: &mut SqliteConnection, user_id: &str, id: &str) -> Result<Expense> {
    let existing: Option<Expense> = expenses::table
        .find(id)
        .first::<Expense>(conn)
        .optional()?;

    match existing {
        None => Err(Error::NotFound(format!("expense {}", id))),
        Some(exp) if exp.user_id != user_id => {
            Err(Error::Unauthorized(format!("expense {}", id)))
        }
        Some(exp) => Ok(exp),
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn list_expenses(
        &self,
        user_id: &str,
        range: Option<(NaiveDate, NaiveDate)>,
        category_id: Option<&str>,
    ) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .into_boxed();

        if let Some((start, end)) = range {
            query = query
                .filter(expenses::expense_date.ge(start.format("%Y-%m-%d").to_string()))
                .filter(expenses::expense_date.le(end.format("%Y-%m-%d").to_string()));
        }

        if let Some(cat) = category_id {
            query = query.filter(
                expenses::category_id
                    .eq(cat.to_string())
                    .or(expenses::sub_category_id.eq(cat.to_string())),
            );
        }

        Ok(query
            .order((expenses::expense_date.desc(), expenses::created_at.desc()))
            .load::<Expense>(&mut conn)?)
    }

    fn get_expense_by_id(&self, user_id: &str, id: &str) -> Result<Option<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(expenses::table
            .find(id)
            .filter(expenses::user_id.eq(user_id))
            .first::<Expense>(&mut conn)
            .optional()?)
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let mut expense = new_expense;
                if expense.id.is_none() {
                    expense.id = Some(format!(
                        "exp_{}",
                        &Uuid::new_v4().to_string().replace('-', "")[..12]
                    ));
                }

                diesel::insert_into(expenses::table)
                    .values(&expense)
                    .execute(conn)?;

                Ok(expenses::table
                    .find(expense.id.unwrap())
                    .first::<Expense>(conn)?)
            })
            .await
    }

    async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateExpense,
    ) -> Result<Expense> {
        let user_owned = user_id.to_string();
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                load_owned(conn, &user_owned, &id_owned)?;

                diesel::update(expenses::table.find(&id_owned))
                    .set(&update)
                    .execute(conn)?;

                Ok(expenses::table.find(&id_owned).first::<Expense>(conn)?)
            })
            .await
    }

    async fn delete_expense(&self, user_id: &str, id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                load_owned(conn, &user_owned, &id_owned)?;
                Ok(diesel::delete(expenses::table.find(&id_owned)).execute(conn)?)
            })
            .await
    }
}
