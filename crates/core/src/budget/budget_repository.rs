use crate::budget::budget_model::{BudgetShift, NewBudgetShift};
use crate::budget::budget_traits::BudgetRepositoryTrait;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{Error, Result};
use crate::months::MonthRef;
use crate::schema::budget_shifts;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_shifts(&self, user_id: &str, month: MonthRef) -> Result<Vec<BudgetShift>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budget_shifts::table
            .filter(budget_shifts::user_id.eq(user_id))
            .filter(budget_shifts::year.eq(month.year))
            .filter(budget_shifts::month.eq(month.month as i32))
            .order(budget_shifts::created_at.asc())
            .load::<BudgetShift>(&mut conn)?)
    }

    fn get_shift_by_id(&self, user_id: &str, id: &str) -> Result<Option<BudgetShift>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budget_shifts::table
            .find(id)
            .filter(budget_shifts::user_id.eq(user_id))
            .first::<BudgetShift>(&mut conn)
            .optional()?)
    }

    async fn create_shift(&self, new_shift: NewBudgetShift) -> Result<BudgetShift> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetShift> {
                let mut shift = new_shift;
                if shift.id.is_none() {
                    shift.id = Some(format!(
                        "bsh_{}",
                        &Uuid::new_v4().to_string().replace('-', "")[..12]
                    ));
                }

                diesel::insert_into(budget_shifts::table)
                    .values(&shift)
                    .execute(conn)?;

                Ok(budget_shifts::table
                    .find(shift.id.unwrap())
                    .first::<BudgetShift>(conn)?)
            })
            .await
    }

    async fn delete_shift(&self, user_id: &str, id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let existing: Option<BudgetShift> = budget_shifts::table
                    .find(&id_owned)
                    .first::<BudgetShift>(conn)
                    .optional()?;

                match existing {
                    None => Err(Error::NotFound(format!("budget shift {}", id_owned))),
                    Some(shift) if shift.user_id != user_owned => {
                        Err(Error::Unauthorized(format!("budget shift {}", id_owned)))
                    }
                    Some(_) => Ok(diesel::delete(budget_shifts::table.find(&id_owned))
                        .execute(conn)?),
                }
            })
            .await
    }
}
