use crate::categories::categories_model::{Category, NewCategory, UpdateCategory};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::{categories, expenses};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        CategoryRepository { pool, writer }
    }
}

/// Loads the addressed row and verifies it belongs to the caller.
/// Missing row -> NotFound, foreign row -> Unauthorized.
fn load_owned(conn: &mut SqliteConnection, user_id: &str, id: &str) -> Result<Category> {
    let existing: Option<Category> = categories::table
        .find(id)
        .first::<Category>(conn)
        .optional()?;

    match existing {
        None => Err(Error::NotFound(format!("category {}", id))),
        Some(cat) if cat.user_id != user_id => {
            Err(Error::Unauthorized(format!("category {}", id)))
        }
        Some(cat) => Ok(cat),
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_all_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::user_id.eq(user_id))
            .order((categories::sort_order.asc(), categories::name.asc()))
            .load::<Category>(&mut conn)?)
    }

    fn get_category_by_id(&self, user_id: &str, id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .find(id)
            .filter(categories::user_id.eq(user_id))
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn get_parent_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::parent_id.is_null())
            .order(categories::sort_order.asc())
            .load::<Category>(&mut conn)?)
    }

    fn get_tracked_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::parent_id.is_null())
            .filter(categories::is_tracked.eq(1))
            .order(categories::sort_order.asc())
            .load::<Category>(&mut conn)?)
    }

    fn get_children(&self, user_id: &str, parent_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::user_id.eq(user_id))
            .filter(categories::parent_id.eq(parent_id))
            .order(categories::sort_order.asc())
            .load::<Category>(&mut conn)?)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut category = new_category;
                if category.id.is_none() {
                    category.id = Some(format!(
                        "cat_{}",
                        &Uuid::new_v4().to_string().replace('-', "")[..12]
                    ));
                }

                diesel::insert_into(categories::table)
                    .values(&category)
                    .execute(conn)?;

                Ok(categories::table
                    .find(category.id.unwrap())
                    .first::<Category>(conn)?)
            })
            .await
    }

    async fn update_category(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateCategory,
    ) -> Result<Category> {
        let user_owned = user_id.to_string();
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                load_owned(conn, &user_owned, &id_owned)?;

                diesel::update(categories::table.find(&id_owned))
                    .set(&update)
                    .execute(conn)?;

                Ok(categories::table
                    .find(&id_owned)
                    .first::<Category>(conn)?)
            })
            .await
    }

    async fn delete_category(&self, user_id: &str, id: &str) -> Result<usize> {
        let user_owned = user_id.to_string();
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                load_owned(conn, &user_owned, &id_owned)?;

                // Refuse to delete while expenses reference the category or a child
                let child_ids: Vec<String> = categories::table
                    .filter(categories::parent_id.eq(&id_owned))
                    .select(categories::id)
                    .load::<String>(conn)?;

                let mut referenced = child_ids.clone();
                referenced.push(id_owned.clone());

                let expense_count: i64 = expenses::table
                    .filter(
                        expenses::category_id
                            .eq_any(&referenced)
                            .or(expenses::sub_category_id.eq_any(&referenced)),
                    )
                    .count()
                    .get_result(conn)?;

                if expense_count > 0 {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Cannot delete category: {} expenses are assigned to it",
                        expense_count
                    ))));
                }

                // Also delete any subcategories
                let deleted = diesel::delete(
                    categories::table.filter(
                        categories::id
                            .eq(&id_owned)
                            .or(categories::parent_id.eq(&id_owned)),
                    ),
                )
                .execute(conn)?;

                Ok(deleted)
            })
            .await
    }

    fn has_expenses(&self, user_id: &str, category_id: &str) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        let count: i64 = expenses::table
            .filter(expenses::user_id.eq(user_id))
            .filter(
                expenses::category_id
                    .eq(category_id)
                    .or(expenses::sub_category_id.eq(category_id)),
            )
            .count()
            .get_result(&mut conn)?;
        Ok(count > 0)
    }
}
