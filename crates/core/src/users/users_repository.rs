use crate::db::{get_connection, WriteHandle};
use crate::errors::{Error, Result, ValidationError};
use crate::schema::users;
use crate::users::users_model::{NewUser, User};
use crate::users::users_traits::UserRepositoryTrait;
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .find(id)
            .first::<User>(&mut conn)
            .optional()?)
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()?)
    }

    async fn create_user(&self, email: String, password_hash: String) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let existing: Option<User> = users::table
                    .filter(users::email.eq(&email))
                    .first::<User>(conn)
                    .optional()?;
                if existing.is_some() {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "email {} is already registered",
                        email
                    ))));
                }

                let now = Utc::now().to_rfc3339();
                let new_user = NewUser {
                    id: Some(format!(
                        "usr_{}",
                        &Uuid::new_v4().to_string().replace('-', "")[..12]
                    )),
                    email,
                    password_hash,
                    created_at: now.clone(),
                    updated_at: now,
                };

                diesel::insert_into(users::table)
                    .values(&new_user)
                    .execute(conn)?;

                Ok(users::table
                    .find(new_user.id.unwrap())
                    .first::<User>(conn)?)
            })
            .await
    }
}
