use crate::errors::{Error, Result};
use crate::users::users_model::{User, UserProfile};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use async_trait::async_trait;
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepositoryTrait>) -> Self {
        UserService { user_repo }
    }
}

fn validate_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    // Coarse shape check; the mail loop is the real validator
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if !valid {
        return Err(Error::validation(format!("invalid email address: {}", email)));
    }
    Ok(email)
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, email: &str, password_hash: String) -> Result<User> {
        let email = validate_email(email)?;
        self.user_repo.create_user(email, password_hash).await
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo.get_user_by_email(&email.trim().to_lowercase())
    }

    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        let user = self
            .user_repo
            .get_user_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("user {}", user_id)))?;
        Ok(UserProfile::from(user))
    }
}
