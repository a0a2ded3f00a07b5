use crate::errors::Result;
use crate::users::users_model::{User, UserProfile};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Create a new user; duplicate emails fail with a validation error
    async fn create_user(&self, email: String, password_hash: String) -> Result<User>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Register a new account. The caller supplies an already-hashed password.
    async fn register(&self, email: &str, password_hash: String) -> Result<User>;

    /// Look up a user for login
    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Public profile of an existing user
    fn get_profile(&self, user_id: &str) -> Result<UserProfile>;
}
