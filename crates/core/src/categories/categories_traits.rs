use crate::categories::categories_model::{
    Category, CategoryInput, CategoryWithChildren, NewCategory, UpdateCategory,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations. Every read is scoped to the
/// owning user; writes verify ownership of the addressed row first.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Get all categories belonging to a user
    fn get_all_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Get one of the user's categories by ID
    fn get_category_by_id(&self, user_id: &str, id: &str) -> Result<Option<Category>>;

    /// Get the user's top-level categories (those with no parent_id)
    fn get_parent_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Get the user's tracked top-level categories
    fn get_tracked_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Get subcategories of one of the user's categories
    fn get_children(&self, user_id: &str, parent_id: &str) -> Result<Vec<Category>>;

    /// Create a new category
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Update a category owned by the user
    async fn update_category(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateCategory,
    ) -> Result<Category>;

    /// Delete a category owned by the user (only if no expenses reference it)
    async fn delete_category(&self, user_id: &str, id: &str) -> Result<usize>;

    /// Check if any of the user's expenses reference the category or its children
    fn has_expenses(&self, user_id: &str, category_id: &str) -> Result<bool>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Get the user's categories organized hierarchically
    fn get_categories_hierarchical(&self, user_id: &str) -> Result<Vec<CategoryWithChildren>>;

    /// Get the user's categories as a flat list
    fn get_all_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Get one of the user's categories by ID
    fn get_category(&self, user_id: &str, id: &str) -> Result<Option<Category>>;

    /// Create a new category for the user
    async fn create_category(&self, user_id: &str, input: CategoryInput) -> Result<Category>;

    /// Update one of the user's categories
    async fn update_category(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateCategory,
    ) -> Result<Category>;

    /// Delete one of the user's categories (fails while expenses reference it)
    async fn delete_category(&self, user_id: &str, id: &str) -> Result<usize>;
}
