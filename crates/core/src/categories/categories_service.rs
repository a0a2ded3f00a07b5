use crate::categories::categories_model::{
    Category, CategoryInput, CategoryWithChildren, NewCategory, UpdateCategory,
};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { category_repo }
    }

    /// Helper to organize categories into hierarchical structure
    fn organize_hierarchically(&self, categories: Vec<Category>) -> Vec<CategoryWithChildren> {
        let parents: Vec<Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .collect();

        parents
            .into_iter()
            .map(|parent| {
                let children: Vec<Category> = categories
                    .iter()
                    .filter(|c| c.parent_id.as_ref() == Some(&parent.id))
                    .cloned()
                    .collect();

                CategoryWithChildren {
                    category: parent,
                    children,
                }
            })
            .collect()
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories_hierarchical(&self, user_id: &str) -> Result<Vec<CategoryWithChildren>> {
        let all_categories = self.category_repo.get_all_categories(user_id)?;
        Ok(self.organize_hierarchically(all_categories))
    }

    fn get_all_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.category_repo.get_all_categories(user_id)
    }

    fn get_category(&self, user_id: &str, id: &str) -> Result<Option<Category>> {
        self.category_repo.get_category_by_id(user_id, id)
    }

    async fn create_category(&self, user_id: &str, input: CategoryInput) -> Result<Category> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("category name must not be empty"));
        }

        // A subcategory must hang off one of the caller's top-level categories
        if let Some(ref pid) = input.parent_id {
            let parent = self
                .category_repo
                .get_category_by_id(user_id, pid)?
                .ok_or_else(|| Error::NotFound(format!("category {}", pid)))?;
            if !parent.is_parent() {
                return Err(Error::validation(
                    "subcategories cannot have subcategories of their own",
                ));
            }
        }

        let sort_order = if let Some(ref pid) = input.parent_id {
            let children = self.category_repo.get_children(user_id, pid)?;
            children.len() as i32 + 1
        } else {
            let parents = self.category_repo.get_parent_categories(user_id)?;
            parents.len() as i32 + 1
        };

        let now = Utc::now().to_rfc3339();
        let new_category = NewCategory {
            id: None,
            user_id: user_id.to_string(),
            name,
            parent_id: input.parent_id,
            color: input.color,
            icon: input.icon,
            is_tracked: if input.is_tracked { 1 } else { 0 },
            monthly_budget: input.monthly_budget.map(|b| b.to_string()),
            sort_order,
            created_at: now.clone(),
            updated_at: now,
        };

        self.category_repo.create_category(new_category).await
    }

    async fn update_category(
        &self,
        user_id: &str,
        id: &str,
        update: UpdateCategory,
    ) -> Result<Category> {
        if let Some(Some(ref budget)) = update.monthly_budget {
            // Reject figures the aggregator would silently read as zero
            budget
                .parse::<rust_decimal::Decimal>()
                .map_err(Error::from)?;
        }
        if let Some(ref name) = update.name {
            if name.trim().is_empty() {
                return Err(Error::validation("category name must not be empty"));
            }
        }

        let update = UpdateCategory {
            updated_at: Utc::now().to_rfc3339(),
            ..update
        };

        self.category_repo.update_category(user_id, id, update).await
    }

    async fn delete_category(&self, user_id: &str, id: &str) -> Result<usize> {
        self.category_repo.delete_category(user_id, id).await
    }
}
