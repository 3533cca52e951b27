use std::sync::Arc;

use crate::domain::{Category, CategoryFilter, NewCategory, Page, Pagination};
use crate::error::{DomainError, RepoError};
use crate::ports::CategoryRepository;

use super::{internal, non_empty, require_text};

#[derive(Debug, Clone, Default)]
pub struct ListCategoriesParams {
    pub page: u64,
    pub limit: u64,
    pub search: String,
}

/// Category operations. No ownership scoping.
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, title: String) -> Result<Category, DomainError> {
        require_text("title", &title)?;

        self.repo
            .create(NewCategory { title })
            .await
            .map_err(|e| internal("failed to create category", e))
    }

    pub async fn get(&self, id: i64) -> Result<Category, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| internal("failed to get category", e))?
            .ok_or_else(|| DomainError::not_found("category", id))
    }

    pub async fn list(&self, params: ListCategoriesParams) -> Result<Page<Category>, DomainError> {
        let filter = CategoryFilter {
            search: non_empty(params.search),
        };

        self.repo
            .list(&filter, Pagination::new(params.page, params.limit))
            .await
            .map_err(|e| internal("failed to get all categories", e))
    }

    pub async fn update(&self, id: i64, title: String) -> Result<Category, DomainError> {
        require_text("title", &title)?;

        match self.repo.update(id, title).await {
            Ok(category) => Ok(category),
            Err(RepoError::NotFound) => Err(DomainError::not_found("category", id)),
            Err(e) => Err(internal("failed to update category", e)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::not_found("category", id)),
            Err(e) => Err(internal("failed to delete category", e)),
        }
    }
}
