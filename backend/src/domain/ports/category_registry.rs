//! Driving port for the category registry use-cases.
use async_trait::async_trait;

use crate::domain::{Category, CategoryDraft, CategoryId, CategoryPatch, Error};

/// Result of a seed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(Category),
    AlreadyPresent(Category),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRegistry: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, Error>;

    /// Fails with `not_found` for unknown ids.
    async fn get(&self, id: CategoryId) -> Result<Category, Error>;

    async fn create(&self, draft: CategoryDraft) -> Result<Category, Error>;

    /// Fails with `not_found` for unknown ids.
    async fn update(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category, Error>;

    /// Idempotent: deleting an unknown id succeeds.
    async fn delete(&self, id: CategoryId) -> Result<(), Error>;

    /// Create `draft` unless a category with the same name exists.
    async fn seed(&self, draft: CategoryDraft) -> Result<SeedOutcome, Error>;
}
