//! Driven port for category persistence.
//!
//! Identifiers are owned by the adapter. Implementations must hand out
//! strictly increasing ids and never reuse one after deletion.

use async_trait::async_trait;

use crate::domain::{Category, CategoryDraft, CategoryId, CategoryName, CategoryPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by category repository adapters.
    pub enum CategoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution or row conversion.
        Query { message: String } => "category repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Every category ordered by id.
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError>;

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryPersistenceError>;

    /// First category carrying exactly this name, by id order.
    async fn find_by_name(
        &self,
        name: &CategoryName,
    ) -> Result<Option<Category>, CategoryPersistenceError>;

    async fn insert(&self, draft: &CategoryDraft) -> Result<Category, CategoryPersistenceError>;

    /// Apply `patch`; `None` when the id is unknown.
    async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryPersistenceError>;

    /// Remove the category. Returns `false` when nothing matched.
    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryPersistenceError>;
}
