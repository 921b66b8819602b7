//! Categories held in memory.
//!
//! A high-water mark survives deletions so ids are never handed out twice.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryDraft, CategoryId, CategoryName, CategoryPatch};

#[derive(Default)]
struct CategoryState {
    high_water: i32,
    rows: BTreeMap<CategoryId, Category>,
}

/// In-memory implementation of [`CategoryRepository`].
#[derive(Default)]
pub struct InMemoryCategoryRepository {
    state: Mutex<CategoryState>,
}

impl InMemoryCategoryRepository {
    /// Create an empty store whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CategoryState>, CategoryPersistenceError> {
        self.state
            .lock()
            .map_err(|_| CategoryPersistenceError::query("category store lock poisoned"))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryPersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &CategoryName,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|category| category.name() == name)
            .cloned())
    }

    async fn insert(&self, draft: &CategoryDraft) -> Result<Category, CategoryPersistenceError> {
        let mut state = self.lock()?;
        let next = state
            .high_water
            .checked_add(1)
            .ok_or_else(|| CategoryPersistenceError::query("category id space exhausted"))?;
        let id = CategoryId::new(next)
            .map_err(|err| CategoryPersistenceError::query(err.to_string()))?;
        state.high_water = next;

        let category = Category::new(id, draft.name.clone(), draft.item_range);
        state.rows.insert(id, category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let mut state = self.lock()?;
        let Some(current) = state.rows.remove(&id) else {
            return Ok(None);
        };
        let updated = current.patched(patch);
        state.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryPersistenceError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}
