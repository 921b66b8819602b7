//! Category registry domain service.
//!
//! Thin orchestration over [`CategoryRepository`]: maps persistence failures
//! to domain errors, turns absent rows into `not_found`, and keeps deletion
//! idempotent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CategoryPersistenceError, CategoryRegistry, CategoryRepository, SeedOutcome,
};
use crate::domain::{Category, CategoryDraft, CategoryId, CategoryPatch, Error};

/// Category service implementing the [`CategoryRegistry`] driving port.
#[derive(Clone)]
pub struct CategoryRegistryService<R> {
    repository: Arc<R>,
}

impl<R> CategoryRegistryService<R> {
    /// Build the service over a category repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CategoryRegistryService<R>
where
    R: CategoryRepository,
{
    fn map_repository_error(error: CategoryPersistenceError) -> Error {
        match error {
            CategoryPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("category repository unavailable: {message}"))
            }
            CategoryPersistenceError::Query { message } => {
                Error::internal(format!("category repository error: {message}"))
            }
        }
    }

    fn not_found(id: CategoryId) -> Error {
        Error::not_found(format!("category {id} not found"))
    }
}

#[async_trait]
impl<R> CategoryRegistry for CategoryRegistryService<R>
where
    R: CategoryRepository,
{
    async fn list(&self) -> Result<Vec<Category>, Error> {
        self.repository
            .list()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, id: CategoryId) -> Result<Category, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: CategoryDraft) -> Result<Category, Error> {
        let category = self
            .repository
            .insert(&draft)
            .await
            .map_err(Self::map_repository_error)?;
        info!(category_id = %category.id(), "category created");
        Ok(category)
    }

    async fn update(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category, Error> {
        self.repository
            .update(id, &patch)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn delete(&self, id: CategoryId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if removed {
            info!(category_id = %id, "category deleted");
        } else {
            debug!(category_id = %id, "category delete matched nothing");
        }
        Ok(())
    }

    async fn seed(&self, draft: CategoryDraft) -> Result<SeedOutcome, Error> {
        let existing = self
            .repository
            .find_by_name(&draft.name)
            .await
            .map_err(Self::map_repository_error)?;
        if let Some(category) = existing {
            return Ok(SeedOutcome::AlreadyPresent(category));
        }
        self.create(draft).await.map(SeedOutcome::Created)
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour over a mocked repository.
    use super::*;
    use crate::domain::ports::MockCategoryRepository;
    use crate::domain::{CategoryName, ErrorCode, ItemRange};
    use rstest::rstest;

    fn category(id: i32, name: &str, item_range: i32) -> Category {
        Category::new(
            CategoryId::new(id).expect("id"),
            CategoryName::new(name).expect("name"),
            ItemRange::new(item_range).expect("range"),
        )
    }

    fn draft(name: &str, item_range: i32) -> CategoryDraft {
        CategoryDraft {
            name: CategoryName::new(name).expect("name"),
            item_range: ItemRange::new(item_range).expect("range"),
        }
    }

    fn id(raw: i32) -> CategoryId {
        CategoryId::new(raw).expect("id")
    }

    fn make_service(repo: MockCategoryRepository) -> CategoryRegistryService<MockCategoryRepository> {
        CategoryRegistryService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn get_missing_category_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let err = make_service(repo).get(id(999)).await.expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn update_missing_category_is_not_found() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_update().times(1).return_once(|_, _| Ok(None));
        let patch = CategoryPatch::new(None, Some(ItemRange::new(1).expect("range")))
            .expect("patch");

        let err = make_service(repo)
            .update(id(3), patch)
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn delete_is_idempotent(#[case] existed: bool) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_delete().times(1).return_once(move |_| Ok(existed));

        make_service(repo)
            .delete(id(1))
            .await
            .expect("delete always succeeds");
    }

    #[rstest]
    #[case(CategoryPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(CategoryPersistenceError::query("bad row"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn list_maps_repository_failures(
        #[case] failure: CategoryPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_list().return_once(move || Err(failure));

        let err = make_service(repo).list().await.expect_err("failure");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn seed_skips_existing_name() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name()
            .return_once(|_| Ok(Some(category(1, "Shop", 24))));
        repo.expect_insert().never();

        let outcome = make_service(repo)
            .seed(draft("Shop", 24))
            .await
            .expect("seed");
        assert_eq!(outcome, SeedOutcome::AlreadyPresent(category(1, "Shop", 24)));
    }

    #[tokio::test]
    async fn seed_creates_when_absent() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name().return_once(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .return_once(|draft| Ok(Category::new(id(5), draft.name.clone(), draft.item_range)));

        let outcome = make_service(repo)
            .seed(draft("Shop", 24))
            .await
            .expect("seed");
        assert_eq!(outcome, SeedOutcome::Created(category(5, "Shop", 24)));
    }
}
