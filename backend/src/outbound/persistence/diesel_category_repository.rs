//! PostgreSQL-backed `CategoryRepository`.
//!
//! Ids come from the `categories.id` identity column, so the database owns
//! the monotonic sequence and deleted ids are never reissued.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{
    Category, CategoryDraft, CategoryId, CategoryName, CategoryPatch, CategoryValidationError,
    ItemRange,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CategoryChangeset, CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;

/// Diesel-backed implementation of the [`CategoryRepository`] port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Build a repository over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryPersistenceError {
    map_basic_pool_error(error, |message| CategoryPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryPersistenceError {
    map_basic_diesel_error(
        error,
        |message| CategoryPersistenceError::query(message),
        |message| CategoryPersistenceError::connection(message),
    )
}

fn row_to_category(row: CategoryRow) -> Result<Category, CategoryPersistenceError> {
    let invalid = |err: CategoryValidationError| {
        CategoryPersistenceError::query(format!("stored category {} is invalid: {err}", row.id))
    };
    Ok(Category::new(
        CategoryId::new(row.id).map_err(invalid)?,
        CategoryName::new(row.name.as_str()).map_err(invalid)?,
        ItemRange::new(row.item_range).map_err(invalid)?,
    ))
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_category).collect()
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn find_by_name(
        &self,
        name: &CategoryName,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CategoryRow> = categories::table
            .filter(categories::name.eq(name.as_ref()))
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn insert(&self, draft: &CategoryDraft) -> Result<Category, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCategoryRow {
            name: draft.name.as_ref(),
            item_range: draft.item_range.get(),
        };

        let inserted: CategoryRow = diesel::insert_into(categories::table)
            .values(&row)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_category(inserted)
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CategoryChangeset {
            name: patch.name().map(|name| name.as_ref()),
            item_range: patch.item_range().map(ItemRange::get),
            updated_at: Utc::now(),
        };

        let row: Option<CategoryRow> = diesel::update(categories::table.find(id.get()))
            .set(&changes)
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_category).transpose()
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(categories::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
