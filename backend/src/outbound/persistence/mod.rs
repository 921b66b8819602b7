//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between Diesel rows and domain types. Row
//! structs (`models`) and table definitions (`schema`) stay private to this
//! module; every database failure is mapped onto the port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use shop_backend::outbound::persistence::{DbPool, DieselCategoryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shop")).await?;
//! let repo = DieselCategoryRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_category_repository;
mod diesel_password_reset_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_password_reset_repository::DieselPasswordResetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, revert_all_migrations, run_pending_migrations,
};
pub use pool::{DbPool, PoolConfig, PoolError};
