//! In-process adapters used when no database is configured, and by tests.
//!
//! State lives behind a `std::sync::Mutex`; no lock is held across an
//! `.await`. A poisoned lock is reported as a query failure instead of
//! panicking the request.

mod account_store;
mod category_store;

pub use account_store::InMemoryAccountStore;
pub use category_store::InMemoryCategoryRepository;
