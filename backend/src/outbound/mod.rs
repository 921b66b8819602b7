//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for tests and database-less runs
//! - **security**: Argon2 password hashing and JWT bearer tokens
//! - **mail**: reset-token delivery over an HTTP relay, or log-only
//!
//! Adapters translate between domain types and infrastructure
//! representations. They hold no business rules.

pub mod mail;
pub mod memory;
pub mod persistence;
pub mod security;
