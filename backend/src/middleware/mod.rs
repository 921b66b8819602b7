//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns.

pub mod trace;

pub use trace::Trace;
