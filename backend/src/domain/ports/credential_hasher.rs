//! Driven port for password hashing.
use async_trait::async_trait;

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Failures raised by hashing adapters.
    pub enum CredentialHashError {
        /// The hashing primitive failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored digest could not be parsed.
        MalformedDigest { message: String } => "stored password digest is malformed: {message}",
    }
}

/// Salted password hashing.
///
/// Methods are async because adapters move the CPU-heavy work off the
/// request executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialHashError>;

    /// `Ok(false)` on mismatch; errors are reserved for unusable digests.
    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHashError>;
}
