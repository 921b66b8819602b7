//! Driven port for outstanding password reset grants.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PasswordDigest, PasswordResetGrant, ResetTokenDigest, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reset grant adapters.
    pub enum PasswordResetPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "reset repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reset repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Persist a new grant, replacing any earlier grant for the same user.
    async fn store(&self, grant: &PasswordResetGrant) -> Result<(), PasswordResetPersistenceError>;

    /// Consume the grant for `digest` and, if it is still live at `now`,
    /// replace the owner's password hash.
    ///
    /// Both effects happen atomically. The grant is removed whether or not
    /// it had expired, so a token can never be redeemed twice. Returns the
    /// owner when the password changed.
    async fn redeem(
        &self,
        digest: &ResetTokenDigest,
        new_hash: &PasswordDigest,
        now: DateTime<Utc>,
    ) -> Result<Option<UserId>, PasswordResetPersistenceError>;
}
