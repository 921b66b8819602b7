//! Driving port for account lifecycle commands.
use async_trait::async_trait;

use crate::domain::{Error, RegistrationDetails, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account. Fails with `conflict` when the email is taken.
    async fn register(&self, details: RegistrationDetails) -> Result<User, Error>;

    /// Delete an account. Fails with `not_found` when the id is unknown.
    async fn remove_user(&self, id: UserId) -> Result<(), Error>;
}
