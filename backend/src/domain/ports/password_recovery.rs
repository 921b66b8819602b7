//! Driving port for the reset-token password recovery flow.
use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, Password, ResetToken};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordRecovery: Send + Sync {
    /// Issue a reset token for the account and mail it.
    ///
    /// Unknown emails fail with `unauthorized`. Mail delivery failures are
    /// logged and do not fail the request.
    async fn request_reset(&self, email: &EmailAddress) -> Result<(), Error>;

    /// Redeem a reset token and set a new password.
    async fn complete_reset(&self, token: &ResetToken, new_password: &Password)
    -> Result<(), Error>;
}
