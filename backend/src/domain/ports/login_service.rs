//! Driving port for login and bearer-token identity.
//!
//! Inbound adapters call it to authenticate credentials without knowing
//! the backing infrastructure, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AccessToken, EmailAddress, Error, LoginCredentials};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a token bound to the account email.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;

    /// Resolve a presented bearer token to the email it was issued for.
    async fn identify(&self, token: &str) -> Result<EmailAddress, Error>;
}
