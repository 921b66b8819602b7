//! Driven port for signing and checking bearer tokens.
use crate::domain::{AccessToken, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// Signing failed.
        Encoding { message: String } => "token encoding failed: {message}",
        /// Signature, structure, or subject did not check out.
        Invalid { message: String } => "token rejected: {message}",
        /// The token was valid but is past its expiry.
        Expired => "token expired",
    }
}

/// Stateless bearer tokens bound to an email identity.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, subject: &EmailAddress) -> Result<AccessToken, TokenError>;

    /// Return the subject the token was issued for.
    fn verify(&self, token: &str) -> Result<EmailAddress, TokenError>;
}
