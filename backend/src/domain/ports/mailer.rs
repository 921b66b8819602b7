//! Driven port for out-of-band mail delivery.
use async_trait::async_trait;

use crate::domain::EmailAddress;

use super::define_port_error;

define_port_error! {
    /// Delivery failures raised by mail adapters.
    pub enum MailerError {
        /// The relay could not be reached or timed out.
        Transport { message: String } => "mail transport failed: {message}",
        /// The relay answered with a non-success status.
        Rejected { status: u16 } => "mail relay rejected message with status {status}",
    }
}

/// Plain-text message handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError>;
}
