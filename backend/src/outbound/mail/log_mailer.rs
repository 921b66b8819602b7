//! Mailer that only logs delivery metadata.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{Mailer, MailerError, OutboundEmail};

/// Development mailer. Bodies may hold reset tokens and are never logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "mail relay not configured; message dropped"
        );
        Ok(())
    }
}
