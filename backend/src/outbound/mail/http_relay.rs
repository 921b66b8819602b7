//! Reqwest-backed mail relay adapter.
//!
//! Owns transport details only: JSON serialisation, timeout, and mapping
//! of HTTP failures onto [`MailerError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::domain::ports::{Mailer, MailerError, OutboundEmail};

const USER_AGENT: &str = concat!("shop-backend/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mailer that POSTs each message to a relay endpoint.
pub struct HttpRelayMailer {
    client: Client,
    endpoint: Url,
    sender: String,
}

impl HttpRelayMailer {
    /// Build a mailer whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            sender: sender.into(),
        })
    }

    fn payload<'a>(&'a self, message: &'a OutboundEmail) -> RelayMessage<'a> {
        RelayMessage {
            from: self.sender.as_str(),
            to: message.to.as_ref(),
            subject: message.subject.as_str(),
            text: message.body.as_str(),
        }
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&self.payload(message))
            .send()
            .await
            .map_err(|err| MailerError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailerError::rejected(status.as_u16()));
        }
        Ok(())
    }
}
