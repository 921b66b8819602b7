//! Mail transport adapters.
//!
//! `HttpRelayMailer` posts messages to a JSON relay endpoint. Without a
//! relay configured, `LogMailer` records that a message would have been
//! sent without logging its body.

mod http_relay;
mod log_mailer;

pub use http_relay::HttpRelayMailer;
pub use log_mailer::LogMailer;
