//! HTTP server configuration object and helpers.

use chrono::Duration;
use shop_backend::outbound::persistence::DbPool;
use shop_backend::settings::{MailSettings, Settings, TokenSettings};
use std::net::SocketAddr;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token: TokenSettings,
    pub(crate) mail: MailSettings,
    pub(crate) reset_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings.
    ///
    /// The database URL is not consumed here; attach a pool with
    /// [`ServerConfig::with_db_pool`] once it has been opened.
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        let Settings {
            bind_addr,
            database_url: _,
            token,
            mail,
            reset_ttl,
        } = settings;
        Self {
            bind_addr,
            token,
            mail,
            reset_ttl,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one, users, reset grants, and categories live in memory for
    /// the lifetime of the process.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
