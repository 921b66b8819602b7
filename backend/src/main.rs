//! Backend entry-point: loads settings, opens persistence, and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use shop_backend::inbound::http::health::HealthState;
use shop_backend::outbound::persistence::{DbPool, PoolConfig};
use shop_backend::settings::{BuildMode, settings_from_env};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|err| std::io::Error::other(format!("invalid configuration: {err}")))?;
    let database_url = settings.database_url.clone();
    let bind_addr = settings.bind_addr;

    let config = ServerConfig::from_settings(settings);
    let config = match database_url {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| std::io::Error::other(format!("database pool: {err}")))?;
            config.with_db_pool(pool)
        }
        None => config,
    };
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
