//! Builders for HTTP state ports and the adapters behind them.

use std::sync::Arc;

use actix_web::web;
use chrono::Duration;
use mockable::Clock;
use tracing::warn;

use shop_backend::domain::ports::{
    CategoryRegistry, Mailer, PasswordResetRepository, UserRepository,
};
use shop_backend::domain::{AccountsPorts, AccountsService, CategoryRegistryService};
use shop_backend::inbound::http::state::HttpState;
use shop_backend::outbound::mail::{HttpRelayMailer, LogMailer};
use shop_backend::outbound::memory::{InMemoryAccountStore, InMemoryCategoryRepository};
use shop_backend::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselPasswordResetRepository, DieselUserRepository,
};
use shop_backend::outbound::security::{Argon2CredentialHasher, JwtTokenIssuer};
use shop_backend::settings::{MailSettings, TokenSettings};

use super::ServerConfig;

/// Storage-backed ports selected for one process.
struct Stores {
    users: Arc<dyn UserRepository>,
    resets: Arc<dyn PasswordResetRepository>,
    categories: Arc<dyn CategoryRegistry>,
}

/// Use `make_stores` when a pool is available, otherwise in-memory stores.
fn build_stores_with_pool<Pool>(
    pool: &Option<Pool>,
    make_stores: impl FnOnce(&Pool) -> Stores,
) -> Stores {
    match pool {
        Some(pool) => make_stores(pool),
        None => {
            warn!("DATABASE_URL unset; accounts and categories are kept in memory");
            let accounts = Arc::new(InMemoryAccountStore::new());
            Stores {
                users: accounts.clone(),
                resets: accounts,
                categories: Arc::new(CategoryRegistryService::new(Arc::new(
                    InMemoryCategoryRepository::new(),
                ))),
            }
        }
    }
}

fn diesel_stores(pool: &DbPool) -> Stores {
    Stores {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        resets: Arc::new(DieselPasswordResetRepository::new(pool.clone())),
        categories: Arc::new(CategoryRegistryService::new(Arc::new(
            DieselCategoryRepository::new(pool.clone()),
        ))),
    }
}

/// Choose the reset-mail transport.
///
/// # Errors
/// Returns [`std::io::Error`] when the relay HTTP client cannot be built.
fn build_mailer(mail: &MailSettings) -> std::io::Result<Arc<dyn Mailer>> {
    match &mail.relay_url {
        Some(endpoint) => {
            let mailer = HttpRelayMailer::new(endpoint.clone(), mail.sender.clone(), mail.timeout)
                .map_err(|err| std::io::Error::other(format!("mail relay client: {err}")))?;
            Ok(Arc::new(mailer))
        }
        None => {
            warn!("MAIL_RELAY_URL unset; reset mail is logged instead of delivered");
            Ok(Arc::new(LogMailer))
        }
    }
}

fn build_accounts(
    stores: &Stores,
    token: &TokenSettings,
    mailer: Arc<dyn Mailer>,
    reset_ttl: Duration,
    clock: Arc<dyn Clock>,
) -> Arc<AccountsService> {
    let ports = AccountsPorts {
        users: stores.users.clone(),
        resets: stores.resets.clone(),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        tokens: Arc::new(JwtTokenIssuer::new(
            &token.signing_key,
            token.ttl,
            clock.clone(),
        )),
        mailer,
    };
    Arc::new(AccountsService::new(ports, clock, reset_ttl))
}

/// Build the shared HTTP state from configured adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when an outbound adapter cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let stores = build_stores_with_pool(&config.db_pool, diesel_stores);
    let mailer = build_mailer(&config.mail)?;
    let clock: Arc<dyn Clock> = Arc::new(mockable::DefaultClock);
    let accounts = build_accounts(&stores, &config.token, mailer, config.reset_ttl, clock);

    Ok(web::Data::new(HttpState::new(
        accounts.clone(),
        accounts.clone(),
        accounts,
        stores.categories,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shop_backend::domain::{CategoryDraft, CategoryName, ItemRange};

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft {
            name: CategoryName::new(name).expect("name"),
            item_range: ItemRange::new(24).expect("range"),
        }
    }

    fn stub_stores(_: &()) -> Stores {
        let accounts = Arc::new(InMemoryAccountStore::new());
        let repo = InMemoryCategoryRepository::new();
        Stores {
            users: accounts.clone(),
            resets: accounts,
            categories: Arc::new(CategoryRegistryService::new(Arc::new(repo))),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn pool_present_uses_the_supplied_builder() {
        let mut called = false;
        let stores = build_stores_with_pool(&Some(()), |pool| {
            called = true;
            stub_stores(pool)
        });

        assert!(called);
        assert!(stores.categories.list().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn pool_absent_falls_back_to_memory() {
        let stores = build_stores_with_pool::<()>(&None, |_| panic!("no pool was configured"));

        let created = stores.categories.create(draft("Shop")).await.expect("create");
        let listed = stores.categories.list().await.expect("list");
        assert_eq!(listed, vec![created]);
    }

    #[rstest]
    fn missing_relay_selects_log_mailer() {
        let mail = MailSettings {
            relay_url: None,
            sender: "shop@mail.com".to_owned(),
            timeout: std::time::Duration::from_secs(1),
        };
        assert!(build_mailer(&mail).is_ok());
    }
}
