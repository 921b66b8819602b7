//! In-memory application wiring shared by the HTTP integration suites.

use std::sync::{Arc, Mutex};

use actix_web::dev::ServiceResponse;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use argon2::Params;
use async_trait::async_trait;
use mockable::DefaultClock;

use shop_backend::Trace;
use shop_backend::domain::ports::{Mailer, MailerError, OutboundEmail};
use shop_backend::domain::{AccountsPorts, AccountsService, CategoryRegistryService};
use shop_backend::inbound::http::configure;
use shop_backend::inbound::http::state::HttpState;
use shop_backend::outbound::memory::{InMemoryAccountStore, InMemoryCategoryRepository};
use shop_backend::outbound::security::{Argon2CredentialHasher, JwtTokenIssuer};

/// Records outgoing mail instead of delivering it.
#[derive(Default)]
pub struct CapturingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

impl CapturingMailer {
    /// Token from the first line of the latest reset email.
    pub fn last_token(&self) -> String {
        let sent = self.sent.lock().expect("mailer lock");
        let body = &sent.last().expect("a reset email").body;
        body.lines()
            .next()
            .and_then(|line| line.rsplit(": ").next())
            .expect("token line")
            .to_owned()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<(), MailerError> {
        self.sent
            .lock()
            .map_err(|_| MailerError::transport("mailer lock poisoned"))?
            .push(message.clone());
        Ok(())
    }
}

/// HTTP state over in-memory stores, cheap Argon2 parameters and a fixed
/// signing key.
pub fn memory_state(mailer: Arc<CapturingMailer>) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryAccountStore::new());
    let clock = Arc::new(DefaultClock);
    let cheap = Params::new(8, 1, 1, None).expect("argon2 params");
    let accounts = Arc::new(AccountsService::new(
        AccountsPorts {
            users: store.clone(),
            resets: store,
            hasher: Arc::new(Argon2CredentialHasher::with_params(cheap)),
            tokens: Arc::new(JwtTokenIssuer::new(
                &[7_u8; 32],
                chrono::Duration::minutes(15),
                clock.clone(),
            )),
            mailer,
        },
        clock,
        chrono::Duration::hours(1),
    ));
    let categories = Arc::new(CategoryRegistryService::new(Arc::new(
        InMemoryCategoryRepository::new(),
    )));
    web::Data::new(HttpState::new(
        accounts.clone(),
        accounts.clone(),
        accounts,
        categories,
    ))
}

/// Run one request through the full route table behind `Trace`.
pub async fn call(state: &web::Data<HttpState>, req: TestRequest) -> ServiceResponse {
    let app = test::init_service(
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}
