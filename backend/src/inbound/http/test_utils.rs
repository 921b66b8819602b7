//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::{App, test as actix_test, web};

use crate::domain::ports::{
    MockAccountsCommand, MockCategoryRegistry, MockLoginService, MockPasswordRecovery,
};
use crate::inbound::http::state::HttpState;

/// Port doubles for handler tests. Unconfigured mocks panic when called,
/// so each test only sets expectations for the port it exercises.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountsCommand,
    pub login: MockLoginService,
    pub recovery: MockPasswordRecovery,
    pub categories: MockCategoryRegistry,
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(self.accounts),
            Arc::new(self.login),
            Arc::new(self.recovery),
            Arc::new(self.categories),
        ))
    }
}

/// Run one request against the full route table backed by `ports`.
pub async fn call(ports: MockPorts, request: actix_test::TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(ports.into_state())
            .configure(super::configure),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}
