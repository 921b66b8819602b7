//! Behaviour tests for the account lifecycle.
//!
//! Scenarios drive registration, login, bearer identity, password reset and
//! removal through the full route table over in-memory adapters.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared wiring exposes mail inspection this suite does not use.
#[allow(dead_code)]
#[path = "support/app.rs"]
mod app;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::test::{self, TestRequest};
use actix_web::web;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use shop_backend::domain::TRACE_ID_HEADER;
use shop_backend::inbound::http::state::HttpState;

use app::{CapturingMailer, call, memory_state};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "correct horse";
const NEW_PASSWORD: &str = "new secret";

struct AccountWorld {
    runtime: Runtime,
    local: LocalSet,
    state: web::Data<HttpState>,
    mailer: Arc<CapturingMailer>,
    access_token: Option<String>,
    reset_token: Option<String>,
    last_status: Option<u16>,
    last_trace_id: Option<String>,
    last_body: Option<Value>,
}

type SharedWorld = Rc<RefCell<AccountWorld>>;

struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

#[fixture]
fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let mailer = Arc::new(CapturingMailer::default());
    let state = memory_state(mailer.clone());
    WorldFixture {
        world: Rc::new(RefCell::new(AccountWorld {
            runtime,
            local: LocalSet::new(),
            state,
            mailer,
            access_token: None,
            reset_token: None,
            last_status: None,
            last_trace_id: None,
            last_body: None,
        })),
    }
}

/// Send `req` and record status, trace header and JSON body.
fn perform(world: &SharedWorld, req: TestRequest) -> (u16, Value) {
    let (status, trace_id, body) = {
        let ctx = world.borrow();
        let state = ctx.state.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            let response = call(&state, req).await;
            let status = response.status().as_u16();
            let trace_id = response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(ToOwned::to_owned);
            let bytes = test::read_body(response).await;
            let body: Value = serde_json::from_slice(&bytes).expect("json body");
            (status, trace_id, body)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body.clone());
    (status, body)
}

fn log_in(world: &SharedWorld, password: &str) {
    let req = TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": EMAIL, "password": password }));
    let (status, body) = perform(world, req);
    if status == 200 {
        let token = body["access_token"].as_str().map(ToOwned::to_owned);
        world.borrow_mut().access_token = token;
    }
}

fn redeem(world: &SharedWorld) -> u16 {
    let token = world.borrow().reset_token.clone().expect("reset token");
    let req = TestRequest::post()
        .uri("/reset_password")
        .set_json(json!({ "token": token, "new_password": NEW_PASSWORD }));
    perform(world, req).0
}

#[given("a shop with a registered account")]
fn a_shop_with_a_registered_account(world: &WorldFixture) {
    let req = TestRequest::post().uri("/register").set_json(json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": EMAIL,
        "password": PASSWORD,
    }));
    let (status, _) = perform(&world.world(), req);
    assert_eq!(status, 201);
}

#[when("the holder logs in with the right password")]
fn the_holder_logs_in_with_the_right_password(world: &WorldFixture) {
    log_in(&world.world(), PASSWORD);
}

#[when("the holder logs in with a wrong password")]
fn the_holder_logs_in_with_a_wrong_password(world: &WorldFixture) {
    log_in(&world.world(), "not the password");
}

#[when("the holder asks who they are")]
fn the_holder_asks_who_they_are(world: &WorldFixture) {
    let world = world.world();
    let token = world.borrow().access_token.clone().expect("access token");
    let req = TestRequest::get()
        .uri("/whoami")
        .insert_header(("Authorization", format!("Bearer {token}")));
    perform(&world, req);
}

#[when("the holder requests a password reset")]
fn the_holder_requests_a_password_reset(world: &WorldFixture) {
    let world = world.world();
    let req = TestRequest::get().uri(&format!("/retrieve_password/{EMAIL}"));
    let (status, _) = perform(&world, req);
    assert_eq!(status, 200);
    let token = world.borrow().mailer.last_token();
    world.borrow_mut().reset_token = Some(token);
}

#[when("the holder redeems the mailed token")]
fn the_holder_redeems_the_mailed_token(world: &WorldFixture) {
    assert_eq!(redeem(&world.world()), 200);
}

#[when("the account is removed")]
fn the_account_is_removed(world: &WorldFixture) {
    let (status, _) = perform(&world.world(), TestRequest::delete().uri("/remove_user/1"));
    assert_eq!(status, 200);
}

#[then("the response names the holder")]
fn the_response_names_the_holder(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(200));
    let body = ctx.last_body.as_ref().expect("whoami body");
    assert_eq!(body.get("email").and_then(Value::as_str), Some(EMAIL));
}

#[then("the response is unauthorised with a trace id")]
fn the_response_is_unauthorised_with_a_trace_id(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(401));
    let trace_id = ctx.last_trace_id.as_deref().expect("trace id header");
    let body = ctx.last_body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Wrong email or password")
    );
}

#[then("the holder can log in with the new password")]
fn the_holder_can_log_in_with_the_new_password(world: &WorldFixture) {
    let world = world.world();
    log_in(&world, PASSWORD);
    assert_eq!(world.borrow().last_status, Some(401));
    log_in(&world, NEW_PASSWORD);
    assert_eq!(world.borrow().last_status, Some(200));
}

#[then("the mailed token is spent")]
fn the_mailed_token_is_spent(world: &WorldFixture) {
    assert_eq!(redeem(&world.world()), 400);
}

#[scenario(path = "tests/features/account_flows.feature", index = 0)]
fn registered_holder_is_identified_by_token(world: WorldFixture) {
    drop(world);
}

#[scenario(path = "tests/features/account_flows.feature", index = 1)]
fn wrong_password_is_refused_with_trace_id(world: WorldFixture) {
    drop(world);
}

#[scenario(path = "tests/features/account_flows.feature", index = 2)]
fn mailed_reset_token_sets_password_once(world: WorldFixture) {
    drop(world);
}

#[scenario(path = "tests/features/account_flows.feature", index = 3)]
fn removed_account_cannot_log_in(world: WorldFixture) {
    drop(world);
}
