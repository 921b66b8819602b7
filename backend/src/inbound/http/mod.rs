//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod categories;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every account and category route plus the extractor configs
/// that turn malformed bodies into the shared error envelope.
///
/// Health probes are registered separately so they stay outside any
/// middleware that touches the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::form_config())
        .service(health::welcome)
        .service(users::register)
        .service(users::login)
        .service(users::retrieve_password)
        .service(users::reset_password)
        .service(users::remove_user)
        .service(users::whoami)
        .service(categories::list_categories)
        .service(categories::get_category)
        .service(categories::create_category)
        .service(categories::replace_category)
        .service(categories::patch_category)
        .service(categories::delete_category);
}
