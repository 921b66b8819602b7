//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (users,
//!   categories, health)
//! - **Schemas**: request and response bodies plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that keep domain types free of
//!   utoipa derives
//! - **Security**: bearer token scheme used by `GET /whoami`
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::categories::{
    CategoryDto, CategoryListResponse, CategoryResponse, CreateCategoryRequest,
    UpdateCategoryRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageResponse};
use crate::inbound::http::users::{
    LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest, WhoAmIResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shop backend API",
        description = "HTTP interface for user accounts, the category registry, and health probes.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::retrieve_password,
        crate::inbound::http::users::reset_password,
        crate::inbound::http::users::remove_user,
        crate::inbound::http::users::whoami,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::replace_category,
        crate::inbound::http::categories::patch_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::health::welcome,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        ResetPasswordRequest,
        WhoAmIResponse,
        CategoryDto,
        CategoryListResponse,
        CategoryResponse,
        CreateCategoryRequest,
        UpdateCategoryRequest,
    )),
    tags(
        (name = "users", description = "Account registration, login, and recovery"),
        (name = "categories", description = "Category registry"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
