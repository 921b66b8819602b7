//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters, plus the services that implement the driving ports. Nothing in
//! here imports actix, Diesel, or any other transport or storage crate.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, EmailAddress, PersonName: account holder identity.
//! - LoginCredentials, RegistrationDetails, Password: validated auth input.
//! - Category, CategoryDraft, CategoryPatch: category registry records.
//! - ResetToken, PasswordResetGrant: reset-token recovery flow.
//! - AccountsService, CategoryRegistryService: driving port implementations.

pub mod accounts_service;
pub mod auth;
pub mod category;
pub mod category_registry_service;
pub mod error;
pub mod password_reset;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::accounts_service::{
    AccountsPorts, AccountsService, EMAIL_TAKEN_MESSAGE, UNKNOWN_EMAIL_MESSAGE,
    WRONG_CREDENTIALS_MESSAGE,
};
pub use self::auth::{
    AccessToken, AuthValidationError, LoginCredentials, Password, PasswordDigest,
    RegistrationDetails,
};
pub use self::category::{
    Category, CategoryDraft, CategoryId, CategoryName, CategoryPatch, CategoryValidationError,
    ItemRange,
};
pub use self::category_registry_service::CategoryRegistryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password_reset::{PasswordResetGrant, ResetToken, ResetTokenDigest};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, PersonName, StoredCredentials, User, UserId, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use shop_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
