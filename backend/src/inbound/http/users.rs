//! Account API handlers.
//!
//! ```text
//! POST /register {"first_name":"Ada","last_name":"Lovelace","email":"ada@example.com","password":"pw"}
//! POST /login {"email":"ada@example.com","password":"pw"}
//! GET /retrieve_password/ada@example.com
//! POST /reset_password {"token":"<hex>","new_password":"pw2"}
//! DELETE /remove_user/1
//! GET /whoami  (Authorization: Bearer <token>)
//! ```
//!
//! `register` and `login` accept JSON or URL-encoded form bodies.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AuthValidationError, EmailAddress, Error, LoginCredentials, Password, RegistrationDetails,
    ResetToken, UNKNOWN_EMAIL_MESSAGE, UserId, WRONG_CREDENTIALS_MESSAGE,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, auth_field_error, auth_validation_error, invalid_token_error, parse_identifier,
    require, user_validation_error,
};

const FIRST_NAME: FieldName = FieldName::new("first_name");
const LAST_NAME: FieldName = FieldName::new("last_name");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const TOKEN: FieldName = FieldName::new("token");
const NEW_PASSWORD: FieldName = FieldName::new("new_password");
const USER_ID: FieldName = FieldName::new("id");

/// Either a JSON or a URL-encoded form body.
pub type JsonOrForm<T> = web::Either<web::Json<T>, web::Form<T>>;

fn body<T>(payload: JsonOrForm<T>) -> T {
    match payload {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    }
}

/// Registration request body for `POST /register`.
///
/// Fields are optional at the transport level so a missing field is
/// reported by name rather than as a generic decode failure.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for RegistrationDetails {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let first_name = require(value.first_name, FIRST_NAME)?;
        let last_name = require(value.last_name, LAST_NAME)?;
        let email = require(value.email, EMAIL)?;
        let password = require(value.password, PASSWORD)?;
        Self::try_from_parts(&first_name, &last_name, &email, &password)
            .map_err(auth_validation_error)
    }
}

/// Login request body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let email = require(value.email, EMAIL)?;
        let password = require(value.password, PASSWORD)?;
        Self::try_from_parts(&email, &password).map_err(login_validation_error)
    }
}

/// A malformed email cannot match a stored account, so it fails like any
/// other credential mismatch.
fn login_validation_error(err: AuthValidationError) -> Error {
    match err {
        AuthValidationError::Field { field: "email", .. } => {
            Error::unauthorized(WRONG_CREDENTIALS_MESSAGE)
        }
        other => auth_validation_error(other),
    }
}

/// Successful login payload.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login succeeded!")]
    pub message: String,
    /// HS256 JWT to send as `Authorization: Bearer <token>`.
    pub access_token: String,
}

/// Reset completion body for `POST /reset_password`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ResetPasswordRequest {
    /// Token delivered by the reset email.
    pub token: Option<String>,
    pub new_password: Option<String>,
}

/// Identity resolved from a bearer token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct WhoAmIResponse {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterRequest, content_type = "application/json"),
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: JsonOrForm<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let details = RegistrationDetails::try_from(body(payload))?;
    state.accounts.register(details).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User created successfully.")))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 401, description = "Wrong email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: JsonOrForm<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(body(payload))?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: "Login succeeded!".to_owned(),
        access_token: token.into(),
    }))
}

/// Start password recovery by mailing a single-use reset token.
#[utoipa::path(
    get,
    path = "/retrieve_password/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Reset token sent", body = MessageResponse),
        (status = 401, description = "No such email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "retrievePassword"
)]
#[get("/retrieve_password/{email}")]
pub async fn retrieve_password(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let email = EmailAddress::new(path.into_inner())
        .map_err(|_| Error::unauthorized(UNKNOWN_EMAIL_MESSAGE))?;
    state.recovery.request_reset(&email).await?;
    Ok(web::Json(MessageResponse::new(format!(
        "Password reset instructions sent to {email}"
    ))))
}

/// Redeem a reset token and set a new password.
#[utoipa::path(
    post,
    path = "/reset_password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid, expired or reused token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "resetPassword"
)]
#[post("/reset_password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let ResetPasswordRequest {
        token,
        new_password,
    } = payload.into_inner();
    let raw_token = require(token, TOKEN)?;
    let raw_password = require(new_password, NEW_PASSWORD)?;
    let token = ResetToken::parse(&raw_token).ok_or_else(|| invalid_token_error(TOKEN))?;
    let password =
        Password::new(&raw_password).map_err(|err| auth_field_error(NEW_PASSWORD, err))?;
    state.recovery.complete_reset(&token, &password).await?;
    Ok(web::Json(MessageResponse::new("Password updated.")))
}

/// Delete an account by id.
#[utoipa::path(
    delete,
    path = "/remove_user/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed", body = MessageResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "removeUser"
)]
#[delete("/remove_user/{id}")]
pub async fn remove_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let raw = parse_identifier(&path, USER_ID)?;
    let id = UserId::new(raw).map_err(|err| user_validation_error(USER_ID, err))?;
    state.accounts.remove_user(id).await?;
    Ok(web::Json(MessageResponse::new("You deleted a user.")))
}

/// Resolve the bearer token to the account it was issued for.
#[utoipa::path(
    get,
    path = "/whoami",
    responses(
        (status = 200, description = "Token subject", body = WhoAmIResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "whoami",
    security(("BearerToken" = []))
)]
#[get("/whoami")]
pub async fn whoami(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<WhoAmIResponse>> {
    let email = state.login.identify(token.as_str()).await?;
    Ok(web::Json(WhoAmIResponse {
        email: email.to_string(),
    }))
}
