//! Authentication primitives: credentials, registration input, digests, and
//! bearer tokens.
//!
//! Handlers build these from raw strings before talking to a port, so the
//! services only ever see validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, PersonName, UserValidationError};

/// Field-level failure raised while validating auth payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Password was empty.
    EmptyPassword,
    /// A field failed user validation.
    Field {
        field: &'static str,
        source: UserValidationError,
    },
}

impl AuthValidationError {
    /// Name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyPassword => "password",
            Self::Field { field, .. } => field,
        }
    }

    /// Machine-readable code placed in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyPassword => "blank_field",
            Self::Field { source, .. } => source.code(),
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::Field { source, .. } => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

fn field<T>(
    field: &'static str,
    result: Result<T, UserValidationError>,
) -> Result<T, AuthValidationError> {
    result.map_err(|source| AuthValidationError::Field { field, source })
}

/// Caller-supplied plaintext password.
///
/// Whitespace is preserved; the buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept any non-empty password.
    pub fn new(raw: &str) -> Result<Self, AuthValidationError> {
        if raw.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use shop_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" A@B.com ", "p").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@b.com");
/// assert_eq!(creds.password().expose(), "p");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Validate and normalise raw login fields.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        Ok(Self {
            email: field("email", EmailAddress::new(email))?,
            password: Password::new(password)?,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegistrationDetails {
    /// Validate each field in request order.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        Ok(Self {
            first_name: field("first_name", PersonName::new(first_name))?,
            last_name: field("last_name", PersonName::new(last_name))?,
            email: field("email", EmailAddress::new(email))?,
            password: Password::new(password)?,
        })
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC-format digest string.
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(**redacted**)")
    }
}

/// Signed bearer token handed to a client after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}
