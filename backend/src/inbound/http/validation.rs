//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field surfaces as `invalid_request` with
//! `details: {field, code[, value]}` so clients can highlight the offending
//! input.

use serde_json::json;

use crate::domain::{AuthValidationError, CategoryValidationError, Error, UserValidationError};

/// Validation error codes raised by the transport layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidIdentifier,
    InvalidToken,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidIdentifier => "invalid_identifier",
            ErrorCode::InvalidToken => "invalid_token",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code,
        }))
    }

    fn with_value(self, code: &str, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code,
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField.as_str())
}

/// Unwrap an optional body field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_identifier_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a positive integer"))
        .with_value(ErrorCode::InvalidIdentifier.as_str(), value)
}

/// Parse a path segment as a positive integer identifier.
pub(crate) fn parse_identifier(value: &str, field: FieldName) -> Result<i32, Error> {
    match value.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid_identifier_error(field, value)),
    }
}

pub(crate) fn invalid_token_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must not be blank"))
        .with_code(ErrorCode::InvalidToken.as_str())
}

/// Map an auth payload failure onto the field that caused it.
pub(crate) fn auth_validation_error(err: AuthValidationError) -> Error {
    ValidationError::new(err.field(), err.to_string()).with_code(err.code())
}

/// Map an auth failure onto a caller-chosen field, such as `new_password`.
pub(crate) fn auth_field_error(field: FieldName, err: AuthValidationError) -> Error {
    ValidationError::new(field.as_str(), err.to_string()).with_code(err.code())
}

/// Map a user value failure for a single field, such as a path segment.
pub(crate) fn user_validation_error(field: FieldName, err: UserValidationError) -> Error {
    ValidationError::new(field.as_str(), err.to_string()).with_code(err.code())
}

/// Map a category value failure onto the field that caused it.
pub(crate) fn category_validation_error(err: CategoryValidationError) -> Error {
    let field = match err {
        CategoryValidationError::NonPositiveId => "id",
        CategoryValidationError::BlankName | CategoryValidationError::NameTooLong { .. } => "name",
        CategoryValidationError::NegativeItemRange => "item_range",
        CategoryValidationError::EmptyPatch => "body",
    };
    ValidationError::new(field, err.to_string()).with_code(err.code())
}
