//! Account domain service.
//!
//! Implements registration, removal, login, bearer identity, and the
//! reset-token recovery flow on top of the driven ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    AccountsCommand, CredentialHashError, CredentialHasher, LoginService, Mailer, OutboundEmail,
    PasswordRecovery, PasswordResetPersistenceError, PasswordResetRepository, TokenError,
    TokenIssuer, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, EmailAddress, Error, LoginCredentials, NewUser, Password, PasswordResetGrant,
    RegistrationDetails, ResetToken, User, UserId,
};

/// Message returned for any failed login, whichever half was wrong.
pub const WRONG_CREDENTIALS_MESSAGE: &str = "Wrong email or password";
/// Message returned when an email is already registered.
pub const EMAIL_TAKEN_MESSAGE: &str = "That email already exists in our database.";
/// Message returned when password recovery is requested for an unknown email.
pub const UNKNOWN_EMAIL_MESSAGE: &str = "No such email in our database.";

/// Driven ports the account service depends on.
#[derive(Clone)]
pub struct AccountsPorts {
    /// Account records keyed by id and normalised email.
    pub users: Arc<dyn UserRepository>,
    /// Outstanding reset grants.
    pub resets: Arc<dyn PasswordResetRepository>,
    /// Password digest creation and verification.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Access token issue and verification.
    pub tokens: Arc<dyn TokenIssuer>,
    /// Transport for reset emails.
    pub mailer: Arc<dyn Mailer>,
}

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountsService {
    users: Arc<dyn UserRepository>,
    resets: Arc<dyn PasswordResetRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    reset_ttl: Duration,
}

impl AccountsService {
    /// Build the service; `reset_ttl` bounds how long a reset token is live.
    pub fn new(ports: AccountsPorts, clock: Arc<dyn Clock>, reset_ttl: Duration) -> Self {
        Self {
            users: ports.users,
            resets: ports.resets,
            hasher: ports.hasher,
            tokens: ports.tokens,
            mailer: ports.mailer,
            clock,
            reset_ttl,
        }
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN_MESSAGE),
        }
    }

    fn map_reset_error(error: PasswordResetPersistenceError) -> Error {
        match error {
            PasswordResetPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("reset repository unavailable: {message}"))
            }
            PasswordResetPersistenceError::Query { message } => {
                Error::internal(format!("reset repository error: {message}"))
            }
        }
    }

    fn map_hash_error(error: CredentialHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn reset_email(to: &EmailAddress, token: &ResetToken, grant: &PasswordResetGrant) -> OutboundEmail {
        OutboundEmail {
            to: to.clone(),
            subject: "Password reset".to_owned(),
            body: format!(
                "Use this token to choose a new password: {}\n\
                 It stops working at {} or after its first use.",
                token.expose(),
                grant.expires_at.to_rfc3339(),
            ),
        }
    }
}

#[async_trait]
impl AccountsCommand for AccountsService {
    async fn register(&self, details: RegistrationDetails) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(&details.email)
            .await
            .map_err(Self::map_user_error)?;
        if existing.is_some() {
            return Err(Error::conflict(EMAIL_TAKEN_MESSAGE));
        }

        let password_hash = self
            .hasher
            .hash(&details.password)
            .await
            .map_err(Self::map_hash_error)?;
        let new_user = NewUser {
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            password_hash,
        };
        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(Self::map_user_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn remove_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self.users.delete(id).await.map_err(Self::map_user_error)?;
        if !removed {
            return Err(Error::not_found(format!("user {id} not found")));
        }
        info!(user_id = %id, "user removed");
        Ok(())
    }
}

#[async_trait]
impl LoginService for AccountsService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let Some(stored) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(WRONG_CREDENTIALS_MESSAGE));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(Self::map_hash_error)?;
        if !matches {
            info!(user_id = %stored.user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(WRONG_CREDENTIALS_MESSAGE));
        }

        self.tokens
            .issue(stored.user.email())
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn identify(&self, token: &str) -> Result<EmailAddress, Error> {
        let email = self.tokens.verify(token).map_err(|err| match err {
            TokenError::Expired => Error::unauthorized("access token expired"),
            other => {
                debug!(error = %other, "bearer token rejected");
                Error::unauthorized("invalid access token")
            }
        })?;

        // Tokens outlive account removal; re-check the subject still exists.
        let account = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_user_error)?;
        match account {
            Some(stored) => Ok(stored.user.email().clone()),
            None => Err(Error::unauthorized("invalid access token")),
        }
    }
}

#[async_trait]
impl PasswordRecovery for AccountsService {
    async fn request_reset(&self, email: &EmailAddress) -> Result<(), Error> {
        let Some(stored) = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_user_error)?
        else {
            return Err(Error::unauthorized(UNKNOWN_EMAIL_MESSAGE));
        };

        let token = ResetToken::generate();
        let grant = PasswordResetGrant {
            digest: token.digest(),
            user_id: stored.user.id(),
            expires_at: self.clock.utc() + self.reset_ttl,
        };
        self.resets
            .store(&grant)
            .await
            .map_err(Self::map_reset_error)?;
        info!(user_id = %grant.user_id, expires_at = %grant.expires_at, "password reset issued");

        let message = Self::reset_email(stored.user.email(), &token, &grant);
        if let Err(err) = self.mailer.send(&message).await {
            warn!(user_id = %grant.user_id, error = %err, "password reset mail not delivered");
        }
        Ok(())
    }

    async fn complete_reset(&self, token: &ResetToken, new_password: &Password) -> Result<(), Error> {
        let new_hash = self
            .hasher
            .hash(new_password)
            .await
            .map_err(Self::map_hash_error)?;
        let redeemed = self
            .resets
            .redeem(&token.digest(), &new_hash, self.clock.utc())
            .await
            .map_err(Self::map_reset_error)?;
        match redeemed {
            Some(user_id) => {
                info!(user_id = %user_id, "password reset completed");
                Ok(())
            }
            None => Err(Error::invalid_request("reset token is invalid or expired")),
        }
    }
}

#[cfg(test)]
#[path = "accounts_service_tests.rs"]
mod tests;
