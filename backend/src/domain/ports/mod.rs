//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AccountsCommand`, `LoginService`, `PasswordRecovery`,
//! `CategoryRegistry`) are what inbound adapters call. Driven ports are
//! what the domain services call out to.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_command;
mod category_registry;
mod category_repository;
mod credential_hasher;
mod login_service;
mod mailer;
mod password_recovery;
mod password_reset_repository;
mod token_issuer;
mod user_repository;

#[cfg(test)]
pub use accounts_command::MockAccountsCommand;
pub use accounts_command::AccountsCommand;
#[cfg(test)]
pub use category_registry::MockCategoryRegistry;
pub use category_registry::{CategoryRegistry, SeedOutcome};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryPersistenceError, CategoryRepository};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{Mailer, MailerError, OutboundEmail};
#[cfg(test)]
pub use password_recovery::MockPasswordRecovery;
pub use password_recovery::PasswordRecovery;
#[cfg(test)]
pub use password_reset_repository::MockPasswordResetRepository;
pub use password_reset_repository::{PasswordResetPersistenceError, PasswordResetRepository};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
