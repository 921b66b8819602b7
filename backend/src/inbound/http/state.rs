//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountsCommand, CategoryRegistry, LoginService, PasswordRecovery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub login: Arc<dyn LoginService>,
    pub recovery: Arc<dyn PasswordRecovery>,
    pub categories: Arc<dyn CategoryRegistry>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```ignore
    /// let service = Arc::new(AccountsService::new(ports, clock, ttl));
    /// let state = HttpState::new(service.clone(), service.clone(), service, categories);
    /// ```
    pub fn new(
        accounts: Arc<dyn AccountsCommand>,
        login: Arc<dyn LoginService>,
        recovery: Arc<dyn PasswordRecovery>,
        categories: Arc<dyn CategoryRegistry>,
    ) -> Self {
        Self {
            accounts,
            login,
            recovery,
            categories,
        }
    }
}
