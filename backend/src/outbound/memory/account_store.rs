//! Users and reset grants held in memory.
//!
//! Both ports share one lock so redemption is atomic, mirroring the
//! database transaction.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    PasswordResetPersistenceError, PasswordResetRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, NewUser, PasswordDigest, PasswordResetGrant, ResetTokenDigest,
    StoredCredentials, User, UserId,
};

#[derive(Default)]
struct AccountState {
    last_id: i32,
    users: BTreeMap<UserId, StoredCredentials>,
    resets: HashMap<ResetTokenDigest, PasswordResetGrant>,
}

/// In-memory implementation of [`UserRepository`] and
/// [`PasswordResetRepository`].
#[derive(Default)]
pub struct InMemoryAccountStore {
    state: Mutex<AccountState>,
}

impl InMemoryAccountStore {
    /// Create an empty store whose first user id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, AccountState>, String> {
        self.state
            .lock()
            .map_err(|_| "account store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryAccountStore {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state
            .users
            .values()
            .any(|stored| stored.user.email() == &user.email)
        {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }

        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        state.last_id = next;

        let created = User::new(
            id,
            user.first_name.clone(),
            user.last_name.clone(),
            user.email.clone(),
        );
        state.users.insert(
            id,
            StoredCredentials {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let removed = state.users.remove(&id).is_some();
        if removed {
            state.resets.retain(|_, grant| grant.user_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl PasswordResetRepository for InMemoryAccountStore {
    async fn store(&self, grant: &PasswordResetGrant) -> Result<(), PasswordResetPersistenceError> {
        let mut state = self.lock().map_err(PasswordResetPersistenceError::query)?;
        if !state.users.contains_key(&grant.user_id) {
            return Err(PasswordResetPersistenceError::query(format!(
                "reset grant references unknown user {}",
                grant.user_id
            )));
        }
        state.resets.retain(|_, held| held.user_id != grant.user_id);
        state.resets.insert(grant.digest.clone(), grant.clone());
        Ok(())
    }

    async fn redeem(
        &self,
        digest: &ResetTokenDigest,
        new_hash: &PasswordDigest,
        now: DateTime<Utc>,
    ) -> Result<Option<UserId>, PasswordResetPersistenceError> {
        let mut state = self.lock().map_err(PasswordResetPersistenceError::query)?;
        let Some(grant) = state.resets.remove(digest) else {
            return Ok(None);
        };
        if !grant.is_live_at(now) {
            return Ok(None);
        }
        match state.users.get_mut(&grant.user_id) {
            Some(stored) => {
                stored.password_hash = new_hash.clone();
                Ok(Some(grant.user_id))
            }
            None => Ok(None),
        }
    }
}
