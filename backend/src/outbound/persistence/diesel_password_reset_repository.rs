//! PostgreSQL-backed `PasswordResetRepository`.
//!
//! Redemption deletes the grant and rewrites the password hash inside one
//! transaction, so a token is consumed exactly once. Storing a grant
//! replaces any earlier grant for the same user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{PasswordResetPersistenceError, PasswordResetRepository};
use crate::domain::{PasswordDigest, PasswordResetGrant, ResetTokenDigest, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ConsumedResetRow, NewPasswordResetRow};
use super::pool::{DbPool, PoolError};
use super::schema::{password_resets, users};

/// Diesel-backed implementation of the [`PasswordResetRepository`] port.
#[derive(Clone)]
pub struct DieselPasswordResetRepository {
    pool: DbPool,
}

impl DieselPasswordResetRepository {
    /// Build a repository over a shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PasswordResetPersistenceError {
    map_basic_pool_error(error, |message| PasswordResetPersistenceError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> PasswordResetPersistenceError {
    map_basic_diesel_error(
        error,
        |message| PasswordResetPersistenceError::query(message),
        |message| PasswordResetPersistenceError::connection(message),
    )
}

#[async_trait]
impl PasswordResetRepository for DieselPasswordResetRepository {
    async fn store(&self, grant: &PasswordResetGrant) -> Result<(), PasswordResetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPasswordResetRow {
            token_digest: grant.digest.as_str(),
            user_id: grant.user_id.get(),
            expires_at: grant.expires_at,
        };

        conn.transaction(|conn| {
            async move {
                diesel::delete(
                    password_resets::table.filter(password_resets::user_id.eq(row.user_id)),
                )
                .execute(conn)
                .await?;
                diesel::insert_into(password_resets::table)
                    .values(&row)
                    .execute(conn)
                    .await
                    .map(|_| ())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn redeem(
        &self,
        digest: &ResetTokenDigest,
        new_hash: &PasswordDigest,
        now: DateTime<Utc>,
    ) -> Result<Option<UserId>, PasswordResetPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let digest = digest.as_str();
        let new_hash = new_hash.as_str();

        let redeemed = conn
            .transaction(|conn| {
                async move {
                    let consumed: Option<ConsumedResetRow> =
                        diesel::delete(password_resets::table.find(digest))
                            .returning((password_resets::user_id, password_resets::expires_at))
                            .get_result(conn)
                            .await
                            .optional()?;

                    let Some(grant) = consumed else {
                        return Ok(None);
                    };
                    if grant.expires_at <= now {
                        return Ok(None);
                    }

                    diesel::update(users::table.find(grant.user_id))
                        .set(users::password_hash.eq(new_hash))
                        .execute(conn)
                        .await?;
                    Ok(Some(grant.user_id))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        redeemed
            .map(|raw| {
                UserId::new(raw).map_err(|err| {
                    PasswordResetPersistenceError::query(format!("stored grant owner invalid: {err}"))
                })
            })
            .transpose()
    }
}
