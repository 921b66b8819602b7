//! Argon2id implementation of [`CredentialHasher`].
//!
//! Hashing runs on Tokio's blocking pool; a default-cost Argon2 call takes
//! tens of milliseconds and must not stall the request executor.

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHashError, CredentialHasher};
use crate::domain::{Password, PasswordDigest};

const SALT_BYTES: usize = 16;

/// Argon2id hasher producing PHC strings.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Hasher using the crate's recommended cost parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    ///
    /// # Examples
    /// ```
    /// use argon2::Params;
    /// use shop_backend::outbound::security::Argon2CredentialHasher;
    ///
    /// let cheap = Params::new(8, 1, 1, None).expect("valid params");
    /// let _hasher = Argon2CredentialHasher::with_params(cheap);
    /// ```
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

fn join_error(err: tokio::task::JoinError) -> CredentialHashError {
    CredentialHashError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordDigest, CredentialHashError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let mut salt_bytes = [0_u8; SALT_BYTES];
            rand::thread_rng().fill_bytes(&mut salt_bytes);
            let salt = SaltString::encode_b64(&salt_bytes)
                .map_err(|err| CredentialHashError::hashing(err.to_string()))?;
            Self::argon2(params)
                .hash_password(secret.as_bytes(), &salt)
                .map(|hash| PasswordDigest::new(hash.to_string()))
                .map_err(|err| CredentialHashError::hashing(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHashError> {
        let secret = Zeroizing::new(password.expose().to_owned());
        let phc = digest.as_str().to_owned();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&phc)
                .map_err(|err| CredentialHashError::malformed_digest(err.to_string()))?;
            // Cost parameters embedded in the PHC string win over `params`.
            match Self::argon2(params).verify_password(secret.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(CredentialHashError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(join_error)?
    }
}
