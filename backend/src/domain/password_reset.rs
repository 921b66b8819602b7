//! Single-use password reset tokens.
//!
//! The clear token is only ever mailed to the account holder. Stores keep
//! the SHA-256 digest so a leaked table cannot be replayed.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::user::UserId;

/// Number of random bytes in a reset token before hex encoding.
pub const RESET_TOKEN_BYTES: usize = 32;

/// Clear reset token as delivered to the user.
#[derive(Clone, PartialEq, Eq)]
pub struct ResetToken(Zeroizing<String>);

impl ResetToken {
    /// Draw a fresh token from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; RESET_TOKEN_BYTES]);
        rand::thread_rng().fill_bytes(&mut bytes[..]);
        Self(Zeroizing::new(hex::encode(&bytes[..])))
    }

    /// Wrap a token presented by a client, rejecting blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Hex token as mailed to the account holder.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// SHA-256 digest stored in place of the token.
    pub fn digest(&self) -> ResetTokenDigest {
        ResetTokenDigest(hex::encode(Sha256::digest(self.0.as_bytes())))
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResetToken(**redacted**)")
    }
}

/// Lower-case hex SHA-256 digest of a [`ResetToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResetTokenDigest(String);

impl ResetTokenDigest {
    /// Rehydrate a digest read back from storage.
    pub fn from_stored(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Outstanding reset grant as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetGrant {
    pub digest: ResetTokenDigest,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

impl PasswordResetGrant {
    /// Whether the grant is still redeemable at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    fn generated_tokens_are_hex_and_distinct() {
        let first = ResetToken::generate();
        let second = ResetToken::generate();
        assert_eq!(first.expose().len(), RESET_TOKEN_BYTES * 2);
        assert!(first.expose().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[rstest]
    fn digest_is_stable_sha256_hex() {
        let token = ResetToken::parse("abc").expect("token");
        assert_eq!(
            token.digest().as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_tokens_do_not_parse(#[case] raw: &str) {
        assert!(ResetToken::parse(raw).is_none());
    }

    #[rstest]
    fn grant_expires_at_its_deadline() {
        let now = Utc::now();
        let grant = PasswordResetGrant {
            digest: ResetToken::generate().digest(),
            user_id: UserId::new(1).expect("id"),
            expires_at: now + Duration::seconds(60),
        };
        assert!(grant.is_live_at(now));
        assert!(!grant.is_live_at(grant.expires_at));
    }
}
