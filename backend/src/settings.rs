//! Environment-driven process settings.
//!
//! This module centralises the configuration toggles so they are validated
//! consistently and can be tested in isolation with `mockable::MockEnv`.
//! Debug builds tolerate missing or malformed values with a warning and a
//! default; release builds reject them.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::Duration;
use mockable::Env;
use rand::RngCore;
use reqwest::Url;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

pub(crate) const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub(crate) const BIND_ADDR_ENV: &str = "SHOP_BIND_ADDR";
pub(crate) const KEY_FILE_ENV: &str = "TOKEN_SIGNING_KEY_FILE";
pub(crate) const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
pub(crate) const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECONDS";
pub(crate) const MAIL_RELAY_ENV: &str = "MAIL_RELAY_URL";
pub(crate) const MAIL_SENDER_ENV: &str = "MAIL_SENDER";
pub(crate) const MAIL_TIMEOUT_ENV: &str = "MAIL_TIMEOUT_SECONDS";
pub(crate) const RESET_TTL_ENV: &str = "PASSWORD_RESET_TTL_SECONDS";

const BIND_PORT_DEFAULT: u16 = 8080;
const KEY_FILE_DEFAULT: &str = "/var/run/secrets/token_signing_key";
/// Minimum signing key length accepted in release builds.
pub const SIGNING_KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
const TOKEN_TTL_DEFAULT: i64 = 900;
const MAIL_SENDER_DEFAULT: &str = "shop@mail.com";
const MAIL_TIMEOUT_DEFAULT: i64 = 10;
const RESET_TTL_DEFAULT: i64 = 3600;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SECONDS_EXPECTED: &str = "a positive number of seconds";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require explicit, valid values.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Signing material and lifetime for access tokens.
pub struct TokenSettings {
    pub signing_key: Zeroizing<Vec<u8>>,
    pub ttl: Duration,
}

/// Outbound mail transport settings.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// HTTP relay endpoint; `None` selects the log-only mailer.
    pub relay_url: Option<Url>,
    pub sender: String,
    pub timeout: std::time::Duration,
}

/// Fully validated process settings.
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// `None` runs the server on in-memory stores.
    pub database_url: Option<String>,
    pub token: TokenSettings,
    pub mail: MailSettings,
    pub reset_ttl: Duration,
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the signing key file failed.
    #[error("failed to read token signing key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The signing key file is too short for release builds.
    #[error("token signing key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not fall back to a random signing key.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use shop_backend::settings::{BuildMode, settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "TOKEN_ALLOW_EPHEMERAL" => Some("1".to_owned()),
///     "TOKEN_SIGNING_KEY_FILE" => Some("/nonexistent/key".to_owned()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert_eq!(settings.bind_addr.port(), 8080);
/// assert!(settings.database_url.is_none());
/// ```
pub fn settings_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Settings, ConfigError> {
    let bind_addr = bind_addr_from_env(env, mode)?;
    let database_url = non_blank(env, DATABASE_URL_ENV);
    if database_url.is_none() {
        warn!("DATABASE_URL not set; using in-memory stores");
    }
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let signing_key = signing_key_from_env(env, mode, allow_ephemeral)?;
    let token_ttl = seconds_from_env(env, mode, TOKEN_TTL_ENV, TOKEN_TTL_DEFAULT)?;
    let mail = mail_from_env(env, mode)?;
    let reset_ttl = seconds_from_env(env, mode, RESET_TTL_ENV, RESET_TTL_DEFAULT)?;

    Ok(Settings {
        bind_addr,
        database_url,
        token: TokenSettings {
            signing_key,
            ttl: Duration::seconds(token_ttl),
        },
        mail,
        reset_ttl: Duration::seconds(reset_ttl),
    })
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

/// Fall back to `default` in debug builds, otherwise surface `error`.
fn tolerate<T>(mode: BuildMode, default: T, error: ConfigError) -> Result<T, ConfigError> {
    if mode.is_debug() {
        warn!(%error, "using default");
        Ok(default)
    } else {
        Err(error)
    }
}

fn bind_addr_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<SocketAddr, ConfigError> {
    let default = SocketAddr::from(([0, 0, 0, 0], BIND_PORT_DEFAULT));
    match non_blank(env, BIND_ADDR_ENV) {
        None => Ok(default),
        Some(value) => match value.parse() {
            Ok(addr) => Ok(addr),
            Err(_) => tolerate(
                mode,
                default,
                ConfigError::InvalidEnv {
                    name: BIND_ADDR_ENV,
                    value,
                    expected: "host:port",
                },
            ),
        },
    }
}

fn seconds_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: i64,
) -> Result<i64, ConfigError> {
    match non_blank(env, name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<i64>() {
            Ok(seconds) if seconds > 0 => Ok(seconds),
            _ => tolerate(
                mode,
                default,
                ConfigError::InvalidEnv {
                    name,
                    value,
                    expected: SECONDS_EXPECTED,
                },
            ),
        },
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, ConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(ConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None => tolerate(
            mode,
            false,
            ConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value,
                expected: BOOL_EXPECTED,
            },
        ),
    }
}

fn signing_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    let path = PathBuf::from(
        non_blank(env, KEY_FILE_ENV).unwrap_or_else(|| KEY_FILE_DEFAULT.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SIGNING_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(ConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SIGNING_KEY_MIN_LEN,
                });
            }
            Ok(Zeroizing::new(bytes))
        }
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token signing key (dev only)"
            );
            let mut key = Zeroizing::new(vec![0_u8; EPHEMERAL_KEY_LEN]);
            rand::thread_rng().fill_bytes(key.as_mut_slice());
            Ok(key)
        }
        Err(error) => Err(ConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}

fn mail_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<MailSettings, ConfigError> {
    let relay_url = match non_blank(env, MAIL_RELAY_ENV) {
        None => None,
        Some(value) => match Url::parse(&value) {
            Ok(url) => Some(url),
            Err(_) => tolerate(
                mode,
                None,
                ConfigError::InvalidEnv {
                    name: MAIL_RELAY_ENV,
                    value,
                    expected: "an absolute http(s) URL",
                },
            )?,
        },
    };
    let sender = non_blank(env, MAIL_SENDER_ENV).unwrap_or_else(|| MAIL_SENDER_DEFAULT.to_owned());
    let timeout = seconds_from_env(env, mode, MAIL_TIMEOUT_ENV, MAIL_TIMEOUT_DEFAULT)?;

    Ok(MailSettings {
        relay_url,
        sender,
        timeout: std::time::Duration::from_secs(timeout.unsigned_abs()),
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
