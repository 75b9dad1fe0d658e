use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::AppConfig;

/// AdminClaims
///
/// Payload of the `admin_token` cookie. A token only grants admin access when
/// `admin` is strictly `true`; payloads without the field decode as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    #[serde(default)]
    pub admin: bool,
    /// Issued At, seconds since the Unix epoch.
    #[serde(default)]
    pub iat: u64,
    /// Expiration Time, seconds since the Unix epoch.
    pub exp: u64,
}

/// Source of the current time for token issuance and expiry checks.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

/// AdminTokenCodec
///
/// Signs and verifies admin session tokens (HS256). Expiry is checked against the
/// injected [`Clock`] rather than inside `jsonwebtoken`, with no leeway: a token is
/// expired as soon as `exp <= now`.
#[derive(Clone)]
pub struct AdminTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AdminTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenCodec")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl AdminTokenCodec {
    /// Builds a codec from a raw secret. Empty secrets are rejected here so that a
    /// misconfigured process never reaches request handling.
    pub fn new(secret: &str, ttl_secs: u64, clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
            clock,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        Self::new(
            &config.admin_jwt_secret,
            config.admin_token_ttl_secs,
            Arc::new(SystemClock),
        )
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Signs a token carrying `admin`, valid for the configured TTL from now.
    pub fn sign(&self, admin: bool) -> Result<String, AuthError> {
        let now = self.clock.now();
        self.encode_claims(&AdminClaims {
            admin,
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        })
    }

    /// Signs an arbitrary claim set as-is.
    pub fn encode_claims(&self, claims: &AdminClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verifies signature and expiry and returns the claims.
    ///
    /// This does not look at the `admin` flag; that is the guard's job.
    pub fn verify(&self, token: &str) -> Result<AdminClaims, AuthError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
                _ => AuthError::Verification(e.to_string()),
            },
        )?;

        if data.claims.exp <= self.clock.now() {
            return Err(AuthError::Expired);
        }

        Ok(data.claims)
    }
}
