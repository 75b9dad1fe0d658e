use std::collections::HashMap;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{AuthError, token::AdminTokenCodec};

/// Name of the cookie carrying the admin session token.
pub const ADMIN_COOKIE_NAME: &str = "admin_token";

/// CookieReader
///
/// The only thing the guard needs from a request: look a cookie up by name.
pub trait CookieReader {
    fn get(&self, name: &str) -> Option<String>;
}

impl CookieReader for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        CookieJar::get(self, name).map(|c| c.value().to_string())
    }
}

impl CookieReader for HeaderMap {
    fn get(&self, name: &str) -> Option<String> {
        CookieJar::from_headers(self)
            .get(name)
            .map(|c| c.value().to_string())
    }
}

impl CookieReader for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// AdminGuard
///
/// Verifies the `admin_token` cookie. Cloned into every request through `AppState`;
/// holds no mutable state, so every check re-verifies from scratch.
#[derive(Clone, Debug)]
pub struct AdminGuard {
    codec: AdminTokenCodec,
}

impl AdminGuard {
    pub fn new(codec: AdminTokenCodec) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &AdminTokenCodec {
        &self.codec
    }

    /// verify_admin_auth
    ///
    /// Soft check. Returns `true` only for a present, correctly signed, unexpired
    /// token whose `admin` claim is `true`. Never fails.
    pub fn verify_admin_auth<C: CookieReader + ?Sized>(&self, cookies: &C) -> bool {
        let Some(token) = cookies.get(ADMIN_COOKIE_NAME) else {
            return false;
        };
        if token.is_empty() {
            return false;
        }

        match self.codec.verify(&token) {
            Ok(claims) => claims.admin,
            Err(AuthError::Verification(reason)) => {
                // Not a token problem we recognise; surface it without failing the probe.
                tracing::warn!(%reason, "unexpected admin token verification error");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "admin token rejected");
                false
            }
        }
    }

    /// require_admin_auth
    ///
    /// Hard check. `Ok(true)` when the soft check passes, `Err(Unauthorized)` otherwise.
    pub fn require_admin_auth<C: CookieReader + ?Sized>(
        &self,
        cookies: &C,
    ) -> Result<bool, AuthError> {
        if self.verify_admin_auth(cookies) {
            Ok(true)
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}

/// Builds the `admin_token` cookie for a freshly signed token.
pub fn admin_cookie(token: String, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::seconds(
            i64::try_from(max_age_secs).unwrap_or(i64::MAX),
        ))
        .build()
}

/// Builds the cookie that makes the browser discard `admin_token`: empty value,
/// immediate expiry, and the same path and security flags as the original.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((ADMIN_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

/// AdminSession
///
/// Extractor for admin-only handlers. Runs the hard check against the request's
/// cookies; rejects with `401 {"error": "admin access required"}`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    AdminGuard: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let guard = AdminGuard::from_ref(state);
        guard.require_admin_auth(&parts.headers)?;
        Ok(AdminSession)
    }
}
