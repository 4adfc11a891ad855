// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin authentication for the gateway.
//!
//! An admin exchanges username and password for a random session token at
//! `POST /v1/admin/login`. Admin routes then require
//! `Authorization: Bearer <token>`. Tokens expire after the configured TTL
//! and can be revoked early by logging out.
//!
//! When no password hash is configured, every login is rejected (fail-closed).

use std::sync::Arc;
use std::time::{Duration, Instant};

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use pawmarket_core::PawmarketError;
use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes in a session token (hex encoded on the wire).
const TOKEN_BYTES: usize = 32;

/// Admin login settings (mirrors `AdminConfig` from pawmarket-config).
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2 PHC string. `None` disables admin login.
    pub password_hash: Option<String>,
    pub session_ttl: Duration,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "[redacted]"),
            )
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

impl AdminCredentials {
    /// Check a login attempt. Runs the Argon2 verification, so call it off
    /// the async executor.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(hash) = self.password_hash.as_deref() else {
            tracing::warn!("admin login attempted but no password hash is configured");
            return false;
        };
        if username != self.username {
            return false;
        }
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(error = %e, "configured admin password hash is unparseable");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Token passed to admin handlers by [`auth_middleware`].
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

/// In-memory admin session tokens with expiry.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Instant>>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("active", &self.sessions.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a fresh token valid for the store's TTL.
    ///
    /// Fails when the TTL pushes the expiry past what `Instant` can represent.
    pub fn issue(&self) -> Result<String, PawmarketError> {
        let expiry = Instant::now().checked_add(self.ttl).ok_or_else(|| {
            PawmarketError::Internal(format!("session ttl {:?} is out of range", self.ttl))
        })?;
        self.purge_expired();
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.sessions.insert(token.clone(), expiry);
        Ok(token)
    }

    /// Whether `token` is known and unexpired. Expired tokens are evicted.
    pub fn validate(&self, token: &str) -> bool {
        let expired = match self.sessions.get(token) {
            Some(expiry) => *expiry <= Instant::now(),
            None => return false,
        };
        if expired {
            self.sessions.remove(token);
            return false;
        }
        true
    }

    /// Revoke a token. Returns `false` if it was unknown.
    pub fn revoke(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    fn purge_expired(&self) {
        let now = Instant::now();
        self.sessions.retain(|_, expiry| *expiry > now);
    }
}

/// Middleware that admits requests carrying a live session token.
///
/// On success the token is attached to the request as an [`AdminSession`]
/// extension so handlers (logout) can find it.
pub async fn auth_middleware(
    State(sessions): State<SessionStore>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    match token {
        Some(token) if sessions.validate(&token) => {
            request.extensions_mut().insert(AdminSession { token });
            Ok(next.run(request).await)
        }
        Some(_) => {
            tracing::debug!("admin request with unknown or expired token");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}
