// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` wires a temp SQLite store into the gateway router. Requests
//! go through `tower::ServiceExt::oneshot`, so no socket is bound.

use std::sync::Arc;
use std::time::Duration;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pawmarket_config::model::{PawmarketConfig, StorageConfig};
use pawmarket_core::{ListingStore, PawmarketError};
use pawmarket_gateway::{AdminCredentials, GatewayState};
use pawmarket_image::ThumbnailBounds;
use pawmarket_storage::SqliteStorage;

/// Default admin password used by harnesses built with admin login enabled.
pub const DEFAULT_ADMIN_PASSWORD: &str = "test-admin-password";

/// Hash a password with Argon2id and a fixed salt (tests only need determinism).
pub fn hash_password(password: &str) -> String {
    let salt = SaltString::encode_b64(b"pawmarket-harnes").unwrap();
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    admin_password: Option<String>,
    session_ttl: Duration,
    thumbnails: ThumbnailBounds,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            admin_password: Some(DEFAULT_ADMIN_PASSWORD.to_string()),
            session_ttl: Duration::from_secs(3600),
            thumbnails: ThumbnailBounds::default(),
        }
    }

    /// Use a specific admin password.
    pub fn with_admin_password(mut self, password: &str) -> Self {
        self.admin_password = Some(password.to_string());
        self
    }

    /// Leave `password_hash` unset, so every login is rejected.
    pub fn without_admin(mut self) -> Self {
        self.admin_password = None;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_thumbnail_bounds(mut self, bounds: ThumbnailBounds) -> Self {
        self.thumbnails = bounds;
        self
    }

    /// Build the harness: temp database, initialized store, router.
    pub async fn build(self) -> Result<TestHarness, PawmarketError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| PawmarketError::Persistence {
            source: Box::new(e),
        })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = PawmarketConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        config.admin.password_hash = self.admin_password.as_deref().map(hash_password);
        config.admin.session_ttl_secs = self.session_ttl.as_secs();

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        let storage: Arc<dyn ListingStore> = Arc::new(storage);

        let state = GatewayState::new(
            Arc::clone(&storage),
            AdminCredentials {
                username: config.admin.username.clone(),
                password_hash: config.admin.password_hash.clone(),
                session_ttl: self.session_ttl,
            },
            self.thumbnails,
        );

        Ok(TestHarness {
            router: pawmarket_gateway::router(state.clone()),
            storage,
            state,
            config,
            admin_password: self.admin_password,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with temp storage and the gateway router.
pub struct TestHarness {
    /// SQLite listing store (temp DB, cleaned up on drop).
    pub storage: Arc<dyn ListingStore>,
    /// Gateway state shared with the router.
    pub state: GatewayState,
    /// Configuration the harness was assembled from.
    pub config: PawmarketConfig,
    router: Router,
    admin_password: Option<String>,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A fresh clone of the gateway router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Send a request and return the raw response status and body.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Send a request and parse the body as JSON (`Null` when empty).
    pub async fn request_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.request(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Log in as the configured admin and return the session token.
    pub async fn login(&self) -> String {
        let password = self
            .admin_password
            .as_deref()
            .expect("harness built without admin login");
        let (status, body) = self
            .request_json(
                "POST",
                "/v1/admin/login",
                None,
                Some(serde_json::json!({
                    "username": self.config.admin.username,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}
