// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for PawMarket.

use thiserror::Error;

/// The primary error type used across the listing store, catalog, image codec
/// and gateway.
#[derive(Debug, Error)]
pub enum PawmarketError {
    /// Configuration errors that survive past config loading (bad hash, bad bounds).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (store unreachable, disk full, constraint violation).
    ///
    /// Recoverable: the next operation may succeed. Never retried automatically.
    #[error("persistence error: {source}")]
    Persistence {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The targeted entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Stored or uploaded image data is not a valid encoded image.
    #[error("image decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required field is missing or a value is out of range.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The operation is not allowed in the entity's current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Credentials or session token rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PawmarketError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a decode failure without an underlying source.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }
}
