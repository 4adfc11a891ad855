// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and parseable password hashes.

use crate::diagnostic::ConfigError;
use crate::model::PawmarketConfig;

/// Longest admin session lifetime accepted: 30 days.
pub const MAX_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PawmarketConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be greater than 0".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.admin.username.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "admin.username must not be empty".to_string(),
        });
    }

    if let Some(hash) = &config.admin.password_hash
        && let Err(e) = argon2::PasswordHash::new(hash)
    {
        errors.push(ConfigError::Validation {
            message: format!("admin.password_hash is not a valid PHC string: {e}"),
        });
    }

    let ttl = config.admin.session_ttl_secs;
    if ttl == 0 || ttl > MAX_SESSION_TTL_SECS {
        errors.push(ConfigError::Validation {
            message: format!(
                "admin.session_ttl_secs must be between 1 and {MAX_SESSION_TTL_SECS}, got {ttl}"
            ),
        });
    }

    if config.images.max_width == 0 || config.images.max_height == 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "images.max_width and images.max_height must be positive, got {}x{}",
                config.images.max_width, config.images.max_height
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
