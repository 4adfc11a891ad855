// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pawmarket.toml` > `~/.config/pawmarket/pawmarket.toml`
//! > `/etc/pawmarket/pawmarket.toml` with environment variable overrides via
//! the `PAWMARKET_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PawmarketConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/pawmarket/pawmarket.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "pawmarket.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("pawmarket").join(LOCAL_CONFIG_FILE))
        .unwrap_or_default()
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pawmarket/pawmarket.toml` (system-wide)
/// 3. `~/.config/pawmarket/pawmarket.toml` (user XDG config)
/// 4. `./pawmarket.toml` (local directory)
/// 5. `PAWMARKET_*` environment variables
pub fn load_config() -> Result<PawmarketConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PawmarketConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PawmarketConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PawmarketConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PawmarketConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PawmarketConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PAWMARKET_ADMIN_PASSWORD_HASH` must map to
/// `admin.password_hash`, not `admin.password.hash`.
fn env_provider() -> Env {
    Env::prefixed("PAWMARKET_")
        .ignore(&["admin_password"])
        .map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env key to its dotted config path.
///
/// Figment hands `Env::map` the key in its original case.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: [&str; 5] = ["app", "storage", "server", "admin", "images"];
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
