// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pawmarket hash-password`: produce an Argon2id PHC string for
//! `admin.password_hash`.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use pawmarket_core::PawmarketError;
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};

/// The environment variable name for providing the admin password.
pub const ADMIN_PASSWORD_ENV_VAR: &str = "PAWMARKET_ADMIN_PASSWORD";

/// Get the admin password from the environment or an interactive prompt.
///
/// Priority:
/// 1. `PAWMARKET_ADMIN_PASSWORD` environment variable
/// 2. Interactive TTY prompt via `rpassword`, entered twice
pub fn read_admin_password() -> Result<SecretString, PawmarketError> {
    if let Ok(password) = std::env::var(ADMIN_PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("New admin password: ");
        let first = rpassword::read_password()
            .map_err(|e| PawmarketError::Config(format!("failed to read password: {e}")))?;
        eprint!("Confirm admin password: ");
        let second = rpassword::read_password()
            .map_err(|e| PawmarketError::Config(format!("failed to read password: {e}")))?;

        if first != second {
            return Err(PawmarketError::Config("passwords do not match".to_string()));
        }
        if first.is_empty() {
            return Err(PawmarketError::Config("empty password not allowed".to_string()));
        }
        return Ok(SecretString::from(first));
    }

    Err(PawmarketError::Config(format!(
        "No password provided. Set {ADMIN_PASSWORD_ENV_VAR} or run interactively."
    )))
}

/// Hash `password` with Argon2id and a fresh random salt.
pub fn hash_password(password: &SecretString) -> Result<String, PawmarketError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PawmarketError::Internal(format!("password hashing failed: {e}")))
}

/// Runs the `pawmarket hash-password` command.
pub fn run_hash_password() -> Result<(), PawmarketError> {
    let password = read_admin_password()?;
    let hash = hash_password(&password)?;
    println!("{hash}");
    eprintln!("Add this to pawmarket.toml under [admin] as password_hash.");
    Ok(())
}
