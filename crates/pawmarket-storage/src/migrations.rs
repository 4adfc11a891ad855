// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open and
//! use `CREATE ... IF NOT EXISTS`, so they are safe on every process start,
//! including against a database created before refinery tracked it.

use pawmarket_core::PawmarketError;
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), PawmarketError> {
    let report = embedded::migrations::runner().run(conn).map_err(|e| {
        PawmarketError::Persistence {
            source: Box::new(std::io::Error::other(e.to_string())),
        }
    })?;
    debug!(
        applied = report.applied_migrations().len(),
        "schema migrations complete"
    );
    Ok(())
}
