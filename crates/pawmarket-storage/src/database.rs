// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. Each query borrows the handle for exactly one closure, so the
//! handle is released on every exit path, errors included.

use pawmarket_core::PawmarketError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into [`PawmarketError::Persistence`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> PawmarketError {
    PawmarketError::Persistence {
        source: Box::new(e),
    }
}

/// Unwrap an error raised inside a connection closure that already speaks
/// [`PawmarketError`].
fn flatten_err(e: tokio_rusqlite::Error<PawmarketError>) -> PawmarketError {
    match e {
        tokio_rusqlite::Error::Error(inner) => inner,
        _ => PawmarketError::Persistence {
            source: "database connection closed".into(),
        },
    }
}

/// Handle to the PawMarket SQLite database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if needed) the database file in WAL mode and apply migrations.
    pub async fn open(path: &str) -> Result<Self, PawmarketError> {
        Self::open_with_options(path, true).await
    }

    /// Open the database file, choosing the journal mode, and apply migrations.
    pub async fn open_with_options(path: &str, wal_mode: bool) -> Result<Self, PawmarketError> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| PawmarketError::Persistence {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(wal_mode).await?;
        db.migrate().await?;
        debug!(path, wal_mode, "database opened");
        Ok(db)
    }

    /// Open a private in-memory database with the schema applied.
    pub async fn open_in_memory() -> Result<Self, PawmarketError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| PawmarketError::Persistence {
                source: Box::new(e),
            })?;
        let db = Self { conn };
        db.configure(false).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// The underlying tokio-rusqlite connection used by the query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flush the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), PawmarketError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint and release the handle.
    pub async fn close(self) -> Result<(), PawmarketError> {
        self.checkpoint().await?;
        drop(self.conn);
        debug!("database closed");
        Ok(())
    }

    async fn configure(&self, wal_mode: bool) -> Result<(), PawmarketError> {
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                if wal_mode {
                    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
                }
                conn.execute_batch(
                    "PRAGMA synchronous = NORMAL;
                     PRAGMA busy_timeout = 5000;",
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn migrate(&self) -> Result<(), PawmarketError> {
        self.conn
            .call(migrations::run_migrations)
            .await
            .map_err(flatten_err)
    }
}
