// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for PawMarket.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, serialized
//! access via `tokio-rusqlite`, and typed CRUD operations for dog listings
//! and buyer inquiries.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
