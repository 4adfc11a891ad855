// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for PawMarket integration tests.
//!
//! [`TestHarness`] assembles a temp SQLite listing store and the full
//! gateway router so tests can drive the HTTP API in-process.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder, hash_password};
