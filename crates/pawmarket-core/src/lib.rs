// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for PawMarket.
//!
//! This crate provides the domain types (listings and inquiries), the shared
//! error type, input validation, and the adapter traits implemented by the
//! storage backend.

pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key items at crate root for ergonomic imports.
pub use error::PawmarketError;
pub use types::{Availability, Dog, DogFields, Gender, HealthStatus, Inquiry, NewInquiry};

pub use traits::{ListingStore, PluginAdapter};
