// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog logic over in-memory listing snapshots.
//!
//! Everything here is pure: callers fetch listings and inquiries from a
//! `ListingStore` and hand the slices in. Nothing in this crate performs I/O.

pub mod filter;
pub mod inquiries;
pub mod overview;

pub use filter::{Criteria, CriteriaQuery, FilterBounds, filter};
pub use inquiries::{InquiryView, UNKNOWN_BREED, default_inquiry_message, resolve_inquiries};
pub use overview::{AvailabilityCount, BreedCount, Overview};
