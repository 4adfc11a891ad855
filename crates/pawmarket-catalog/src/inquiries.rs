// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inquiry presentation helpers.

use std::collections::HashMap;

use pawmarket_core::{Dog, Inquiry};
use serde::Serialize;

/// Breed shown for an inquiry whose listing has been deleted.
pub const UNKNOWN_BREED: &str = "Unknown";

/// An inquiry joined with the breed of the listing it refers to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InquiryView {
    #[serde(flatten)]
    pub inquiry: Inquiry,
    pub breed: String,
}

/// Attach the listing breed to each inquiry, keeping inquiry order.
/// Dangling references resolve to [`UNKNOWN_BREED`].
pub fn resolve_inquiries(inquiries: Vec<Inquiry>, dogs: &[Dog]) -> Vec<InquiryView> {
    let breeds: HashMap<&str, &str> = dogs
        .iter()
        .map(|d| (d.id.as_str(), d.breed.as_str()))
        .collect();

    inquiries
        .into_iter()
        .map(|inquiry| {
            let breed = breeds
                .get(inquiry.dog_id.as_str())
                .copied()
                .unwrap_or(UNKNOWN_BREED)
                .to_string();
            InquiryView { inquiry, breed }
        })
        .collect()
}

/// Message used when a buyer submits an inquiry without one.
pub fn default_inquiry_message(breed: &str) -> String {
    format!("Hi, I'm interested in the {breed}. Please contact me with more details.")
}
