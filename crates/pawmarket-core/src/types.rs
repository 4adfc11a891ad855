// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the listing store, catalog and gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Timestamp format used for every persisted `created_at` / `updated_at`.
///
/// Fixed width with microsecond precision, so string order is chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Current UTC time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Fresh opaque identifier (UUID v4).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Sex of a listed dog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Gender {
    Male,
    Female,
}

/// Sale status of a listing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Availability {
    Available,
    Sold,
}

/// A dog-for-sale record as persisted in the `dogs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub breed: String,
    /// Age in months.
    pub age: u32,
    pub gender: Gender,
    pub price: f64,
    pub availability: Availability,
    pub description: Option<String>,
    pub location: String,
    /// Inline encoded image (base64 PNG), see `pawmarket-image`.
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Dog {
    /// Copies the mutable fields (everything except id, image and timestamps).
    pub fn fields(&self) -> DogFields {
        DogFields {
            breed: self.breed.clone(),
            age: self.age,
            gender: self.gender,
            price: self.price,
            availability: self.availability,
            description: self.description.clone(),
            location: self.location.clone(),
        }
    }
}

/// Edit command carrying every mutable listing field except the image.
///
/// Used for both create and update; updates always overwrite all of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogFields {
    pub breed: String,
    pub age: u32,
    pub gender: Gender,
    pub price: f64,
    pub availability: Availability,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
}

/// A buyer's contact request about a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: String,
    /// Weak reference: may point at a listing that no longer exists.
    pub dog_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
}

/// Input for creating an inquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInquiry {
    pub dog_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
