// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing store trait for persistence backends (SQLite, etc.).

use async_trait::async_trait;

use crate::error::PawmarketError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Dog, DogFields, Inquiry, NewInquiry};

/// Durable storage for dog listings and buyer inquiries.
///
/// Every call is atomic in isolation. There is no transaction spanning
/// multiple calls: concurrent updates or deletes on the same id race and the
/// last writer wins.
#[async_trait]
pub trait ListingStore: PluginAdapter {
    /// Initializes the backend (open handle, apply schema).
    async fn initialize(&self) -> Result<(), PawmarketError>;

    /// Flushes pending writes and releases the backend.
    async fn close(&self) -> Result<(), PawmarketError>;

    /// All listings, newest `created_at` first.
    async fn list_dogs(&self) -> Result<Vec<Dog>, PawmarketError>;

    /// A single listing by id.
    async fn get_dog(&self, id: &str) -> Result<Option<Dog>, PawmarketError>;

    /// Persists a new listing and returns its generated id.
    async fn create_dog(
        &self,
        fields: DogFields,
        image: Option<String>,
    ) -> Result<String, PawmarketError>;

    /// Overwrites every mutable field. The stored image is replaced only when
    /// `new_image` is `Some`. Returns [`PawmarketError::NotFound`] when `id`
    /// does not exist.
    async fn update_dog(
        &self,
        id: &str,
        fields: DogFields,
        new_image: Option<String>,
    ) -> Result<(), PawmarketError>;

    /// Removes a listing. Returns `false` when nothing was removed.
    /// Inquiries referencing the listing are kept.
    async fn delete_dog(&self, id: &str) -> Result<bool, PawmarketError>;

    /// Persists a new inquiry and returns its generated id.
    async fn create_inquiry(&self, inquiry: NewInquiry) -> Result<String, PawmarketError>;

    /// All inquiries, newest first.
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, PawmarketError>;
}
