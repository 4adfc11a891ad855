// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Listing photo handling for PawMarket.
//!
//! Uploaded photos are shrunk to a bounded thumbnail, serialized as PNG and
//! stored inline as base64 text next to the listing row.

pub mod codec;

pub use codec::{
    ThumbnailBounds, decode, decode_or_placeholder, encode, encode_upload, placeholder, thumbnail,
    to_png_bytes,
};
