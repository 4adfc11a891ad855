// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thumbnail, PNG and base64 conversions for listing photos.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use pawmarket_core::PawmarketError;
use tracing::warn;

/// Placeholder dimensions, matching the listing card image slot.
const PLACEHOLDER_WIDTH: u32 = 300;
const PLACEHOLDER_HEIGHT: u32 = 200;
const PLACEHOLDER_GREY: Rgb<u8> = Rgb([204, 204, 204]);

/// Largest stored thumbnail size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailBounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for ThumbnailBounds {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
        }
    }
}

impl ThumbnailBounds {
    fn contains(&self, image: &DynamicImage) -> bool {
        image.width() <= self.max_width && image.height() <= self.max_height
    }
}

/// Shrink `image` to fit within `bounds`, keeping its aspect ratio.
///
/// Never enlarges. Pixel formats PNG cannot hold (32-bit float) are
/// converted to RGBA8 so the result always survives a PNG round trip.
pub fn thumbnail(image: DynamicImage, bounds: ThumbnailBounds) -> DynamicImage {
    let image = match image {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        other => other,
    };

    if bounds.contains(&image) {
        return image;
    }
    image.resize(bounds.max_width, bounds.max_height, FilterType::Lanczos3)
}

/// Serialize an image as PNG.
pub fn to_png_bytes(image: &DynamicImage) -> Result<Vec<u8>, PawmarketError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| PawmarketError::Decode {
            message: format!("PNG encoding failed: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(buf)
}

/// Thumbnail `image` and render it as base64 PNG text for storage.
pub fn encode(image: DynamicImage, bounds: ThumbnailBounds) -> Result<String, PawmarketError> {
    let png = to_png_bytes(&thumbnail(image, bounds))?;
    Ok(STANDARD.encode(png))
}

/// Decode an uploaded PNG or JPEG file and [`encode`] it.
pub fn encode_upload(bytes: &[u8], bounds: ThumbnailBounds) -> Result<String, PawmarketError> {
    let image = image::load_from_memory(bytes).map_err(|e| PawmarketError::Decode {
        message: format!("unsupported or corrupt upload: {e}"),
        source: Some(Box::new(e)),
    })?;
    encode(image, bounds)
}

/// Parse stored image text back into an image.
pub fn decode(text: &str) -> Result<DynamicImage, PawmarketError> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| PawmarketError::Decode {
            message: format!("invalid base64: {e}"),
            source: Some(Box::new(e)),
        })?;
    image::load_from_memory(&bytes).map_err(|e| PawmarketError::Decode {
        message: format!("invalid image data: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Like [`decode`], but falls back to [`placeholder`] on bad data.
pub fn decode_or_placeholder(text: &str) -> DynamicImage {
    match decode(text) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "stored image unreadable, serving placeholder");
            placeholder()
        }
    }
}

/// Neutral grey stand-in for listings without a usable photo.
pub fn placeholder() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(
        PLACEHOLDER_WIDTH,
        PLACEHOLDER_HEIGHT,
        PLACEHOLDER_GREY,
    ))
}
