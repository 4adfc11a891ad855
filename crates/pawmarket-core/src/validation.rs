// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input validation run before any store call.
//!
//! Validators take their input by value and return a normalized copy:
//! surrounding whitespace is trimmed and blank optional text becomes `None`.

use crate::error::PawmarketError;
use crate::types::{DogFields, NewInquiry};

/// Upper bound for a listing's age in months.
pub const MAX_AGE_MONTHS: u32 = 120;

/// Validate and normalize listing fields for create or update.
pub fn validate_dog_fields(fields: DogFields) -> Result<DogFields, PawmarketError> {
    let breed = required("breed", fields.breed)?;
    let location = required("location", fields.location)?;

    if fields.age == 0 || fields.age > MAX_AGE_MONTHS {
        return Err(PawmarketError::validation(
            "age",
            format!("must be between 1 and {MAX_AGE_MONTHS} months, got {}", fields.age),
        ));
    }

    if !fields.price.is_finite() || fields.price < 0.0 {
        return Err(PawmarketError::validation(
            "price",
            format!("must be a non-negative amount, got {}", fields.price),
        ));
    }

    Ok(DogFields {
        breed,
        location,
        description: optional(fields.description),
        ..fields
    })
}

/// Validate and normalize an inquiry submission.
pub fn validate_inquiry(inquiry: NewInquiry) -> Result<NewInquiry, PawmarketError> {
    Ok(NewInquiry {
        dog_id: required("dog_id", inquiry.dog_id)?,
        name: required("name", inquiry.name)?,
        email: required("email", inquiry.email)?,
        phone: optional(inquiry.phone),
        message: optional(inquiry.message),
    })
}

fn required(field: &'static str, value: String) -> Result<String, PawmarketError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PawmarketError::validation(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
