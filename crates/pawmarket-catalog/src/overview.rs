// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin dashboard metrics.

use std::collections::HashMap;

use pawmarket_core::{Availability, Dog};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreedCount {
    pub breed: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityCount {
    pub availability: Availability,
    pub count: usize,
}

/// Summary counts shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_dogs: usize,
    pub available: usize,
    pub sold: usize,
    pub total_inquiries: usize,
    /// Listings per breed, most common first, ties by breed name.
    pub by_breed: Vec<BreedCount>,
    /// One entry per availability state, including empty ones.
    pub by_availability: Vec<AvailabilityCount>,
}

impl Overview {
    pub fn compute(dogs: &[Dog], inquiry_count: usize) -> Self {
        let available = dogs
            .iter()
            .filter(|d| d.availability == Availability::Available)
            .count();
        let sold = dogs.len() - available;

        let mut per_breed: HashMap<&str, usize> = HashMap::new();
        for dog in dogs {
            *per_breed.entry(dog.breed.as_str()).or_default() += 1;
        }
        let mut by_breed: Vec<BreedCount> = per_breed
            .into_iter()
            .map(|(breed, count)| BreedCount {
                breed: breed.to_string(),
                count,
            })
            .collect();
        by_breed.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.breed.cmp(&b.breed)));

        Self {
            total_dogs: dogs.len(),
            available,
            sold,
            total_inquiries: inquiry_count,
            by_breed,
            by_availability: vec![
                AvailabilityCount {
                    availability: Availability::Available,
                    count: available,
                },
                AvailabilityCount {
                    availability: Availability::Sold,
                    count: sold,
                },
            ],
        }
    }
}
