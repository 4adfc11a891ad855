// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Buyer-facing listing filters.
//!
//! [`Criteria`] holds the active constraints; an unset field places no
//! constraint on that attribute. All set fields combine with AND and every
//! range is inclusive on both ends. [`FilterBounds`] describes the value
//! ranges present in a listing snapshot and seeds the "show everything"
//! criteria.

use std::collections::BTreeSet;
use std::str::FromStr;

use pawmarket_core::{Availability, Dog, PawmarketError};
use serde::{Deserialize, Serialize};

/// Query-string value meaning "no constraint".
pub const ALL: &str = "All";

/// Upper age bound offered when there are no listings to derive one from.
pub const FALLBACK_MAX_AGE: u32 = 10;

/// Active filter constraints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    pub breed: Option<String>,
    pub location: Option<String>,
    pub availability: Option<Availability>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
}

impl Criteria {
    /// Criteria covering the full range of `bounds`. Applied to the listings
    /// the bounds were derived from, it keeps every one of them.
    pub fn spanning(bounds: &FilterBounds) -> Self {
        Self {
            breed: None,
            location: None,
            availability: None,
            min_price: Some(bounds.min_price),
            max_price: Some(bounds.max_price),
            min_age: Some(bounds.min_age),
            max_age: Some(bounds.max_age),
        }
    }

    /// Whether a single listing satisfies every set constraint.
    pub fn matches(&self, dog: &Dog) -> bool {
        if let Some(breed) = &self.breed {
            if dog.breed != *breed {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if dog.location != *location {
                return false;
            }
        }
        if let Some(availability) = self.availability {
            if dog.availability != availability {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| dog.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| dog.price > max) {
            return false;
        }
        if self.min_age.is_some_and(|min| dog.age < min) {
            return false;
        }
        if self.max_age.is_some_and(|max| dog.age > max) {
            return false;
        }
        true
    }
}

/// Listings satisfying `criteria`, in their original order.
pub fn filter(listings: &[Dog], criteria: &Criteria) -> Vec<Dog> {
    listings
        .iter()
        .filter(|dog| criteria.matches(dog))
        .cloned()
        .collect()
}

/// Value ranges present in a listing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterBounds {
    /// Distinct breeds, sorted.
    pub breeds: Vec<String>,
    /// Distinct locations, sorted.
    pub locations: Vec<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            breeds: Vec::new(),
            locations: Vec::new(),
            min_price: 0.0,
            max_price: 0.0,
            min_age: 0,
            max_age: FALLBACK_MAX_AGE,
        }
    }
}

impl FilterBounds {
    /// Derive bounds from `listings`, or `None` when there are none.
    ///
    /// Prices are widened to whole units (floor of the minimum, ceiling of
    /// the maximum). The age range always starts at zero.
    pub fn derive(listings: &[Dog]) -> Option<Self> {
        let first = listings.first()?;

        let mut breeds = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut min_price = first.price;
        let mut max_price = first.price;
        let mut max_age = first.age;

        for dog in listings {
            breeds.insert(dog.breed.clone());
            locations.insert(dog.location.clone());
            min_price = min_price.min(dog.price);
            max_price = max_price.max(dog.price);
            max_age = max_age.max(dog.age);
        }

        Some(Self {
            breeds: breeds.into_iter().collect(),
            locations: locations.into_iter().collect(),
            min_price: min_price.floor(),
            max_price: max_price.ceil(),
            min_age: 0,
            max_age,
        })
    }
}

/// Raw filter parameters as they arrive in a query string.
///
/// Every field is free text; [`CriteriaQuery::into_criteria`] interprets the
/// `"All"` sentinel and parses the numeric ranges.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriteriaQuery {
    pub breed: Option<String>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

impl CriteriaQuery {
    /// Interpret the raw parameters. `"All"` and blank values mean no
    /// constraint; unparseable values are validation errors.
    pub fn into_criteria(self) -> Result<Criteria, PawmarketError> {
        let availability = match unset_if_all(self.availability) {
            Some(raw) => Some(Availability::from_str(&raw).map_err(|_| {
                PawmarketError::validation("availability", format!("unknown value `{raw}`"))
            })?),
            None => None,
        };

        Ok(Criteria {
            breed: unset_if_all(self.breed),
            location: unset_if_all(self.location),
            availability,
            min_price: parse_price("min_price", self.min_price)?,
            max_price: parse_price("max_price", self.max_price)?,
            min_age: parse_number("min_age", self.min_age)?,
            max_age: parse_number("max_age", self.max_age)?,
        })
    }
}

fn unset_if_all(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != ALL)
}

fn parse_number<T: FromStr>(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<T>, PawmarketError> {
    unset_if_all(value)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| PawmarketError::validation(field, format!("not a number: `{raw}`")))
        })
        .transpose()
}

fn parse_price(field: &'static str, value: Option<String>) -> Result<Option<f64>, PawmarketError> {
    let price: Option<f64> = parse_number(field, value)?;
    match price {
        Some(p) if !p.is_finite() => Err(PawmarketError::validation(field, "must be finite")),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawmarket_core::Gender;

    fn dog(id: &str, breed: &str, location: &str, price: f64, age: u32) -> Dog {
        Dog {
            id: id.to_string(),
            breed: breed.to_string(),
            age,
            gender: Gender::Female,
            price,
            availability: Availability::Available,
            description: None,
            location: location.to_string(),
            image: None,
            created_at: "2026-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2026-01-01T00:00:00.000000Z".to_string(),
        }
    }

    fn sample() -> Vec<Dog> {
        vec![
            dog("a", "Beagle", "NY", 500.0, 6),
            dog("b", "Poodle", "LA", 900.0, 12),
        ]
    }

    fn ids(dogs: &[Dog]) -> Vec<&str> {
        dogs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn breed_filter_selects_exact_match() {
        let criteria = Criteria {
            breed: Some("Beagle".to_string()),
            ..Criteria::default()
        };
        assert_eq!(ids(&filter(&sample(), &criteria)), vec!["a"]);
    }

    #[test]
    fn breed_filter_is_case_sensitive() {
        let criteria = Criteria {
            breed: Some("beagle".to_string()),
            ..Criteria::default()
        };
        assert!(filter(&sample(), &criteria).is_empty());
    }

    #[test]
    fn price_range_excludes_out_of_range_listing() {
        let criteria = Criteria {
            min_price: Some(0.0),
            max_price: Some(600.0),
            ..Criteria::default()
        };
        assert_eq!(ids(&filter(&sample(), &criteria)), vec!["a"]);
    }

    #[test]
    fn ranges_are_inclusive() {
        let criteria = Criteria {
            min_price: Some(500.0),
            max_price: Some(900.0),
            min_age: Some(6),
            max_age: Some(12),
            ..Criteria::default()
        };
        assert_eq!(ids(&filter(&sample(), &criteria)), vec!["a", "b"]);
    }

    #[test]
    fn availability_filter_hides_sold_listings() {
        let mut dogs = sample();
        dogs[1].availability = Availability::Sold;
        let criteria = Criteria {
            availability: Some(Availability::Available),
            ..Criteria::default()
        };
        assert_eq!(ids(&filter(&dogs, &criteria)), vec!["a"]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let criteria = Criteria {
            breed: Some("Poodle".to_string()),
            location: Some("NY".to_string()),
            ..Criteria::default()
        };
        assert!(filter(&sample(), &criteria).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filter(&[], &Criteria::default()).is_empty());
    }

    #[test]
    fn derive_on_empty_is_none() {
        assert!(FilterBounds::derive(&[]).is_none());
        let fallback = FilterBounds::default();
        assert_eq!(fallback.max_age, FALLBACK_MAX_AGE);
        assert_eq!((fallback.min_price, fallback.max_price), (0.0, 0.0));
    }

    #[test]
    fn derive_sorts_and_widens() {
        let dogs = vec![
            dog("a", "Poodle", "NY", 499.5, 6),
            dog("b", "Beagle", "LA", 900.25, 12),
            dog("c", "Beagle", "NY", 700.0, 3),
        ];
        let bounds = FilterBounds::derive(&dogs).unwrap();
        assert_eq!(bounds.breeds, vec!["Beagle", "Poodle"]);
        assert_eq!(bounds.locations, vec!["LA", "NY"]);
        assert_eq!(bounds.min_price, 499.0);
        assert_eq!(bounds.max_price, 901.0);
        assert_eq!((bounds.min_age, bounds.max_age), (0, 12));
    }

    #[test]
    fn spanning_criteria_keep_everything() {
        let dogs = sample();
        let bounds = FilterBounds::derive(&dogs).unwrap();
        assert_eq!(filter(&dogs, &Criteria::spanning(&bounds)), dogs);
    }

    #[test]
    fn query_all_sentinel_means_unset() {
        let query = CriteriaQuery {
            breed: Some("All".to_string()),
            location: Some(String::new()),
            availability: Some("All".to_string()),
            ..CriteriaQuery::default()
        };
        assert_eq!(query.into_criteria().unwrap(), Criteria::default());
    }

    #[test]
    fn query_parses_values() {
        let query = CriteriaQuery {
            breed: Some("Beagle".to_string()),
            availability: Some("Sold".to_string()),
            min_price: Some("10.5".to_string()),
            max_age: Some("24".to_string()),
            ..CriteriaQuery::default()
        };
        let criteria = query.into_criteria().unwrap();
        assert_eq!(criteria.breed.as_deref(), Some("Beagle"));
        assert_eq!(criteria.availability, Some(Availability::Sold));
        assert_eq!(criteria.min_price, Some(10.5));
        assert_eq!(criteria.max_age, Some(24));
    }

    #[test]
    fn query_rejects_garbage() {
        let bad_age = CriteriaQuery {
            min_age: Some("six".to_string()),
            ..CriteriaQuery::default()
        };
        assert!(matches!(
            bad_age.into_criteria(),
            Err(PawmarketError::Validation { field: "min_age", .. })
        ));

        let bad_availability = CriteriaQuery {
            availability: Some("Reserved".to_string()),
            ..CriteriaQuery::default()
        };
        assert!(matches!(
            bad_availability.into_criteria(),
            Err(PawmarketError::Validation { field: "availability", .. })
        ));

        let infinite = CriteriaQuery {
            max_price: Some("inf".to_string()),
            ..CriteriaQuery::default()
        };
        assert!(infinite.into_criteria().is_err());
    }
}
