//! Interactive narrowing of an already-fetched property list.
//!
//! Unlike [`crate::services::SearchFilters`], this works on raw form input
//! and never touches a store. It is a pure function of the list and the
//! filter state, so running it on every keystroke or on demand gives the
//! same answer.

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::models::{ListingType, Property, PropertyType};

/// How many properties the landing page features
pub const FEATURED_COUNT: usize = 3;

/// Property type selector, where `"all"` matches every type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(PropertyType),
}

impl TypeFilter {
    pub fn matches(&self, property_type: PropertyType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == property_type,
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        match value.as_str() {
            "all" => Ok(TypeFilter::All),
            "residential" => Ok(TypeFilter::Only(PropertyType::Residential)),
            "commercial" => Ok(TypeFilter::Only(PropertyType::Commercial)),
            other => bail!("unknown property type filter: {}", other),
        }
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        match filter {
            TypeFilter::All => "all",
            TypeFilter::Only(PropertyType::Residential) => "residential",
            TypeFilter::Only(PropertyType::Commercial) => "commercial",
        }
        .to_string()
    }
}

/// Min/max price exactly as typed. Blank or non-numeric bounds are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceRange {
    pub min: String,
    pub max: String,
}

impl PriceRange {
    fn bound(raw: &str) -> Option<f64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn contains(&self, price: f64) -> bool {
        let above_min = Self::bound(&self.min).map_or(true, |min| price >= min);
        let below_max = Self::bound(&self.max).map_or(true, |max| price <= max);
        above_min && below_max
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_term: String,
    pub property_type: TypeFilter,
    pub price_range: PriceRange,
}

impl FilterState {
    /// Empty search term matches everything, otherwise a case-insensitive
    /// hit in the title, city or state.
    fn matches_search(&self, property: &Property) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        [
            &property.title,
            &property.address.city,
            &property.address.state,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.matches_search(property)
            && self.property_type.matches(property.property_type)
            && self.price_range.contains(property.price)
    }
}

pub fn filter_properties(properties: &[Property], state: &FilterState) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| state.matches(p))
        .cloned()
        .collect()
}

/// Leading properties shown in the hero section
pub fn featured(properties: &[Property]) -> &[Property] {
    &properties[..properties.len().min(FEATURED_COUNT)]
}

/// Headline counts over a property list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub total: usize,
    pub for_sale: usize,
    pub for_rent: usize,
    pub commercial: usize,
}

impl From<&[Property]> for ListingStats {
    fn from(properties: &[Property]) -> Self {
        properties.iter().fold(
            ListingStats {
                total: properties.len(),
                ..Default::default()
            },
            |mut stats, property| {
                match property.listing_type {
                    ListingType::Sale => stats.for_sale += 1,
                    ListingType::Rent => stats.for_rent += 1,
                }
                if property.property_type == PropertyType::Commercial {
                    stats.commercial += 1;
                }
                stats
            },
        )
    }
}
