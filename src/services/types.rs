use serde::{Deserialize, Serialize};

use crate::models::{ListingType, Property, PropertyType};

/// Server-side search criteria. Every supplied filter must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    /// Case-insensitive substring of the city or state
    pub location: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    pub property_type: Option<PropertyType>,
    pub listing_type: Option<ListingType>,
    /// Minimum number of bedrooms
    pub bedrooms: Option<u32>,
}

impl SearchFilters {
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            let needle = location.to_lowercase();
            let city = property.address.city.to_lowercase();
            let state = property.address.state.to_lowercase();
            if !city.contains(&needle) && !state.contains(&needle) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        if let Some(property_type) = self.property_type {
            if property.property_type != property_type {
                return false;
            }
        }
        if let Some(listing_type) = self.listing_type {
            if property.listing_type != listing_type {
                return false;
            }
        }
        if let Some(bedrooms) = self.bedrooms {
            if property.bedrooms < bedrooms {
                return false;
            }
        }
        true
    }

    /// Matching properties, original order kept
    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        properties
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures;

    fn seed() -> Vec<Property> {
        serde_json::from_str(fixtures::PROPERTIES).unwrap()
    }

    fn ids(properties: &[Property]) -> Vec<&str> {
        properties.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn empty_filters_keep_everything_in_order() {
        let properties = seed();
        assert_eq!(SearchFilters::default().apply(&properties), properties);
    }

    #[test]
    fn location_matches_city_or_state_ignoring_case() {
        let properties = seed();
        let by_state = SearchFilters {
            location: Some("ny".into()),
            ..Default::default()
        };
        assert_eq!(ids(&by_state.apply(&properties)), vec!["1", "2"]);

        let by_city = SearchFilters {
            location: Some("MIAMI".into()),
            ..Default::default()
        };
        assert_eq!(ids(&by_city.apply(&properties)), vec!["5"]);
    }

    #[test]
    fn empty_location_is_ignored() {
        let properties = seed();
        let filters = SearchFilters {
            location: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filters.apply(&properties).len(), properties.len());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let properties = seed();
        let filters = SearchFilters {
            min_price: Some(850000.0),
            max_price: Some(1250000.0),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&properties)), vec!["1", "5"]);
    }

    #[test]
    fn filters_are_anded() {
        let properties = seed();
        let filters = SearchFilters {
            property_type: Some(PropertyType::Residential),
            listing_type: Some(ListingType::Sale),
            bedrooms: Some(3),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&properties)), vec!["2", "5"]);
    }
}
