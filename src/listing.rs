use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{
    Address, Coordinates, ListingType, NewInquiry, NewProperty, PropertyType,
};

/// Amenity labels offered by the listing form
pub const POPULAR_AMENITIES: [&str; 10] = [
    "Swimming Pool",
    "Gym",
    "Parking",
    "Balcony",
    "Garden",
    "Fireplace",
    "Air Conditioning",
    "Dishwasher",
    "Laundry",
    "Security System",
];

/// Stock photos attached to every new listing
pub const DEFAULT_IMAGES: [&str; 2] = [
    "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?auto=format&fit=crop&w=800&q=80",
];

/// Agent new listings are assigned to
pub const DEFAULT_AGENT_ID: &str = "agent-1";

/// Map origin for new listings, lower Manhattan
pub const MAP_ORIGIN: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.0060,
};

/// Total width, in degrees, of the square new listings are scattered over
const JITTER_SPAN: f64 = 0.1;

impl Coordinates {
    /// A point within `span / 2` degrees of `origin` on each axis
    pub fn jittered(origin: Coordinates, span: f64, rng: &mut impl Rng) -> Self {
        Self {
            lat: origin.lat + (rng.gen::<f64>() - 0.5) * span,
            lng: origin.lng + (rng.gen::<f64>() - 0.5) * span,
        }
    }
}

/// Create-listing form, numeric fields still as typed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingForm {
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub price: String,
    pub address: Address,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub description: String,
    pub amenities: Vec<String>,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            property_type: PropertyType::Residential,
            listing_type: ListingType::Sale,
            price: String::new(),
            address: Address::default(),
            bedrooms: String::new(),
            bathrooms: String::new(),
            area: String::new(),
            description: String::new(),
            amenities: Vec::new(),
        }
    }
}

impl ListingForm {
    /// Select the amenity if absent, deselect it if present. Only labels
    /// from [`POPULAR_AMENITIES`] are accepted; returns false otherwise.
    pub fn toggle_amenity(&mut self, amenity: &str) -> bool {
        if !POPULAR_AMENITIES.contains(&amenity) {
            return false;
        }
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
        true
    }

    /// Parse the form into a creation payload
    pub fn into_new_property(self, rng: &mut impl Rng) -> Result<NewProperty> {
        let price: f64 = self
            .price
            .trim()
            .parse()
            .with_context(|| format!("Invalid price: {:?}", self.price))?;
        let bedrooms = parse_count("bedrooms", &self.bedrooms)?;
        let bathrooms = parse_count("bathrooms", &self.bathrooms)?;
        let area = parse_count("area", &self.area)?;

        Ok(NewProperty {
            title: self.title,
            property_type: self.property_type,
            listing_type: self.listing_type,
            price,
            address: self.address,
            bedrooms,
            bathrooms,
            area,
            description: self.description,
            amenities: self.amenities,
            images: DEFAULT_IMAGES.iter().map(|url| url.to_string()).collect(),
            coordinates: Coordinates::jittered(MAP_ORIGIN, JITTER_SPAN, rng),
            agent_id: DEFAULT_AGENT_ID.to_string(),
        })
    }
}

fn parse_count(field: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {}: {:?}", field, raw))
}

/// Contact form on a property's detail view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl InquiryForm {
    pub fn into_new_inquiry(self, property_id: &str, user_id: Option<&str>) -> NewInquiry {
        NewInquiry {
            property_id: property_id.to_string(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            message: self.message,
            user_id: user_id.map(str::to_string),
        }
    }
}
