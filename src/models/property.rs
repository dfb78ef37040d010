use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EntityKind;
use crate::store::Record;

/// Residential or commercial use
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Residential,
    Commercial,
}

/// Whether the property is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Sale,
    Rent,
}

/// Postal address, free text with no geocoding validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Approximate map position. Decorative only, never geocoded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Core property listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub price: f64,
    pub address: Address,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: u32,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub coordinates: Coordinates,
    pub agent_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn formatted_price(&self) -> String {
        format_usd(self.price)
    }
}

impl Record for Property {
    const KIND: EntityKind = EntityKind::Property;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Everything a caller supplies when listing a new property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub listing_type: ListingType,
    pub price: f64,
    pub address: Address,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: u32,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub coordinates: Coordinates,
    pub agent_id: String,
}

impl NewProperty {
    /// Stamp the payload with an id and a creation time
    pub fn into_record(self, id: String, now: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            property_type: self.property_type,
            listing_type: self.listing_type,
            price: self.price,
            address: self.address,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            description: self.description,
            amenities: self.amenities,
            images: self.images,
            coordinates: self.coordinates,
            agent_id: self.agent_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a property. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub listing_type: Option<ListingType>,
    pub price: Option<f64>,
    pub address: Option<Address>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<u32>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub coordinates: Option<Coordinates>,
    pub agent_id: Option<String>,
}

impl PropertyPatch {
    /// Shallow merge: supplied fields replace the stored ones whole.
    pub fn apply(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(listing_type) = self.listing_type {
            property.listing_type = listing_type;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(address) = self.address {
            property.address = address;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(area) = self.area {
            property.area = area;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(amenities) = self.amenities {
            property.amenities = amenities;
        }
        if let Some(images) = self.images {
            property.images = images;
        }
        if let Some(coordinates) = self.coordinates {
            property.coordinates = coordinates;
        }
        if let Some(agent_id) = self.agent_id {
            property.agent_id = agent_id;
        }
    }
}

/// Render a price as whole US dollars, e.g. `$1,250,000`
pub fn format_usd(price: f64) -> String {
    let rounded = price.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn formats_prices_with_thousands_separators() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(950.0), "$950");
        assert_eq!(format_usd(1250000.0), "$1,250,000");
        assert_eq!(format_usd(2499.6), "$2,500");
    }

    #[test]
    fn deserializes_fixture_schema() {
        let value = json!({
            "id": "p-1",
            "title": "Lake House",
            "type": "residential",
            "listingType": "sale",
            "price": 150000,
            "address": { "street": "1 Shore Rd", "city": "Reno", "state": "NV", "zipCode": "89501" },
            "bedrooms": 3,
            "bathrooms": 2,
            "area": 1800,
            "description": "By the water",
            "amenities": ["Garden"],
            "images": [],
            "coordinates": { "lat": 39.5, "lng": -119.8 },
            "agentId": "agent-1",
            "createdAt": "2024-01-15T10:00:00Z",
            "updatedAt": "2024-01-15T10:00:00Z"
        });

        let property: Property = serde_json::from_value(value).unwrap();
        assert_eq!(property.property_type, PropertyType::Residential);
        assert_eq!(property.listing_type, ListingType::Sale);
        assert_eq!(property.address.zip_code, "89501");
        assert_eq!(property.formatted_price(), "$150,000");
    }

    #[test]
    fn patch_replaces_address_as_a_whole() {
        let now = Utc::now();
        let mut property = NewProperty {
            title: "Loft".into(),
            property_type: PropertyType::Commercial,
            listing_type: ListingType::Rent,
            price: 4000.0,
            address: Address {
                street: "9 Main St".into(),
                city: "Austin".into(),
                state: "TX".into(),
                zip_code: "78701".into(),
            },
            bedrooms: 0,
            bathrooms: 1,
            area: 900,
            description: String::new(),
            amenities: vec![],
            images: vec![],
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            agent_id: "agent-1".into(),
        }
        .into_record("p".into(), now);

        PropertyPatch {
            address: Some(Address {
                city: "Dallas".into(),
                ..Address::default()
            }),
            ..PropertyPatch::default()
        }
        .apply(&mut property);

        assert_eq!(property.address.city, "Dallas");
        assert_eq!(property.address.street, "");
        assert_eq!(property.title, "Loft");
    }
}
