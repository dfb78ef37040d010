//! Seed documents for the record stores, embedded at compile time.

pub const PROPERTIES: &str = include_str!("../../fixtures/property.json");
pub const INQUIRIES: &str = include_str!("../../fixtures/inquiry.json");
pub const USERS: &str = include_str!("../../fixtures/user.json");
