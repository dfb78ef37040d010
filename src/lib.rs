//! Data-access layer for a property listing browser: in-memory record
//! stores with simulated network latency, CRUD services over them, and
//! the search and filter logic the listing views consume.

pub mod config;
pub mod error;
pub mod filters;
pub mod listing;
pub mod models;
pub mod services;
pub mod store;

pub use config::AppConfig;
pub use error::{EntityKind, StoreError};
pub use services::{EntityService, Services};
