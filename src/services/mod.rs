pub mod inquiry;
pub mod property;
pub mod traits;
pub mod types;
pub mod user;

pub use inquiry::InquiryService;
pub use property::PropertyService;
pub use traits::EntityService;
pub use types::SearchFilters;
pub use user::UserService;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::error;
use crate::models::Property;
use crate::store::{fixtures, LatencySimulator, RecordStore};

/// The three entity services, each over its own injected store
#[derive(Debug, Clone)]
pub struct Services {
    pub properties: PropertyService,
    pub inquiries: InquiryService,
    pub users: UserService,
}

impl Services {
    pub fn new(properties: PropertyService, inquiries: InquiryService, users: UserService) -> Self {
        Self {
            properties,
            inquiries,
            users,
        }
    }

    /// Build every store from the embedded fixtures
    pub fn seeded(config: &AppConfig) -> Result<Self> {
        let latency = LatencySimulator::new(config.latency.clone());

        let properties = RecordStore::seeded(fixtures::PROPERTIES, latency.clone())?;
        let inquiries = RecordStore::seeded(fixtures::INQUIRIES, latency.clone())?;
        let users = RecordStore::seeded(fixtures::USERS, latency)?;

        Ok(Self::new(
            PropertyService::new(Arc::new(properties)),
            InquiryService::new(Arc::new(inquiries)),
            UserService::new(Arc::new(users)),
        ))
    }

    /// Delete a property along with everything that points at it: its
    /// inquiries, and its id in every user's saved and listed properties.
    pub async fn delete_property_cascade(&self, id: &str) -> error::Result<Property> {
        let removed = self.properties.delete(id).await?;
        let inquiries = self.inquiries.delete_by_property_id(id).await?;
        let users = self.users.forget_property(id).await?;
        info!(
            id,
            inquiries = inquiries.len(),
            users,
            "deleted property and its references"
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntityKind;

    fn services() -> Services {
        Services::seeded(&AppConfig::without_latency()).unwrap()
    }

    #[tokio::test]
    async fn cascade_removes_dangling_references() {
        let services = services();

        let removed = services.delete_property_cascade("1").await.unwrap();
        assert_eq!(removed.id, "1");

        assert!(services.inquiries.get_by_property_id("1").await.is_empty());
        for user in services.users.get_all().await {
            assert!(!user.saved_properties.iter().any(|id| id == "1"));
        }
        assert_eq!(services.inquiries.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn cascade_on_unknown_property_changes_nothing() {
        let services = services();

        let err = services.delete_property_cascade("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(services.inquiries.get_all().await.len(), 3);
    }

    #[test]
    fn entity_names_match_store_kinds() {
        let services = services();
        let name = |kind: EntityKind| kind.to_string().to_lowercase();
        assert_eq!(services.properties.entity_name(), name(EntityKind::Property));
        assert_eq!(services.inquiries.entity_name(), name(EntityKind::Inquiry));
        assert_eq!(services.users.entity_name(), name(EntityKind::User));
    }

    #[tokio::test]
    async fn plain_delete_keeps_inquiries() {
        let services = services();
        services.properties.delete("1").await.unwrap();
        assert_eq!(services.inquiries.get_by_property_id("1").await.len(), 2);
    }
}
