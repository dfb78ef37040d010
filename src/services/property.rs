use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{new_id, next_timestamp, NewProperty, Property, PropertyPatch};
use crate::services::traits::EntityService;
use crate::services::types::SearchFilters;
use crate::store::{Operation, RecordStore};

/// Property listings over an injected record store
#[derive(Debug, Clone)]
pub struct PropertyService {
    store: Arc<RecordStore<Property>>,
}

impl PropertyService {
    pub fn new(store: Arc<RecordStore<Property>>) -> Self {
        Self { store }
    }

    /// Properties matching every supplied filter. Never mutates the store.
    pub async fn search_properties(&self, filters: &SearchFilters) -> Vec<Property> {
        let results = self
            .store
            .select(Operation::Query, |p| filters.matches(p))
            .await;
        debug!(?filters, matched = results.len(), "property search");
        results
    }
}

#[async_trait]
impl EntityService for PropertyService {
    type Entity = Property;
    type New = NewProperty;
    type Patch = PropertyPatch;

    async fn get_all(&self) -> Vec<Property> {
        self.store.all().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Property> {
        self.store
            .get(id)
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    async fn create(&self, data: NewProperty) -> Result<Property> {
        let property = data.into_record(new_id(), Utc::now());
        let stored = self.store.insert(property).await?;
        info!(
            entity = self.entity_name(),
            id = %stored.id,
            title = %stored.title,
            "created"
        );
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: PropertyPatch) -> Result<Property> {
        let updated = self
            .store
            .modify(id, Operation::Update, move |property| {
                patch.apply(property);
                property.updated_at = next_timestamp(property.updated_at);
            })
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))?;
        debug!(id = %updated.id, "updated property");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<Property> {
        let removed = self
            .store
            .remove(id)
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))?;
        info!(entity = self.entity_name(), id = %removed.id, "deleted");
        Ok(removed)
    }

    fn entity_name(&self) -> &'static str {
        "property"
    }
}
