use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{new_id, next_timestamp, Inquiry, InquiryPatch, NewInquiry};
use crate::services::traits::EntityService;
use crate::store::{Operation, RecordStore};

#[derive(Debug, Clone)]
pub struct InquiryService {
    store: Arc<RecordStore<Inquiry>>,
}

impl InquiryService {
    pub fn new(store: Arc<RecordStore<Inquiry>>) -> Self {
        Self { store }
    }

    pub async fn get_by_property_id(&self, property_id: &str) -> Vec<Inquiry> {
        self.store
            .select(Operation::Query, |i| i.property_id == property_id)
            .await
    }

    pub async fn get_by_user_id(&self, user_id: &str) -> Vec<Inquiry> {
        self.store
            .select(Operation::Query, |i| i.user_id.as_deref() == Some(user_id))
            .await
    }

    /// Remove every inquiry about `property_id`
    pub async fn delete_by_property_id(&self, property_id: &str) -> Result<Vec<Inquiry>> {
        let property_id = property_id.to_string();
        let removed = self
            .store
            .remove_where(move |i| i.property_id == property_id)
            .await?;
        debug!(count = removed.len(), "deleted inquiries for property");
        Ok(removed)
    }
}

#[async_trait]
impl EntityService for InquiryService {
    type Entity = Inquiry;
    type New = NewInquiry;
    type Patch = InquiryPatch;

    async fn get_all(&self) -> Vec<Inquiry> {
        self.store.all().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Inquiry> {
        self.store
            .get(id)
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    async fn create(&self, data: NewInquiry) -> Result<Inquiry> {
        let inquiry = data.into_record(new_id(), Utc::now());
        let stored = self.store.insert(inquiry).await?;
        info!(
            entity = self.entity_name(),
            id = %stored.id,
            property_id = %stored.property_id,
            "created"
        );
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: InquiryPatch) -> Result<Inquiry> {
        self.store
            .modify(id, Operation::Update, move |inquiry| {
                patch.apply(inquiry);
                let previous = inquiry.updated_at.unwrap_or(inquiry.timestamp);
                inquiry.updated_at = Some(next_timestamp(previous));
            })
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    async fn delete(&self, id: &str) -> Result<Inquiry> {
        self.store
            .remove(id)
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    fn entity_name(&self) -> &'static str {
        "inquiry"
    }
}
