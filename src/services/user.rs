use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{new_id, next_timestamp, NewUser, User, UserPatch};
use crate::services::traits::EntityService;
use crate::store::{Operation, RecordStore};

#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<RecordStore<User>>,
}

impl UserService {
    pub fn new(store: Arc<RecordStore<User>>) -> Self {
        Self { store }
    }

    /// Add `property_id` to the user's saved set. Saving twice is a no-op.
    pub async fn save_property(&self, user_id: &str, property_id: &str) -> Result<User> {
        let property_id = property_id.to_string();
        self.store
            .modify(user_id, Operation::Membership, move |user| {
                if user.save(&property_id) {
                    debug!(user_id = %user.id, %property_id, "saved property");
                }
            })
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    /// Remove `property_id` from the user's saved set, if present.
    pub async fn unsave_property(&self, user_id: &str, property_id: &str) -> Result<User> {
        let property_id = property_id.to_string();
        self.store
            .modify(user_id, Operation::Membership, move |user| {
                if user.unsave(&property_id) {
                    debug!(user_id = %user.id, %property_id, "unsaved property");
                }
            })
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    /// Strip `property_id` from every user's saved and listed properties.
    /// Returns how many users held a reference.
    pub async fn forget_property(&self, property_id: &str) -> Result<usize> {
        let property_id = property_id.to_string();
        self.store
            .modify_each(Operation::Membership, move |user| user.forget(&property_id))
            .await
    }
}

#[async_trait]
impl EntityService for UserService {
    type Entity = User;
    type New = NewUser;
    type Patch = UserPatch;

    async fn get_all(&self) -> Vec<User> {
        self.store.all().await
    }

    async fn get_by_id(&self, id: &str) -> Result<User> {
        self.store
            .get(id)
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    async fn create(&self, data: NewUser) -> Result<User> {
        let user = data.into_record(new_id(), Utc::now());
        let stored = self.store.insert(user).await?;
        info!(entity = self.entity_name(), id = %stored.id, "created");
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User> {
        self.store
            .modify(id, Operation::Update, move |user| {
                patch.apply(user);
                let previous = user.updated_at.unwrap_or(user.created_at);
                user.updated_at = Some(next_timestamp(previous));
            })
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    async fn delete(&self, id: &str) -> Result<User> {
        self.store
            .remove(id)
            .await
            .inspect_err(|err| warn!(entity = self.entity_name(), "{}", err))
    }

    fn entity_name(&self) -> &'static str {
        "user"
    }
}
