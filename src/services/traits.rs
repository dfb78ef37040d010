use async_trait::async_trait;

use crate::error::Result;

/// CRUD contract shared by every entity service.
///
/// Every method waits out the store's simulated latency before applying,
/// and every returned record is a copy the caller owns outright.
#[async_trait]
pub trait EntityService: Send + Sync {
    type Entity: Send;
    type New: Send;
    type Patch: Send;

    /// Every record, in insertion order
    async fn get_all(&self) -> Vec<Self::Entity>;

    async fn get_by_id(&self, id: &str) -> Result<Self::Entity>;

    /// Store a new record under a freshly generated id
    async fn create(&self, data: Self::New) -> Result<Self::Entity>;

    /// Shallow-merge `patch` over the stored record
    async fn update(&self, id: &str, patch: Self::Patch) -> Result<Self::Entity>;

    /// Remove the record and hand it back
    async fn delete(&self, id: &str) -> Result<Self::Entity>;

    /// Name of the entity kind, for logs
    fn entity_name(&self) -> &'static str;
}
