use async_trait::async_trait;
use models::Record;

use crate::errors::ServiceError;
use crate::storage::entity_store::EntityStore;

/// Capability the HTTP layer consumes a store through.
///
/// Absence is reported in-band: `None` from `get_by_id`/`update`, `false`
/// from `delete`. `Err` only ever means the snapshot rewrite failed.
#[async_trait]
pub trait EntityRepository<T: Record>: Send + Sync {
    async fn list(&self) -> Vec<T>;
    async fn get_by_id(&self, id: &str) -> Option<T>;
    async fn create(&self, candidate: T) -> Result<T, ServiceError>;
    async fn update(&self, id: &str, candidate: T) -> Result<Option<T>, ServiceError>;
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
}

#[async_trait]
impl<T: Record> EntityRepository<T> for EntityStore<T> {
    async fn list(&self) -> Vec<T> { self.list().await }
    async fn get_by_id(&self, id: &str) -> Option<T> { self.get_by_id(id).await }
    async fn create(&self, candidate: T) -> Result<T, ServiceError> { self.create(candidate).await }
    async fn update(&self, id: &str, candidate: T) -> Result<Option<T>, ServiceError> { self.update(id, candidate).await }
    async fn delete(&self, id: &str) -> Result<bool, ServiceError> { self.delete(id).await }
}
