//! Record store adapter: the persistence seam the rest of the service layer
//! depends on abstractly. Backed by SeaORM in production and by an in-memory
//! map in tests.

use async_trait::async_trait;
use models::record::Record;
use uuid::Uuid;

use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

/// Minimal persistence capability set, polymorphic over entity type.
///
/// `update` persists a complete record that the caller already merged; the
/// existence re-check it implies is not atomic against concurrent deletes
/// from other connections. Coordination is delegated to the backing store's
/// own concurrency control.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Fetch by id, tombstoned records included.
    async fn get(&self, id: Uuid) -> Result<Option<R>, ServiceError>;

    async fn create(&self, record: R) -> Result<R, ServiceError>;

    /// Persist a merged record; NotFound when the row has vanished.
    async fn update(&self, record: R) -> Result<R, ServiceError>;

    /// Soft delete: mark a tombstone and return the marked record.
    async fn delete(&self, id: Uuid) -> Result<R, ServiceError>;

    /// Default listing, tombstoned records excluded.
    async fn list(&self) -> Result<Vec<R>, ServiceError>;
}
