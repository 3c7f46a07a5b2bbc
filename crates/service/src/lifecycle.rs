//! Entity lifecycle manager: one patch-update workflow shared by every
//! entity type instead of per-type duplicated logic.

use chrono::Utc;
use models::record::Record;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::store::RecordStore;

pub async fn create<R, S>(store: &S, record: R) -> Result<R, ServiceError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    let created = store.create(record).await?;
    debug!(kind = R::KIND, id = %created.id(), "record created");
    Ok(created)
}

pub async fn get<R, S>(store: &S, id: Uuid) -> Result<R, ServiceError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    store.get(id).await?.ok_or_else(|| ServiceError::not_found(R::KIND))
}

/// Patch-update workflow: fetch, merge, persist, return the merged record.
///
/// NotFound short-circuits before any mutation. Only keys present in the
/// patch overwrite fields; a persistence failure surfaces as-is with no
/// rollback of the in-memory merge.
pub async fn patch<R, S>(store: &S, id: Uuid, patch: R::Patch) -> Result<R, ServiceError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    let mut record = store.get(id).await?.ok_or_else(|| ServiceError::not_found(R::KIND))?;
    record.apply(patch)?;
    record.touch(Utc::now().into());
    let updated = store.update(record).await?;
    debug!(kind = R::KIND, id = %updated.id(), "record patched");
    Ok(updated)
}

/// Soft delete: the tombstoned record stays retrievable by id but drops out
/// of default listings.
pub async fn delete<R, S>(store: &S, id: Uuid) -> Result<R, ServiceError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    store.get(id).await?.ok_or_else(|| ServiceError::not_found(R::KIND))?;
    let deleted = store.delete(id).await?;
    debug!(kind = R::KIND, id = %deleted.id(), "record tombstoned");
    Ok(deleted)
}

pub async fn list<R, S>(store: &S) -> Result<Vec<R>, ServiceError>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    store.list().await
}
