use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::errors::ModelError;

/// Common shape of every persisted entity: a UUID identity, a soft-delete
/// tombstone, and a typed partial-update payload.
///
/// `apply` merges a patch into the record in memory; persistence is the
/// store's concern. Implementations re-establish their own invariants after
/// the merge (an appointment pairs `active` with `cancel_date_time`, an
/// invoice recomputes its status from the remaining balance).
pub trait Record: Clone + Send + Sync + 'static {
    type Patch: Send;

    /// Entity name used in error messages and logs.
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn deleted_at(&self) -> Option<DateTime<FixedOffset>>;
    fn mark_deleted(&mut self, at: DateTime<FixedOffset>);
    fn touch(&mut self, at: DateTime<FixedOffset>);
    fn apply(&mut self, patch: Self::Patch) -> Result<(), ModelError>;
}
