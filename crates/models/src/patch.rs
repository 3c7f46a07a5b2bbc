//! Tri-state patch fields distinguishing an omitted key from an explicit null.
//!
//! Partial updates behave like PATCH, not PUT: a key that is absent from the
//! request body leaves the stored value untouched, while an explicit `null`
//! clears it. `Option<T>` cannot express that difference, so patch structs use
//! `Field<T>` with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field<T> {
    /// Key was not present in the request body.
    #[default]
    Absent,
    /// Key was present with an explicit `null` value.
    Null,
    /// Key was present with a concrete value.
    Set(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; serde(default) covers absence.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Field::Set(v),
            None => Field::Null,
        })
    }
}
