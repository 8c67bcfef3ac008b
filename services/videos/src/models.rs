//! API models for request and response payloads

use serde::{Deserialize, Deserializer};

pub mod video;

/// Presence of one field in a JSON request body.
///
/// Partial updates must keep three input states apart: a field that was not
/// sent, a field sent as an explicit `null`, and a field sent with a value
/// (an empty string is a value). Plain `Option<T>` folds the first two
/// together, so request types wrap each updatable field in `Field<T>` with
/// `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// The field was not present in the input
    Absent,
    /// The field was present as an explicit `null`
    Null,
    /// The field was present with a value
    Set(T),
}

impl<T> Field<T> {
    /// Returns the supplied value, if any
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    /// Converts into `Some(value)` when a value was supplied, `None` otherwise
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Set(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
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
        // A missing field never reaches this impl; `#[serde(default)]`
        // yields `Absent`. A present field is either `null` or a value.
        match Option::<T>::deserialize(deserializer)? {
            Some(value) => Ok(Field::Set(value)),
            None => Ok(Field::Null),
        }
    }
}

/// Query parameters for paginated listing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    /// Page number (0-based)
    pub page: u32,
    /// Number of items per page; zero yields an empty page with totals
    pub size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}
