//! Partial-update support for nullable columns.
//!
//! A PUT body distinguishes three states for a nullable field:
//!
//! | JSON             | Rust                 | Effect             |
//! |------------------|----------------------|--------------------|
//! | field absent     | `None`               | keep current value |
//! | `"field": null`  | `Some(None)`         | clear the column   |
//! | `"field": value` | `Some(Some(value))`  | set the column     |
//!
//! Declare such fields as
//!
//! ```ignore
//! #[serde(default, deserialize_with = "storydesk_core::patch::double_option")]
//! pub notes: Option<Option<String>>,
//! ```

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) into `Some(..)`.
///
/// Must be combined with `#[serde(default)]` so an absent field stays `None`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Split a patch value into the `(is_set, value)` pair bound by repositories
/// as `CASE WHEN $n THEN $m ELSE column END`.
pub fn parts<T>(field: &Option<Option<T>>) -> (bool, Option<&T>) {
    match field {
        None => (false, None),
        Some(inner) => (true, inner.as_ref()),
    }
}
