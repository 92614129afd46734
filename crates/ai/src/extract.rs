//! Pull structured JSON out of free-form model output.
//!
//! Models wrap JSON in prose or code fences. We take the span from the first
//! opening bracket to the last closing one and try to deserialize it.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));
static OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Deserialize the first JSON array found in `text`.
pub fn json_array<T: DeserializeOwned>(text: &str) -> Option<T> {
    let m = ARRAY_RE.find(text)?;
    serde_json::from_str(m.as_str()).ok()
}

/// Deserialize the first JSON object found in `text`.
pub fn json_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    let m = OBJECT_RE.find(text)?;
    serde_json::from_str(m.as_str()).ok()
}
