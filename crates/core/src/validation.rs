//! Field-level validation helpers shared by the resource modules.
//!
//! Errors are human-readable strings; handlers turn them into 400 responses.

/// Maximum length of short text fields (titles, names).
pub const MAX_TITLE_LENGTH: usize = 500;

/// Maximum length of a research question.
pub const MAX_QUERY_LENGTH: usize = 4000;

/// Validate that a required text field is present and non-blank.
///
/// Returns the trimmed value on success.
pub fn require_text(label: &str, value: &str) -> Result<String, String> {
    require_text_within(label, value, MAX_TITLE_LENGTH)
}

/// Like [`require_text`], with a caller-chosen length limit.
pub fn require_text_within(label: &str, value: &str, max: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{label} is required"));
    }
    if trimmed.chars().count() > max {
        return Err(format!("{label} must be at most {max} characters"));
    }
    Ok(trimmed.to_string())
}

/// Validate a research query.
pub fn require_query(value: &str) -> Result<String, String> {
    require_text_within("Query", value, MAX_QUERY_LENGTH)
}

/// Validate an optional replacement for a required text field.
///
/// `None` means "leave unchanged" and always passes.
pub fn require_text_if_present(label: &str, value: Option<&str>) -> Result<Option<String>, String> {
    value.map(|v| require_text(label, v)).transpose()
}

/// Validate that `value` is one of `allowed`.
pub fn validate_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {field} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}
