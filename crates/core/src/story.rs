//! Story (investigation) status and progress rules.

use crate::validation::validate_one_of;

pub const STATUS_PLANNING: &str = "planning";
pub const STATUS_RESEARCHING: &str = "researching";
pub const STATUS_INTERVIEWING: &str = "interviewing";
pub const STATUS_WRITING: &str = "writing";
pub const STATUS_REVIEW: &str = "review";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_ARCHIVED: &str = "archived";

/// Status assigned to new stories when the client sends none.
pub const DEFAULT_STATUS: &str = STATUS_PLANNING;

/// All valid story statuses, in workflow order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PLANNING,
    STATUS_RESEARCHING,
    STATUS_INTERVIEWING,
    STATUS_WRITING,
    STATUS_REVIEW,
    STATUS_PUBLISHED,
    STATUS_ARCHIVED,
];

pub const MIN_PROGRESS: i32 = 0;
pub const MAX_PROGRESS: i32 = 100;

/// Maximum number of tags on a story.
pub const MAX_TAGS: usize = 20;

pub fn validate_status(status: &str) -> Result<(), String> {
    validate_one_of("story status", status, VALID_STATUSES)
}

/// Progress is a percentage.
pub fn validate_progress(progress: i32) -> Result<(), String> {
    if (MIN_PROGRESS..=MAX_PROGRESS).contains(&progress) {
        Ok(())
    } else {
        Err(format!(
            "Progress must be between {MIN_PROGRESS} and {MAX_PROGRESS}, got {progress}"
        ))
    }
}

/// Trim tags, drop empty ones and duplicates (first occurrence wins).
pub fn normalize_tags(tags: &[String]) -> Result<Vec<String>, String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || out.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        out.push(tag.to_string());
    }
    if out.len() > MAX_TAGS {
        return Err(format!("A story can have at most {MAX_TAGS} tags"));
    }
    Ok(out)
}
