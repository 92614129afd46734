//! Article draft statuses and content metrics.

use crate::validation::validate_one_of;

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_REVIEW: &str = "review";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_PUBLISHED: &str = "published";

pub const DEFAULT_STATUS: &str = STATUS_DRAFT;

pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_REVIEW,
    STATUS_APPROVED,
    STATUS_PUBLISHED,
];

pub fn validate_status(status: &str) -> Result<(), String> {
    validate_one_of("article status", status, VALID_STATUSES)
}

/// Count whitespace-separated words.
pub fn word_count(content: &str) -> i32 {
    i32::try_from(content.split_whitespace().count()).unwrap_or(i32::MAX)
}

/// Count paragraphs: runs of non-blank lines separated by blank lines.
pub fn paragraph_count(content: &str) -> usize {
    content
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count()
}
