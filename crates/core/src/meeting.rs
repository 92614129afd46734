//! Meeting platforms and duration rules.

use crate::validation::validate_one_of;

pub const PLATFORM_IN_PERSON: &str = "in_person";
pub const PLATFORM_PHONE: &str = "phone";
pub const PLATFORM_ZOOM: &str = "zoom";
pub const PLATFORM_GOOGLE_MEET: &str = "google_meet";
pub const PLATFORM_TEAMS: &str = "teams";
pub const PLATFORM_OTHER: &str = "other";

pub const DEFAULT_PLATFORM: &str = PLATFORM_OTHER;

pub const VALID_PLATFORMS: &[&str] = &[
    PLATFORM_IN_PERSON,
    PLATFORM_PHONE,
    PLATFORM_ZOOM,
    PLATFORM_GOOGLE_MEET,
    PLATFORM_TEAMS,
    PLATFORM_OTHER,
];

pub const DEFAULT_DURATION_MINUTES: i32 = 30;

/// Upper bound on a single meeting (one day).
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;

pub fn validate_platform(platform: &str) -> Result<(), String> {
    validate_one_of("platform", platform, VALID_PLATFORMS)
}

pub fn validate_duration(minutes: i32) -> Result<(), String> {
    if minutes <= 0 || minutes > MAX_DURATION_MINUTES {
        return Err(format!(
            "Duration must be between 1 and {MAX_DURATION_MINUTES} minutes"
        ));
    }
    Ok(())
}
