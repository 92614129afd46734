//! Outreach email purposes and tones.

use crate::validation::validate_one_of;

pub const PURPOSE_INTERVIEW_REQUEST: &str = "interview_request";
pub const PURPOSE_FOLLOW_UP: &str = "follow_up";
pub const PURPOSE_THANK_YOU: &str = "thank_you";
pub const PURPOSE_FACT_CHECK: &str = "fact_check";

pub const DEFAULT_PURPOSE: &str = PURPOSE_INTERVIEW_REQUEST;

pub const VALID_PURPOSES: &[&str] = &[
    PURPOSE_INTERVIEW_REQUEST,
    PURPOSE_FOLLOW_UP,
    PURPOSE_THANK_YOU,
    PURPOSE_FACT_CHECK,
];

pub const TONE_PROFESSIONAL: &str = "professional";
pub const TONE_FRIENDLY: &str = "friendly";
pub const TONE_FORMAL: &str = "formal";

pub const DEFAULT_TONE: &str = TONE_PROFESSIONAL;

pub const VALID_TONES: &[&str] = &[TONE_PROFESSIONAL, TONE_FRIENDLY, TONE_FORMAL];

pub fn validate_purpose(purpose: &str) -> Result<(), String> {
    validate_one_of("purpose", purpose, VALID_PURPOSES)
}

pub fn validate_tone(tone: &str) -> Result<(), String> {
    validate_one_of("tone", tone, VALID_TONES)
}
