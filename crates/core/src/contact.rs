//! Story-contact link statuses.

use crate::validation::validate_one_of;

pub const LINK_IDENTIFIED: &str = "identified";
pub const LINK_CONTACTED: &str = "contacted";
pub const LINK_SCHEDULED: &str = "scheduled";
pub const LINK_INTERVIEWED: &str = "interviewed";
pub const LINK_DECLINED: &str = "declined";

pub const DEFAULT_LINK_STATUS: &str = LINK_IDENTIFIED;

pub const VALID_LINK_STATUSES: &[&str] = &[
    LINK_IDENTIFIED,
    LINK_CONTACTED,
    LINK_SCHEDULED,
    LINK_INTERVIEWED,
    LINK_DECLINED,
];

pub fn validate_link_status(status: &str) -> Result<(), String> {
    validate_one_of("contact status", status, VALID_LINK_STATUSES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_statuses() {
        assert!(validate_link_status("interviewed").is_ok());
        assert!(validate_link_status("ghosted").is_err());
    }
}
