//! User preference values.

use crate::validation::validate_one_of;

pub const THEME_LIGHT: &str = "light";
pub const THEME_DARK: &str = "dark";
pub const THEME_SYSTEM: &str = "system";

pub const VALID_THEMES: &[&str] = &[THEME_LIGHT, THEME_DARK, THEME_SYSTEM];

pub fn validate_theme(theme: &str) -> Result<(), String> {
    validate_one_of("theme", theme, VALID_THEMES)
}

/// Timezones are stored verbatim; only reject obvious garbage.
pub fn validate_timezone(tz: &str) -> Result<(), String> {
    let tz = tz.trim();
    if tz.is_empty() || tz.len() > 64 || tz.contains(char::is_whitespace) {
        return Err(format!("Invalid timezone '{tz}'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes() {
        assert!(validate_theme("dark").is_ok());
        assert!(validate_theme("neon").is_err());
    }

    #[test]
    fn timezones() {
        assert!(validate_timezone("Europe/Berlin").is_ok());
        assert!(validate_timezone("").is_err());
        assert!(validate_timezone("New York").is_err());
    }
}
