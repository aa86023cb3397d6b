//! Phone number canonicalization.

use crate::config::IntakeConfig;
use crate::error::{IntakeError, IntakeResult};

/// Keep digits only, drop a leading country prefix, check the length.
///
/// The prefix is removed whenever the digits start with it, with no attempt to
/// tell a country code from a subscriber number that happens to begin the same
/// way.
pub fn normalize_phone(raw: &str, config: &IntakeConfig) -> IntakeResult<String> {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let prefix = config.phone_country_prefix.as_str();
    if !prefix.is_empty() && digits.starts_with(prefix) {
        digits.replace_range(..prefix.len(), "");
    }

    if !(config.phone_min_digits..=config.phone_max_digits).contains(&digits.len()) {
        return Err(IntakeError::InvalidPhone(raw.to_string()));
    }

    Ok(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(raw: &str) -> IntakeResult<String> {
        normalize_phone(raw, &IntakeConfig::default())
    }

    #[test]
    fn test_strips_formatting() {
        assert_eq!(phone("(11) 91234-5678").unwrap(), "11912345678");
        assert_eq!(phone("11 3456.7890").unwrap(), "1134567890");
    }

    #[test]
    fn test_strips_country_code() {
        assert_eq!(phone("+55 (11) 91234-5678").unwrap(), "11912345678");
        assert_eq!(phone("551134567890").unwrap(), "1134567890");
    }

    #[test]
    fn test_blind_prefix_strip() {
        // Area code 55 is lost along with the assumed country code
        assert!(matches!(phone("55 9123-4567"), Err(IntakeError::InvalidPhone(_))));
        assert_eq!(phone("5555912345678").unwrap(), "55912345678");
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(phone("912345678"), Err(IntakeError::InvalidPhone(_))));
        assert!(matches!(phone("119123456789"), Err(IntakeError::InvalidPhone(_))));
        assert!(matches!(phone("no digits"), Err(IntakeError::InvalidPhone(_))));
    }

    #[test]
    fn test_error_carries_original_input() {
        match phone("(11) 1234") {
            Err(IntakeError::InvalidPhone(original)) => assert_eq!(original, "(11) 1234"),
            other => panic!("expected InvalidPhone, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_prefix() {
        let config = IntakeConfig {
            phone_country_prefix: "1".into(),
            ..IntakeConfig::default()
        };
        assert_eq!(normalize_phone("+1 415 555 1212", &config).unwrap(), "4155551212");

        let config = IntakeConfig {
            phone_country_prefix: String::new(),
            ..IntakeConfig::default()
        };
        assert!(normalize_phone("+55 11 91234-5678", &config).is_err());
    }
}
