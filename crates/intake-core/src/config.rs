//! Intake processing configuration.
//!
//! Configuration is resolved once by the host and handed to
//! [`IntakeProcessor::with_config`](crate::IntakeProcessor::with_config).
//! The core never reads environment variables or files.

use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, IntakeResult};

/// Tunable rules for field normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntakeConfig {
    /// Digits stripped blindly from the start of a phone number
    pub phone_country_prefix: String,
    /// Minimum digit count after prefix stripping (inclusive)
    pub phone_min_digits: usize,
    /// Maximum digit count after prefix stripping (inclusive)
    pub phone_max_digits: usize,
    /// Oldest accepted age, in calendar years
    pub max_age_years: u32,
    /// First names classified as male in addition to the built-in table
    pub extra_male_names: Vec<String>,
    /// First names classified as female in addition to the built-in table
    pub extra_female_names: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            phone_country_prefix: "55".into(),
            phone_min_digits: 10,
            phone_max_digits: 11,
            max_age_years: 120,
            extra_male_names: Vec::new(),
            extra_female_names: Vec::new(),
        }
    }
}

impl IntakeConfig {
    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> IntakeResult<()> {
        if !self.phone_country_prefix.chars().all(|c| c.is_ascii_digit()) {
            return Err(IntakeError::InvalidInput(
                "phone_country_prefix must contain only digits".into(),
            ));
        }

        if self.phone_min_digits > self.phone_max_digits {
            return Err(IntakeError::InvalidInput(format!(
                "phone_min_digits ({}) cannot exceed phone_max_digits ({})",
                self.phone_min_digits, self.phone_max_digits
            )));
        }

        Ok(())
    }
}
