//! Per-field normalizers for intake data.
//!
//! Handles:
//! - Name casing and whitespace (plus gender inference from the first name)
//! - Phone canonicalization (digits only, country prefix stripped)
//! - Birth date canonicalization (`YYYY-MM-DD`, day-first parsing)
//! - National ID canonicalization (digits only, checksum validated)
//!
//! Every normalizer is a pure function of its input and the configuration.

mod birth_date;
mod gender;
mod name;
mod national_id;
mod phone;

pub use birth_date::*;
pub use gender::*;
pub use name::*;
pub use national_id::*;
pub use phone::*;

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::config::IntakeConfig;
use crate::error::IntakeResult;
use crate::models::Gender;

/// Applies the field rules of one configuration.
#[derive(Clone)]
pub struct FieldNormalizer {
    config: IntakeConfig,
    genders: GenderClassifier,
    id_validator: Arc<dyn NationalIdValidator>,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldNormalizer")
            .field("config", &self.config)
            .field("genders", &self.genders)
            .finish_non_exhaustive()
    }
}

impl FieldNormalizer {
    /// Create a normalizer with default rules and CPF validation.
    pub fn new() -> Self {
        Self {
            config: IntakeConfig::default(),
            genders: GenderClassifier::new(),
            id_validator: Arc::new(CpfValidator),
        }
    }

    /// Create a normalizer from a host-supplied configuration.
    pub fn with_config(config: IntakeConfig) -> IntakeResult<Self> {
        config.validate()?;

        let mut genders = GenderClassifier::new();
        for name in &config.extra_male_names {
            genders.add_male_name(name);
        }
        for name in &config.extra_female_names {
            genders.add_female_name(name);
        }

        Ok(Self {
            config,
            genders,
            id_validator: Arc::new(CpfValidator),
        })
    }

    /// Replace the national ID validator.
    pub fn with_validator(mut self, validator: Arc<dyn NationalIdValidator>) -> Self {
        self.id_validator = validator;
        self
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn name(&self, raw: &str) -> IntakeResult<String> {
        normalize_name(raw)
    }

    /// Infer gender from an already normalized name.
    pub fn gender(&self, normalized_name: &str) -> Option<Gender> {
        self.genders.classify(normalized_name)
    }

    pub fn phone(&self, raw: &str) -> IntakeResult<String> {
        normalize_phone(raw, &self.config)
    }

    /// Normalize a birth date against the local clock.
    pub fn birth_date(&self, raw: &str) -> IntakeResult<String> {
        self.birth_date_at(raw, Local::now().naive_local())
    }

    /// Normalize a birth date against an explicit "now".
    pub fn birth_date_at(&self, raw: &str, now: NaiveDateTime) -> IntakeResult<String> {
        normalize_birth_date(raw, now, self.config.max_age_years)
    }

    pub fn national_id(&self, raw: &str) -> IntakeResult<String> {
        normalize_national_id(raw, self.id_validator.as_ref())
    }
}
