//! Intake orchestration.
//!
//! Decodes the slot catalog once, runs each present field through its
//! normalizer, then resolves the chosen slot. The first failure aborts the
//! whole request; partial results are never returned alongside an error.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDateTime};
use tracing::{debug, error, info_span, warn};
use uuid::Uuid;

use crate::config::IntakeConfig;
use crate::error::{IntakeError, IntakeResult};
use crate::models::{NormalizedResult, PatientIntake, SlotCatalog};
use crate::normalizer::{FieldNormalizer, NationalIdValidator};
use crate::resolver::resolve_slot_with_reference;

/// The fields of a request that are present and non-blank.
#[derive(Debug, Default)]
struct PresentFields {
    name: Option<String>,
    phone: Option<String>,
    birth_date: Option<String>,
    national_id: Option<String>,
    chosen_slot_phrase: Option<String>,
    slot_catalog: Option<SlotCatalog>,
}

impl PresentFields {
    fn from_intake(intake: PatientIntake) -> IntakeResult<Self> {
        let slot_catalog = match intake.slot_catalog {
            Some(input) => input.decode()?,
            None => None,
        };

        Ok(Self {
            name: present(intake.name),
            phone: present(intake.phone),
            birth_date: present(intake.birth_date),
            national_id: present(intake.national_id),
            chosen_slot_phrase: present(intake.chosen_slot_phrase),
            slot_catalog,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Runs the full intake pipeline. Holds no per-request state.
#[derive(Debug, Clone, Default)]
pub struct IntakeProcessor {
    normalizer: FieldNormalizer,
}

impl IntakeProcessor {
    /// Create a processor with default rules.
    pub fn new() -> Self {
        Self {
            normalizer: FieldNormalizer::new(),
        }
    }

    /// Create a processor from a host-supplied configuration.
    pub fn with_config(config: IntakeConfig) -> IntakeResult<Self> {
        Ok(Self {
            normalizer: FieldNormalizer::with_config(config)?,
        })
    }

    /// Replace the national ID validator.
    pub fn with_validator(mut self, validator: Arc<dyn NationalIdValidator>) -> Self {
        self.normalizer = self.normalizer.with_validator(validator);
        self
    }

    pub fn normalizer(&self) -> &FieldNormalizer {
        &self.normalizer
    }

    /// Process one request against the local clock.
    pub fn process(&self, intake: PatientIntake) -> IntakeResult<NormalizedResult> {
        self.process_at(intake, Local::now().naive_local())
    }

    /// Process one request against an explicit "now".
    pub fn process_at(
        &self,
        intake: PatientIntake,
        now: NaiveDateTime,
    ) -> IntakeResult<NormalizedResult> {
        let request_id = Uuid::new_v4();
        let span = info_span!("process_intake", %request_id);
        let _guard = span.enter();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(intake, now)))
            .unwrap_or_else(|payload| {
                Err(IntakeError::internal(anyhow::anyhow!(
                    "panic during intake processing: {}",
                    panic_message(payload.as_ref())
                )))
            });

        match &outcome {
            Ok(result) => debug!(
                resolved_slot = result.resolved_slot_key.is_some(),
                "intake processed"
            ),
            Err(IntakeError::Internal(source)) => {
                error!(error = ?source, "intake processing failed unexpectedly")
            }
            Err(err) => warn!(kind = err.kind().code(), "intake rejected"),
        }

        outcome
    }

    /// Decode a JSON request body and process it.
    pub fn process_json(&self, payload: &str) -> IntakeResult<NormalizedResult> {
        let intake: PatientIntake = serde_json::from_str(payload)
            .map_err(|e| IntakeError::InvalidInput(format!("malformed request body: {}", e)))?;
        self.process(intake)
    }

    fn run(&self, intake: PatientIntake, now: NaiveDateTime) -> IntakeResult<NormalizedResult> {
        let fields = PresentFields::from_intake(intake)?;
        let mut result = NormalizedResult::default();

        if let Some(raw) = fields.name.as_deref() {
            let name = self.normalizer.name(raw)?;
            result.gender = self.normalizer.gender(&name);
            result.formatted_name = Some(name);
            debug!(field = "name", "field normalized");
        }

        if let Some(raw) = fields.phone.as_deref() {
            result.formatted_phone = Some(self.normalizer.phone(raw)?);
            debug!(field = "phone", "field normalized");
        }

        if let Some(raw) = fields.birth_date.as_deref() {
            result.formatted_birth_date = Some(self.normalizer.birth_date_at(raw, now)?);
            debug!(field = "birth_date", "field normalized");
        }

        if let Some(raw) = fields.national_id.as_deref() {
            result.formatted_national_id = Some(self.normalizer.national_id(raw)?);
            debug!(field = "national_id", "field normalized");
        }

        if let (Some(phrase), Some(catalog)) =
            (fields.chosen_slot_phrase.as_deref(), fields.slot_catalog.as_ref())
        {
            let key = resolve_slot_with_reference(phrase, Some(catalog), now.year())?;
            result.resolved_slot_key = Some(key);
            debug!(days = catalog.days.len(), "slot resolved");
        }

        if result.is_empty() {
            return Err(IntakeError::NoFieldsProvided);
        }

        Ok(result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
