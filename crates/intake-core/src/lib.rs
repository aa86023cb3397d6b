//! Patient Intake Core Library
//!
//! Normalizes raw patient intake data collected by a conversational front end
//! and resolves the free-form appointment phrase a patient chose into the
//! exact slot key offered by the scheduling system.
//!
//! # Architecture
//!
//! ```text
//! Raw intake (JSON / FFI record)
//!         │
//!         ▼
//! Decode slot catalog ──── malformed ──→ error
//!         │
//!         ▼
//! ┌─────────────────────────────────────┐
//! │ Field normalizers (fail fast)       │
//! │  name → gender                      │
//! │  phone                              │
//! │  birth date                         │
//! │  national ID                        │
//! └─────────────────┬───────────────────┘
//!                   │
//!                   ▼
//!   Slot resolution (phrase + catalog)
//!                   │
//!                   ▼
//!          NormalizedResult
//! ```
//!
//! # Core Principle
//!
//! **A request either succeeds completely or fails with exactly one error.**
//! Partial results are never returned.
//!
//! # Modules
//!
//! - [`config`]: Host-tunable rules (phone prefix, age limit, name tables)
//! - [`dates`]: Day-first date/time phrase parser
//! - [`error`]: Error taxonomy with kinds and classes
//! - [`models`]: Request, result and slot catalog types
//! - [`normalizer`]: Per-field normalizers
//! - [`pipeline`]: Request orchestration
//! - [`resolver`]: Slot phrase resolution

pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod resolver;

// Re-export commonly used types
pub use config::IntakeConfig;
pub use error::{ErrorClass, ErrorKind, IntakeError, IntakeResult};
pub use models::{CatalogInput, DaySlots, Gender, NormalizedResult, PatientIntake, SlotCatalog};
pub use normalizer::{CpfValidator, FieldNormalizer, NationalIdValidator};
pub use pipeline::IntakeProcessor;
pub use resolver::resolve_slot;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

/// Errors crossing the FFI boundary, grouped by who is responsible.
///
/// The message starts with the stable error code, e.g.
/// `SLOT_NOT_FOUND: Slot '10/06 15:00' was not found.`
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum IntakeFfiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<IntakeError> for IntakeFfiError {
    fn from(e: IntakeError) -> Self {
        let message = format!("{}: {}", e.kind().code(), e);
        match e.class() {
            ErrorClass::InvalidRequest => IntakeFfiError::InvalidRequest(message),
            ErrorClass::NotFound => IntakeFfiError::NotFound(message),
            ErrorClass::Internal => IntakeFfiError::Internal(message),
        }
    }
}

impl From<serde_json::Error> for IntakeFfiError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::internal(e).into()
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an intake service.
///
/// `config_json` is an optional JSON object with any of the
/// [`IntakeConfig`] fields; missing fields take their defaults.
#[uniffi::export]
pub fn open_intake_service(
    config_json: Option<String>,
) -> Result<Arc<IntakeService>, IntakeFfiError> {
    let config = match config_json.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => serde_json::from_str::<IntakeConfig>(raw).map_err(|e| {
            IntakeError::InvalidInput(format!("malformed configuration: {}", e))
        })?,
        _ => IntakeConfig::default(),
    };

    Ok(Arc::new(IntakeService {
        processor: IntakeProcessor::with_config(config)?,
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Stateless intake service. Safe to share across threads.
#[derive(uniffi::Object)]
pub struct IntakeService {
    processor: IntakeProcessor,
}

#[uniffi::export]
impl IntakeService {
    // =========================================================================
    // Intake Operations
    // =========================================================================

    /// Process a full intake request.
    pub fn process(&self, request: FfiIntakeRequest) -> Result<FfiNormalizedResult, IntakeFfiError> {
        let result = self.processor.process(request.into())?;
        Ok(result.into())
    }

    /// Process a JSON request body and return the JSON result.
    pub fn process_json(&self, payload: String) -> Result<String, IntakeFfiError> {
        let result = self.processor.process_json(&payload)?;
        Ok(result.to_json()?)
    }

    // =========================================================================
    // Single-field Operations
    // =========================================================================

    /// Resolve a slot phrase against a JSON-encoded catalog.
    pub fn resolve_slot(
        &self,
        phrase: String,
        catalog_json: String,
    ) -> Result<String, IntakeFfiError> {
        let catalog = CatalogInput::Encoded(catalog_json).decode()?;
        Ok(resolver::resolve_slot(&phrase, catalog.as_ref())?)
    }

    /// Canonicalize a phone number.
    pub fn normalize_phone(&self, phone: String) -> Result<String, IntakeFfiError> {
        Ok(self.processor.normalizer().phone(&phone)?)
    }

    /// Canonicalize a name and infer gender from it.
    pub fn normalize_name(&self, name: String) -> Result<FfiNameResult, IntakeFfiError> {
        let normalizer = self.processor.normalizer();
        let formatted_name = normalizer.name(&name)?;
        let gender = normalizer.gender(&formatted_name).map(|g| g.as_str().to_string());
        Ok(FfiNameResult {
            formatted_name,
            gender,
        })
    }

    /// Canonicalize a birth date to `YYYY-MM-DD`.
    pub fn normalize_birth_date(&self, birth_date: String) -> Result<String, IntakeFfiError> {
        Ok(self.processor.normalizer().birth_date(&birth_date)?)
    }

    /// Canonicalize and validate a national ID.
    pub fn normalize_national_id(&self, national_id: String) -> Result<String, IntakeFfiError> {
        Ok(self.processor.normalizer().national_id(&national_id)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe intake request. The catalog travels as JSON text.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiIntakeRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub national_id: Option<String>,
    pub chosen_slot_phrase: Option<String>,
    pub slot_catalog_json: Option<String>,
}

impl From<FfiIntakeRequest> for PatientIntake {
    fn from(req: FfiIntakeRequest) -> Self {
        PatientIntake {
            name: req.name,
            phone: req.phone,
            birth_date: req.birth_date,
            national_id: req.national_id,
            chosen_slot_phrase: req.chosen_slot_phrase,
            slot_catalog: req.slot_catalog_json.map(CatalogInput::Encoded),
        }
    }
}

/// FFI-safe normalized result.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiNormalizedResult {
    pub gender: Option<String>,
    pub formatted_name: Option<String>,
    pub formatted_phone: Option<String>,
    pub formatted_birth_date: Option<String>,
    pub formatted_national_id: Option<String>,
    pub resolved_slot_key: Option<String>,
}

impl From<NormalizedResult> for FfiNormalizedResult {
    fn from(result: NormalizedResult) -> Self {
        Self {
            gender: result.gender.map(|g| g.as_str().to_string()),
            formatted_name: result.formatted_name,
            formatted_phone: result.formatted_phone,
            formatted_birth_date: result.formatted_birth_date,
            formatted_national_id: result.formatted_national_id,
            resolved_slot_key: result.resolved_slot_key,
        }
    }
}

/// FFI-safe name normalization result.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiNameResult {
    pub formatted_name: String,
    pub gender: Option<String>,
}
