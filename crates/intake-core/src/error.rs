//! Error taxonomy for intake processing.
//!
//! Every failure carries a machine-readable [`ErrorKind`] and a coarse
//! [`ErrorClass`]. Mapping classes onto transport status codes belongs to the
//! calling layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic message reported for unexpected failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred while processing the request.";

/// Intake processing errors.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Phone number '{0}' looks invalid. It must contain area code and number.")]
    InvalidPhone(String),

    #[error("Date '{0}' has an invalid format.")]
    InvalidDate(String),

    #[error("Birth date cannot be in the future.")]
    FutureDate,

    #[error("Informed age is greater than {max_years} years.")]
    UnreasonableAge { max_years: u32 },

    #[error("The informed national ID is invalid.")]
    InvalidNationalId,

    #[error("The slot catalog contains malformed JSON: {0}")]
    MalformedCatalogJson(#[source] serde_json::Error),

    #[error("The slot catalog has an unexpected shape: {0}")]
    InvalidCatalogShape(#[source] serde_json::Error),

    #[error("The list of available slots is empty.")]
    EmptyCatalog,

    #[error("Date and time '{0}' has an invalid format.")]
    InvalidSlotPhrase(String),

    #[error("Slot '{0}' was not found.")]
    SlotNotFound(String),

    #[error("No fields were provided for processing.")]
    NoFieldsProvided,

    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Internal(#[source] anyhow::Error),
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// Machine-distinguishable error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    InvalidPhone,
    InvalidDate,
    FutureDate,
    UnreasonableAge,
    InvalidNationalId,
    MalformedCatalogJson,
    InvalidCatalogShape,
    EmptyCatalog,
    InvalidSlotPhrase,
    SlotNotFound,
    NoFieldsProvided,
    InternalError,
}

/// Who is responsible for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The caller sent something unusable.
    InvalidRequest,
    /// The requested slot (or any slot at all) does not exist.
    NotFound,
    /// Something unexpected broke on our side.
    Internal,
}

impl IntakeError {
    /// Wrap an unexpected failure.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        IntakeError::Internal(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IntakeError::InvalidInput(_) => ErrorKind::InvalidInput,
            IntakeError::InvalidPhone(_) => ErrorKind::InvalidPhone,
            IntakeError::InvalidDate(_) => ErrorKind::InvalidDate,
            IntakeError::FutureDate => ErrorKind::FutureDate,
            IntakeError::UnreasonableAge { .. } => ErrorKind::UnreasonableAge,
            IntakeError::InvalidNationalId => ErrorKind::InvalidNationalId,
            IntakeError::MalformedCatalogJson(_) => ErrorKind::MalformedCatalogJson,
            IntakeError::InvalidCatalogShape(_) => ErrorKind::InvalidCatalogShape,
            IntakeError::EmptyCatalog => ErrorKind::EmptyCatalog,
            IntakeError::InvalidSlotPhrase(_) => ErrorKind::InvalidSlotPhrase,
            IntakeError::SlotNotFound(_) => ErrorKind::SlotNotFound,
            IntakeError::NoFieldsProvided => ErrorKind::NoFieldsProvided,
            IntakeError::Internal(_) => ErrorKind::InternalError,
        }
    }

    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }
}

impl ErrorKind {
    /// Stable machine-readable code, e.g. `SLOT_NOT_FOUND`.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::InvalidPhone => "INVALID_PHONE",
            ErrorKind::InvalidDate => "INVALID_DATE",
            ErrorKind::FutureDate => "FUTURE_DATE",
            ErrorKind::UnreasonableAge => "UNREASONABLE_AGE",
            ErrorKind::InvalidNationalId => "INVALID_NATIONAL_ID",
            ErrorKind::MalformedCatalogJson => "MALFORMED_CATALOG_JSON",
            ErrorKind::InvalidCatalogShape => "INVALID_CATALOG_SHAPE",
            ErrorKind::EmptyCatalog => "EMPTY_CATALOG",
            ErrorKind::InvalidSlotPhrase => "INVALID_SLOT_PHRASE",
            ErrorKind::SlotNotFound => "SLOT_NOT_FOUND",
            ErrorKind::NoFieldsProvided => "NO_FIELDS_PROVIDED",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn class(self) -> ErrorClass {
        match self {
            ErrorKind::EmptyCatalog | ErrorKind::SlotNotFound => ErrorClass::NotFound,
            ErrorKind::InternalError => ErrorClass::Internal,
            _ => ErrorClass::InvalidRequest,
        }
    }
}
