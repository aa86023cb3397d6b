//! Normalized output of an intake request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Gender inferred from a first name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical values for the fields that were present and valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_name: Option<String>,
    /// Digits only, 10-11 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_phone: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_birth_date: Option<String>,
    /// Digits only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_national_id: Option<String>,
    /// Matched composite slot key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_slot_key: Option<String>,
}

impl NormalizedResult {
    /// True when no field produced a value.
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.formatted_name.is_none()
            && self.formatted_phone.is_none()
            && self.formatted_birth_date.is_none()
            && self.formatted_national_id.is_none()
            && self.resolved_slot_key.is_none()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
