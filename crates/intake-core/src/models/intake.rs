//! Incoming patient intake payload.

use serde::{Deserialize, Serialize};

use super::CatalogInput;

/// One intake submission. Every field is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientIntake {
    /// Patient full name, any casing and spacing
    #[serde(alias = "nome_paciente", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Phone number, any punctuation, optional country code
    #[serde(alias = "telefone_paciente", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Birth date, free-form, day before month
    #[serde(alias = "data_nascimento_paciente", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// National ID (CPF), any punctuation
    #[serde(alias = "cpf_paciente", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    /// Human-entered slot choice, e.g. "10/06 14:00"
    #[serde(alias = "id_agenda_escolhido", skip_serializing_if = "Option::is_none")]
    pub chosen_slot_phrase: Option<String>,
    /// Available slots to resolve the phrase against
    #[serde(alias = "dados_horarios", skip_serializing_if = "Option::is_none")]
    pub slot_catalog: Option<CatalogInput>,
}

impl PatientIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    pub fn with_slot_choice(
        mut self,
        phrase: impl Into<String>,
        catalog: impl Into<CatalogInput>,
    ) -> Self {
        self.chosen_slot_phrase = Some(phrase.into());
        self.slot_catalog = Some(catalog.into());
        self
    }
}
