//! National ID (CPF) canonicalization.

use crate::error::{IntakeError, IntakeResult};

/// Checks a digits-only national ID.
///
/// `Ok(false)` means the ID is invalid; `Err` means the validator itself broke.
pub trait NationalIdValidator: Send + Sync {
    fn validate(&self, digits: &str) -> anyhow::Result<bool>;
}

/// Brazilian CPF: 11 digits, two mod-11 check digits, repeated digits rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpfValidator;

const CPF_LENGTH: usize = 11;

impl NationalIdValidator for CpfValidator {
    fn validate(&self, digits: &str) -> anyhow::Result<bool> {
        let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

        if values.len() != CPF_LENGTH || values.len() != digits.len() {
            return Ok(false);
        }
        if values.iter().all(|&d| d == values[0]) {
            return Ok(false);
        }

        Ok(cpf_check_digit(&values[..9]) == values[9] && cpf_check_digit(&values[..10]) == values[10])
    }
}

/// Check digit over `body`, weights counting down to 2.
fn cpf_check_digit(body: &[u32]) -> u32 {
    let weight_start = body.len() as u32 + 1;
    let sum: u32 = body
        .iter()
        .enumerate()
        .map(|(i, d)| d * (weight_start - i as u32))
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        r => r,
    }
}

/// Strip punctuation and validate. Returns the bare digits.
pub fn normalize_national_id(
    raw: &str,
    validator: &dyn NationalIdValidator,
) -> IntakeResult<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match validator.validate(&digits) {
        Ok(true) => Ok(digits),
        Ok(false) => Err(IntakeError::InvalidNationalId),
        Err(e) => Err(IntakeError::Internal(
            e.context("national ID validator failed"),
        )),
    }
}
