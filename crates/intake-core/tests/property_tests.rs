//! Property tests for field normalization and slot resolution.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use patient_intake_core::error::IntakeError;
use patient_intake_core::normalizer::{normalize_birth_date, normalize_name, normalize_phone};
use patient_intake_core::resolver::resolve_slot_with_reference;
use patient_intake_core::{DaySlots, IntakeConfig, SlotCatalog};
use proptest::prelude::*;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

// -- Strategy helpers --

/// Digit strings that never start with the default country prefix.
fn arb_unprefixed_digits(len: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    ("[1-46-9]", prop::collection::vec("[0-9]", len))
        .prop_map(|(head, tail)| format!("{}{}", head, tail.concat()))
}

fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-ZáéíóúâêôãõçÁÉÍÓÚÇ \t]{1,40}".prop_filter("needs a letter", |s| !s.trim().is_empty())
}

fn arb_malformed_key() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9-]{1,6}", 0..9)
        .prop_filter("five fields is well formed", |fields| fields.len() != 4)
        .prop_map(|mut fields| {
            fields.push("14:00".to_string());
            fields.join("|")
        })
}

proptest! {
    /// The country prefix is stripped once from otherwise valid numbers.
    #[test]
    fn prefixed_phone_is_stripped(rest in "[0-9]{10,11}") {
        let config = IntakeConfig::default();
        let out = normalize_phone(&format!("+55 {}", rest), &config).unwrap();
        prop_assert_eq!(out, rest);
    }

    #[test]
    fn phone_separators_are_ignored(digits in arb_unprefixed_digits(9..=10)) {
        let config = IntakeConfig::default();
        let spaced: String = digits.chars().flat_map(|c| [c, ' ', '-']).collect();
        prop_assert_eq!(normalize_phone(&spaced, &config).unwrap(), digits);
    }

    #[test]
    fn short_phone_is_rejected(digits in arb_unprefixed_digits(0..=8)) {
        let config = IntakeConfig::default();
        let is_invalid_phone = matches!(
            normalize_phone(&digits, &config),
            Err(IntakeError::InvalidPhone(_))
        );
        prop_assert!(is_invalid_phone);
    }

    #[test]
    fn long_phone_is_rejected(digits in arb_unprefixed_digits(11..=16)) {
        let config = IntakeConfig::default();
        let is_invalid_phone = matches!(
            normalize_phone(&digits, &config),
            Err(IntakeError::InvalidPhone(_))
        );
        prop_assert!(is_invalid_phone);
    }

    #[test]
    fn name_normalization_is_idempotent(raw in arb_name()) {
        let once = normalize_name(&raw).unwrap();
        let twice = normalize_name(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn future_birth_date_is_rejected(days_ahead in 1i64..4000) {
        let date = now().date() + Duration::days(days_ahead);
        let raw = date.format("%d/%m/%Y").to_string();
        let is_future = matches!(
            normalize_birth_date(&raw, now(), 120),
            Err(IntakeError::FutureDate)
        );
        prop_assert!(is_future);
    }

    #[test]
    fn ancient_birth_date_is_rejected(year in 1700i32..1905, month in 1u32..=12, day in 1u32..=28) {
        let raw = format!("{:02}/{:02}/{}", day, month, year);
        let is_unreasonable = matches!(
            normalize_birth_date(&raw, now(), 120),
            Err(IntakeError::UnreasonableAge { max_years: 120 })
        );
        prop_assert!(is_unreasonable);
    }

    #[test]
    fn plausible_birth_date_is_canonical(days_back in 0i64..40_000) {
        let date = now().date() - Duration::days(days_back);
        let raw = date.format("%d/%m/%Y").to_string();
        let out = normalize_birth_date(&raw, now(), 120).unwrap();
        prop_assert_eq!(out, date.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn malformed_keys_never_match(key in arb_malformed_key()) {
        let catalog = SlotCatalog::new(vec![DaySlots::with_keys("2025-06-10", [key])]);
        let is_not_found = matches!(
            resolve_slot_with_reference("10/06 14:00", Some(&catalog), 2025),
            Err(IntakeError::SlotNotFound(_))
        );
        prop_assert!(is_not_found);
    }

    #[test]
    fn empty_catalog_fails_for_any_phrase(phrase in ".{0,30}") {
        let empty = SlotCatalog::default();
        let is_empty_catalog = matches!(
            resolve_slot_with_reference(&phrase, Some(&empty), 2025),
            Err(IntakeError::EmptyCatalog)
        );
        prop_assert!(is_empty_catalog);
    }

    #[test]
    fn offered_slot_resolves(hour in 0u32..24, minute in 0u32..60, day in 1u32..=28) {
        let time = format!("{:02}:{:02}", hour, minute);
        let date = format!("2025-07-{:02}", day);
        let key = format!("1|2|dr-x|clinic|{}", time);
        let catalog = SlotCatalog::new(vec![DaySlots::with_keys(date, [key.clone()])]);

        let phrase = format!("{:02}/07 {}", day, time);
        let resolved = resolve_slot_with_reference(&phrase, Some(&catalog), 2025).unwrap();
        prop_assert_eq!(resolved, key);
    }
}
