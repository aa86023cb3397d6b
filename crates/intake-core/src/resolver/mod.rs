//! Slot resolution: free-form date/time phrase → composite slot key.
//!
//! Pipeline: Anchor year (first catalog day) → Day-first parse → Exact day + `HH:MM` match

use chrono::{Datelike, Local, NaiveDate, NaiveTime};

use crate::dates::parse_day_first;
use crate::error::{IntakeError, IntakeResult};
use crate::models::{SlotCatalog, SlotKey};

/// Date format of catalog day entries.
pub const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format of the last composite key field.
pub const SLOT_TIME_FORMAT: &str = "%H:%M";

/// Resolve `phrase` to the exact composite key it names in `catalog`.
pub fn resolve_slot(phrase: &str, catalog: Option<&SlotCatalog>) -> IntakeResult<String> {
    resolve_slot_with_reference(phrase, catalog, Local::now().year())
}

/// Like [`resolve_slot`], with an explicit reference year for two-digit years.
///
/// 1. An absent or empty catalog fails with `EmptyCatalog`.
/// 2. The first day entry's year becomes the default for year-less phrases.
/// 3. The phrase is parsed day-first; failure is `InvalidSlotPhrase`.
/// 4. The first day entry whose date equals the target is scanned in key order
///    and the first well-formed key whose time field equals the target `HH:MM`
///    wins. Keys without exactly five fields are skipped.
/// 5. Anything else is `SlotNotFound`.
pub fn resolve_slot_with_reference(
    phrase: &str,
    catalog: Option<&SlotCatalog>,
    reference_year: i32,
) -> IntakeResult<String> {
    let catalog = match catalog {
        Some(c) if !c.is_empty() => c,
        _ => return Err(IntakeError::EmptyCatalog),
    };

    let base_year = base_year(catalog).ok_or_else(|| {
        tracing::debug!("first catalog day has no parsable date");
        IntakeError::InvalidSlotPhrase(phrase.to_string())
    })?;

    let default = NaiveDate::from_ymd_opt(base_year, 1, 1)
        .map(|d| d.and_time(NaiveTime::MIN))
        .ok_or_else(|| IntakeError::InvalidSlotPhrase(phrase.to_string()))?;

    let target = parse_day_first(phrase, default, reference_year).map_err(|e| {
        tracing::debug!(reason = e.reason(), "slot phrase rejected by parser");
        IntakeError::InvalidSlotPhrase(phrase.to_string())
    })?;

    let target_date = target.format(CATALOG_DATE_FORMAT).to_string();
    let target_time = target.format(SLOT_TIME_FORMAT).to_string();

    catalog
        .day(&target_date)
        .and_then(|day| {
            day.keys()
                .filter_map(SlotKey::parse)
                .find(|key| key.time() == target_time)
        })
        .map(|key| key.as_str().to_string())
        .ok_or_else(|| IntakeError::SlotNotFound(phrase.to_string()))
}

fn base_year(catalog: &SlotCatalog) -> Option<i32> {
    let first = catalog.first_day()?;
    NaiveDate::parse_from_str(&first.date, CATALOG_DATE_FORMAT)
        .ok()
        .map(|d| d.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DaySlots;

    fn setup_catalog() -> SlotCatalog {
        SlotCatalog::new(vec![
            DaySlots::with_keys(
                "2025-06-10",
                [
                    "101|7|dr-ana|clinic-1|08:00",
                    "102|7|dr-ana|clinic-1|14:00",
                    "malformed|14:00",
                    "103|8|dr-rui|clinic-2|14:00",
                ],
            ),
            DaySlots::with_keys("2025-06-11", ["201|7|dr-ana|clinic-1|09:30"]),
        ])
    }

    fn resolve(phrase: &str, catalog: &SlotCatalog) -> IntakeResult<String> {
        resolve_slot_with_reference(phrase, Some(catalog), 2025)
    }

    #[test]
    fn test_resolve_day_first_phrase() {
        let catalog = SlotCatalog::new(vec![DaySlots::with_keys(
            "2025-06-10",
            ["a|b|c|d|14:00"],
        )]);
        assert_eq!(resolve("10/06 14:00", &catalog).unwrap(), "a|b|c|d|14:00");
    }

    #[test]
    fn test_first_key_in_order_wins() {
        let catalog = setup_catalog();
        assert_eq!(
            resolve("10/06 14:00", &catalog).unwrap(),
            "102|7|dr-ana|clinic-1|14:00"
        );
    }

    #[test]
    fn test_other_phrase_forms() {
        let catalog = setup_catalog();
        assert_eq!(
            resolve("11/06/2025 09:30", &catalog).unwrap(),
            "201|7|dr-ana|clinic-1|09:30"
        );
        assert_eq!(
            resolve("10 de junho às 8h", &catalog).unwrap(),
            "101|7|dr-ana|clinic-1|08:00"
        );
        assert_eq!(
            resolve("2025-06-11T09:30:00", &catalog).unwrap(),
            "201|7|dr-ana|clinic-1|09:30"
        );
    }

    #[test]
    fn test_slot_not_found() {
        let catalog = setup_catalog();
        match resolve("10/06 15:00", &catalog) {
            Err(IntakeError::SlotNotFound(phrase)) => assert_eq!(phrase, "10/06 15:00"),
            other => panic!("expected SlotNotFound, got {:?}", other),
        }
        // Right time, day not in catalog
        assert!(matches!(
            resolve("12/06 14:00", &catalog),
            Err(IntakeError::SlotNotFound(_))
        ));
        // Right day and time, different year
        assert!(matches!(
            resolve("10/06/2026 14:00", &catalog),
            Err(IntakeError::SlotNotFound(_))
        ));
    }

    #[test]
    fn test_exact_time_match_only() {
        let catalog = setup_catalog();
        assert!(matches!(
            resolve("10/06 14:01", &catalog),
            Err(IntakeError::SlotNotFound(_))
        ));
        // Seconds are not part of the comparison
        assert_eq!(
            resolve("10/06 08:00:45", &catalog).unwrap(),
            "101|7|dr-ana|clinic-1|08:00"
        );
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let catalog = SlotCatalog::new(vec![DaySlots::with_keys(
            "2025-06-10",
            ["only|two", "a|b|c|d|e|14:00", "14:00"],
        )]);
        assert!(matches!(
            resolve("10/06 14:00", &catalog),
            Err(IntakeError::SlotNotFound(_))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        assert!(matches!(
            resolve("10/06 14:00", &SlotCatalog::default()),
            Err(IntakeError::EmptyCatalog)
        ));
        assert!(matches!(
            resolve("garbage", &SlotCatalog::default()),
            Err(IntakeError::EmptyCatalog)
        ));
        assert!(matches!(
            resolve_slot("10/06 14:00", None),
            Err(IntakeError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_invalid_phrase() {
        let catalog = setup_catalog();
        match resolve("next tuesday-ish", &catalog) {
            Err(IntakeError::InvalidSlotPhrase(phrase)) => assert_eq!(phrase, "next tuesday-ish"),
            other => panic!("expected InvalidSlotPhrase, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_first_day_date() {
        let catalog = SlotCatalog::new(vec![DaySlots::with_keys(
            "10/06/2025",
            ["a|b|c|d|14:00"],
        )]);
        assert!(matches!(
            resolve("10/06 14:00", &catalog),
            Err(IntakeError::InvalidSlotPhrase(_))
        ));
    }

    #[test]
    fn test_base_year_from_first_day() {
        let catalog = SlotCatalog::new(vec![
            DaySlots::with_keys("2026-12-30", ["a|b|c|d|10:00"]),
            DaySlots::with_keys("2026-01-02", ["a|b|c|d|11:00"]),
        ]);
        assert_eq!(resolve("02/01 11:00", &catalog).unwrap(), "a|b|c|d|11:00");
    }

    #[test]
    fn test_duplicate_days_first_wins() {
        let catalog = SlotCatalog::new(vec![
            DaySlots::with_keys("2025-06-10", ["a|b|c|d|09:00"]),
            DaySlots::with_keys("2025-06-10", ["a|b|c|d|14:00"]),
        ]);
        assert!(matches!(
            resolve("10/06 14:00", &catalog),
            Err(IntakeError::SlotNotFound(_))
        ));
    }
}
