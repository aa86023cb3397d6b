//! Birth date canonicalization.

use chrono::{Datelike, NaiveDateTime, NaiveTime};

use crate::dates::parse_day_first;
use crate::error::{IntakeError, IntakeResult};

/// Parse a free-form birth date and re-emit it as `YYYY-MM-DD`.
///
/// Missing components default to `now`'s date. Fails with `FutureDate` when the
/// date is later than `now` and with `UnreasonableAge` when the calendar-year
/// difference exceeds `max_age_years`. Any time of day in the input is dropped.
pub fn normalize_birth_date(
    raw: &str,
    now: NaiveDateTime,
    max_age_years: u32,
) -> IntakeResult<String> {
    let default = now.date().and_time(NaiveTime::MIN);
    let parsed = parse_day_first(raw, default, now.year()).map_err(|e| {
        tracing::debug!(reason = e.reason(), "birth date rejected by parser");
        IntakeError::InvalidDate(raw.to_string())
    })?;

    if parsed > now {
        return Err(IntakeError::FutureDate);
    }

    if i64::from(now.year()) - i64::from(parsed.year()) > i64::from(max_age_years) {
        return Err(IntakeError::UnreasonableAge {
            max_years: max_age_years,
        });
    }

    Ok(parsed.format("%Y-%m-%d").to_string())
}
