//! Day-first parsing of free-form date and time phrases.
//!
//! Accepts what people type into intake forms and chat widgets:
//! `03/04/2020`, `3-4-20`, `2020-04-03T10:00:00Z`, `10 de junho de 2025 às 14h`,
//! `June 10, 14:00`, `10/06 2pm`, `03042020`. Ambiguous numeric dates are read
//! day before month. Components missing from the phrase are filled in from a
//! caller-supplied default.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

/// Date parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("empty input")]
    Empty,

    #[error("no date or time found")]
    NothingFound,

    #[error("unrecognized token: {0}")]
    UnknownToken(String),

    #[error("too many numeric components")]
    TooManyNumbers,

    #[error("more than one time of day")]
    MultipleTimes,

    #[error("value out of range: {0}")]
    OutOfRange(String),
}

impl DateParseError {
    /// Short machine-readable cause. Never contains any part of the input.
    pub fn reason(&self) -> &'static str {
        match self {
            DateParseError::Empty => "empty",
            DateParseError::NothingFound => "nothing_found",
            DateParseError::UnknownToken(_) => "unknown_token",
            DateParseError::TooManyNumbers => "too_many_numbers",
            DateParseError::MultipleTimes => "multiple_times",
            DateParseError::OutOfRange(_) => "out_of_range",
        }
    }
}

pub type DateParseResult<T> = Result<T, DateParseError>;

static ISO_T_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)t(\d)").expect("valid ISO separator regex"));

/// `14:00`, `14:00:59`, `2:30 pm`, `14:00:00.000Z`, `14:00-03:00`
static COLON_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?P<h>\d{1,2}):(?P<m>\d{2})(?::(?P<s>\d{2})(?:[.,]\d+)?)?(?:\s?(?P<ampm>am|pm|a\.m\.?|p\.m\.?))?(?:\s?(?:z\b|[+-]\d{2}:?\d{2}\b))?",
    )
    .expect("valid colon time regex")
});

/// `14h`, `14h30`, `14 horas`, `9hs`
static HOUR_MARK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<h>\d{1,2})\s?h(?:oras?|rs?|s)?(?P<m>\d{2})?(?:min)?\b")
        .expect("valid hour mark regex")
});

/// `2pm`, `11 a.m.`
static MERIDIEM_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?P<h>\d{1,2})\s?(?P<ampm>am|pm|a\.m\.?|p\.m\.?)(?:\W|$)")
        .expect("valid meridiem regex")
});

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Portuguese
    for (i, name) in [
        "janeiro", "fevereiro", "marco", "abril", "maio", "junho", "julho", "agosto", "setembro",
        "outubro", "novembro", "dezembro",
    ]
    .into_iter()
    .enumerate()
    {
        map.insert(name, i as u32 + 1);
    }
    for (i, abbr) in [
        "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
    ]
    .into_iter()
    .enumerate()
    {
        map.insert(abbr, i as u32 + 1);
    }

    // English
    for (i, name) in [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ]
    .into_iter()
    .enumerate()
    {
        map.insert(name, i as u32 + 1);
    }
    for (abbr, month) in [
        ("feb", 2),
        ("apr", 4),
        ("aug", 8),
        ("sep", 9),
        ("sept", 9),
        ("oct", 10),
        ("dec", 12),
    ] {
        map.insert(abbr, month);
    }

    map
});

/// Connectives and weekday names that carry no date information.
static NOISE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // connectives
        "de", "do", "da", "del", "dia", "em", "no", "na", "as", "a", "e", "of", "the", "at",
        "on", "and", "feira",
        // weekdays, pt
        "domingo", "segunda", "terca", "quarta", "quinta", "sexta", "sabado", "dom", "seg",
        "ter", "qua", "qui", "sex", "sab",
        // weekdays, en
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "mon",
        "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun",
    ]
    .into_iter()
    .collect()
});

/// Parse `text` reading ambiguous numeric dates day-first.
///
/// Missing year, month, day or time are copied from `default`. Two-digit years
/// are placed within fifty years of `reference_year`.
pub fn parse_day_first(
    text: &str,
    default: NaiveDateTime,
    reference_year: i32,
) -> DateParseResult<NaiveDateTime> {
    let folded = fold(text);
    if folded.trim().is_empty() {
        return Err(DateParseError::Empty);
    }

    let mut work = ISO_T_SEPARATOR.replace_all(&folded, "$1 $2").into_owned();
    let time = extract_time(&mut work)?;
    let parts = extract_date_parts(&work)?;

    if time.is_none() && parts.is_empty() {
        return Err(DateParseError::NothingFound);
    }

    let date = parts.resolve(default.date(), reference_year)?;
    let time = match time {
        Some(t) => t.to_naive_time()?,
        None => default.time(),
    };

    Ok(date.and_time(time))
}

/// Lowercase and strip the diacritics found in Portuguese and English dates.
fn fold(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimeOfDay {
    hour: u32,
    minute: u32,
    second: u32,
    meridiem: Option<Meridiem>,
}

impl TimeOfDay {
    fn from_captures(caps: &Captures<'_>) -> DateParseResult<Self> {
        let field = |name: &str| -> DateParseResult<u32> {
            match caps.name(name) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| DateParseError::OutOfRange(m.as_str().to_string())),
                None => Ok(0),
            }
        };

        let meridiem = caps.name("ampm").map(|m| {
            if m.as_str().starts_with('a') {
                Meridiem::Am
            } else {
                Meridiem::Pm
            }
        });

        Ok(Self {
            hour: field("h")?,
            minute: field("m")?,
            second: field("s")?,
            meridiem,
        })
    }

    fn to_naive_time(self) -> DateParseResult<NaiveTime> {
        let hour = match self.meridiem {
            None => self.hour,
            Some(_) if self.hour == 0 || self.hour > 12 => {
                return Err(DateParseError::OutOfRange(format!("{} with am/pm", self.hour)));
            }
            Some(Meridiem::Am) => self.hour % 12,
            Some(Meridiem::Pm) => self.hour % 12 + 12,
        };

        NaiveTime::from_hms_opt(hour, self.minute, self.second).ok_or_else(|| {
            DateParseError::OutOfRange(format!(
                "{:02}:{:02}:{:02}",
                hour, self.minute, self.second
            ))
        })
    }
}

/// Find and cut the single time-of-day expression out of `work`.
fn extract_time(work: &mut String) -> DateParseResult<Option<TimeOfDay>> {
    let patterns: [&Regex; 3] = [&COLON_TIME, &HOUR_MARK_TIME, &MERIDIEM_TIME];
    let mut found = None;

    for pattern in patterns {
        let (range, time) = match pattern.captures(work.as_str()) {
            Some(caps) => {
                let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
                (whole, TimeOfDay::from_captures(&caps)?)
            }
            None => continue,
        };

        if found.is_some() {
            return Err(DateParseError::MultipleTimes);
        }
        found = Some(time);
        work.replace_range(range, " ");
    }

    if found.is_some() && patterns.iter().any(|p| p.is_match(work.as_str())) {
        return Err(DateParseError::MultipleTimes);
    }

    Ok(found)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Number {
    text: String,
    value: u32,
}

impl Number {
    fn parse(text: &str) -> DateParseResult<Self> {
        if text.len() > 8 {
            return Err(DateParseError::OutOfRange(text.to_string()));
        }
        let value = text
            .parse()
            .map_err(|_| DateParseError::UnknownToken(text.to_string()))?;
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    fn digits(&self) -> usize {
        self.text.len()
    }

    /// Only a year can have three or more digits or exceed 31.
    fn looks_like_year(&self) -> bool {
        self.digits() >= 3 || self.value > 31
    }

    fn slice(&self, start: usize, end: usize) -> u32 {
        self.text[start..end].parse().unwrap_or(0)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct DateParts {
    numbers: Vec<Number>,
    month_name: Option<u32>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Ymd {
    year: Option<(u32, usize)>,
    month: Option<u32>,
    day: Option<u32>,
}

fn extract_date_parts(work: &str) -> DateParseResult<DateParts> {
    let mut parts = DateParts::default();

    for token in work.split(|c: char| c.is_whitespace() || c == ',') {
        for piece in token.split(['/', '-', '.']) {
            if piece.is_empty() {
                continue;
            }

            if let Some(digits) = strip_ordinal(piece) {
                parts.numbers.push(Number::parse(digits)?);
            } else if let Some(&month) = MONTHS.get(piece) {
                if parts.month_name.replace(month).is_some() {
                    return Err(DateParseError::UnknownToken(piece.to_string()));
                }
            } else if !NOISE_WORDS.contains(piece) {
                return Err(DateParseError::UnknownToken(piece.to_string()));
            }
        }
    }

    Ok(parts)
}

/// `10`, `1º`, `1st`, `22nd` → digits; anything else → `None`.
fn strip_ordinal(piece: &str) -> Option<&str> {
    let trimmed = piece.trim_end_matches(['º', 'ª']);
    let trimmed = ["st", "nd", "rd", "th", "o", "a"]
        .iter()
        .find_map(|suffix| trimmed.strip_suffix(suffix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(trimmed);

    (!trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())).then_some(trimmed)
}

impl DateParts {
    fn is_empty(&self) -> bool {
        self.numbers.is_empty() && self.month_name.is_none()
    }

    fn assign(&self) -> DateParseResult<Ymd> {
        let year = |n: &Number| Some((n.value, n.digits()));
        let nums = self.numbers.as_slice();

        let ymd = match (self.month_name, nums) {
            (Some(month), []) => Ymd {
                month: Some(month),
                ..Ymd::default()
            },
            (Some(month), [a]) if a.looks_like_year() => Ymd {
                year: year(a),
                month: Some(month),
                day: None,
            },
            (Some(month), [a]) => Ymd {
                year: None,
                month: Some(month),
                day: Some(a.value),
            },
            (Some(month), [a, b]) if a.looks_like_year() && !b.looks_like_year() => Ymd {
                year: year(a),
                month: Some(month),
                day: Some(b.value),
            },
            (Some(month), [a, b]) => Ymd {
                year: year(b),
                month: Some(month),
                day: Some(a.value),
            },
            (Some(_), _) => return Err(DateParseError::TooManyNumbers),

            (None, []) => Ymd::default(),
            (None, [a]) => match a.digits() {
                8 => compact_eight(a),
                6 => Ymd {
                    year: Some((a.slice(4, 6), 2)),
                    month: Some(a.slice(2, 4)),
                    day: Some(a.slice(0, 2)),
                },
                1 | 2 if a.value <= 31 => Ymd {
                    day: Some(a.value),
                    ..Ymd::default()
                },
                3 | 4 => Ymd {
                    year: year(a),
                    ..Ymd::default()
                },
                _ => return Err(DateParseError::OutOfRange(a.text.clone())),
            },
            (None, [a, b]) if b.looks_like_year() => Ymd {
                year: year(b),
                month: Some(a.value),
                day: None,
            },
            (None, [a, b]) if a.looks_like_year() => Ymd {
                year: year(a),
                month: Some(b.value),
                day: None,
            },
            (None, [a, b]) => day_first(None, a.value, b.value),
            (None, [a, b, c]) if a.looks_like_year() => Ymd {
                year: year(a),
                month: Some(b.value),
                day: Some(c.value),
            },
            (None, [a, b, c]) => day_first(year(c), a.value, b.value),
            (None, _) => return Err(DateParseError::TooManyNumbers),
        };

        Ok(ymd)
    }

    fn resolve(&self, default: NaiveDate, reference_year: i32) -> DateParseResult<NaiveDate> {
        let ymd = self.assign()?;

        let year = match ymd.year {
            Some((value, digits)) if digits <= 2 => expand_two_digit_year(value, reference_year),
            Some((value, _)) => value as i32,
            None => default.year(),
        };
        let month = ymd.month.unwrap_or(default.month());
        let max_day = days_in_month(year, month)
            .ok_or_else(|| DateParseError::OutOfRange(format!("month {}", month)))?;
        let day = ymd.day.unwrap_or_else(|| default.day().min(max_day));

        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateParseError::OutOfRange(format!("{:04}-{:02}-{:02}", year, month, day)))
    }
}

/// Day then month, unless only the swapped reading is a valid month.
fn day_first(year: Option<(u32, usize)>, first: u32, second: u32) -> Ymd {
    let (day, month) = if second > 12 && first <= 12 {
        (second, first)
    } else {
        (first, second)
    };
    Ymd {
        year,
        month: Some(month),
        day: Some(day),
    }
}

/// `DDMMYYYY` when that is a real date, otherwise `YYYYMMDD`.
fn compact_eight(n: &Number) -> Ymd {
    let (day, month, year) = (n.slice(0, 2), n.slice(2, 4), n.slice(4, 8));
    if NaiveDate::from_ymd_opt(year as i32, month, day).is_some() {
        return Ymd {
            year: Some((year, 4)),
            month: Some(month),
            day: Some(day),
        };
    }
    Ymd {
        year: Some((n.slice(0, 4), 4)),
        month: Some(n.slice(4, 6)),
        day: Some(n.slice(6, 8)),
    }
}

fn expand_two_digit_year(value: u32, reference_year: i32) -> i32 {
    let year = reference_year / 100 * 100 + value as i32;
    if year >= reference_year + 50 {
        year - 100
    } else if year < reference_year - 50 {
        year + 100
    } else {
        year
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}
