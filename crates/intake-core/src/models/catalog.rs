//! Available-slot catalog models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{IntakeError, IntakeResult};

/// Number of `|`-separated fields in a well-formed composite slot key.
pub const SLOT_KEY_FIELDS: usize = 5;

/// Ordered list of days with bookable slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "CatalogRepr")]
pub struct SlotCatalog {
    #[serde(rename = "availableSlots")]
    pub days: Vec<DaySlots>,
}

/// All slots offered on a single day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySlots {
    /// Calendar day, `YYYY-MM-DD`
    #[serde(alias = "data")]
    pub date: String,
    /// Composite slot key → opaque metadata, in catalog order
    #[serde(alias = "horarios", default, deserialize_with = "empty_if_null")]
    pub slots: Map<String, Value>,
}

/// Accepted encodings of a catalog on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogRepr {
    Wrapped {
        #[serde(rename = "availableSlots", alias = "horarios_disponiveis")]
        days: Vec<DaySlots>,
    },
    Bare(Vec<DaySlots>),
}

impl From<CatalogRepr> for SlotCatalog {
    fn from(repr: CatalogRepr) -> Self {
        match repr {
            CatalogRepr::Wrapped { days } | CatalogRepr::Bare(days) => SlotCatalog { days },
        }
    }
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SlotCatalog {
    pub fn new(days: Vec<DaySlots>) -> Self {
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First day entry in catalog order.
    pub fn first_day(&self) -> Option<&DaySlots> {
        self.days.first()
    }

    /// First day entry for `date`. Later duplicates are never returned.
    pub fn day(&self, date: &str) -> Option<&DaySlots> {
        self.days.iter().find(|d| d.date == date)
    }
}

impl DaySlots {
    /// Create a day from slot keys with empty metadata.
    pub fn with_keys<I, S>(date: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            date: date.into(),
            slots: keys
                .into_iter()
                .map(|k| (k.into(), Value::Object(Map::new())))
                .collect(),
        }
    }

    /// Composite keys in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}

/// A composite slot key split into its fields.
///
/// Only the fifth field (`HH:MM`) has a meaning to the resolver; the others
/// are opaque scheduling identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKey<'a> {
    raw: &'a str,
    fields: [&'a str; SLOT_KEY_FIELDS],
}

impl<'a> SlotKey<'a> {
    /// Split a key on `|`. Returns `None` unless there are exactly five fields.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let fields: Vec<&str> = raw.split('|').collect();
        let fields: [&str; SLOT_KEY_FIELDS] = fields.try_into().ok()?;
        Some(Self { raw, fields })
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    pub fn fields(&self) -> &[&'a str; SLOT_KEY_FIELDS] {
        &self.fields
    }

    /// The `HH:MM` time field.
    pub fn time(&self) -> &'a str {
        self.fields[SLOT_KEY_FIELDS - 1]
    }
}

/// A slot catalog as received: either a JSON string or an already structured value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CatalogInput {
    /// JSON text that still needs decoding
    Encoded(String),
    /// Any JSON value; its shape is checked on decode
    Structured(Value),
    /// Built in Rust, already typed
    #[serde(skip_deserializing)]
    Parsed(SlotCatalog),
}

impl CatalogInput {
    /// Decode into a typed catalog.
    ///
    /// Blank strings and JSON `null` count as absent. Text that is not JSON fails
    /// with `MalformedCatalogJson`; JSON of the wrong shape fails with
    /// `InvalidCatalogShape`.
    pub fn decode(self) -> IntakeResult<Option<SlotCatalog>> {
        let value = match self {
            CatalogInput::Parsed(catalog) => return Ok(Some(catalog)),
            CatalogInput::Encoded(text) => {
                if text.trim().is_empty() {
                    return Ok(None);
                }
                serde_json::from_str::<Value>(&text).map_err(IntakeError::MalformedCatalogJson)?
            }
            CatalogInput::Structured(value) => value,
        };

        if value.is_null() {
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(IntakeError::InvalidCatalogShape)
    }
}

impl From<SlotCatalog> for CatalogInput {
    fn from(catalog: SlotCatalog) -> Self {
        CatalogInput::Parsed(catalog)
    }
}

impl From<&str> for CatalogInput {
    fn from(text: &str) -> Self {
        CatalogInput::Encoded(text.to_string())
    }
}
