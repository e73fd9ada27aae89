use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Storage key of another document.
pub type DocumentId = String;

/// A value kept in its raw ingested form plus an optional cleaned projection.
///
/// `normalized` being `None` means normalization has not happened yet (or
/// did not succeed); it is not an error by itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue<T, O = String> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<T>,
    pub original: O,
}

impl<T, O> NormalizedValue<T, O> {
    /// Raw value with no normalized projection yet.
    pub fn raw(original: O) -> Self {
        Self { normalized: None, original }
    }

    pub fn with_normalized(original: O, normalized: T) -> Self {
        Self { normalized: Some(normalized), original }
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized.is_some()
    }
}

/// One component of a structured reference: text or a number.
///
/// Numbers keep their JSON form, so `2` stays an integer and `2.5` a float
/// when the reference is written back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferencePart {
    Number(Number),
    Text(String),
}

impl ReferencePart {
    /// Float part; `None` for NaN and infinities, which JSON cannot carry.
    pub fn float(value: f64) -> Option<Self> {
        Number::from_f64(value).map(ReferencePart::Number)
    }
}

impl From<&str> for ReferencePart {
    fn from(value: &str) -> Self { ReferencePart::Text(value.to_string()) }
}

impl From<i64> for ReferencePart {
    fn from(value: i64) -> Self { ReferencePart::Number(value.into()) }
}

impl From<u64> for ReferencePart {
    fn from(value: u64) -> Self { ReferencePart::Number(value.into()) }
}

/// Ordered citation parts, e.g. `["BG", 2, 13]`.
pub type Reference = Vec<ReferencePart>;

/// `[year, month, day]`; any component may be unknown.
pub type DateParts = Vec<Option<i32>>;
