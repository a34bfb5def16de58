use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

// ---------------------------------------------------------------------------
// RawValue – a single cell as loaded
// ---------------------------------------------------------------------------

/// A cell value exactly as loaded. The engine reads these, never rewrites them.
///
/// Boolean flags are stored as their `Text` code (`"Y"`, `"N"`); dates keep any
/// time-of-day the source carried, filters and sorts normalise to the day.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Null,
}

// -- Manual Eq/Ord/Hash so RawValue can key group buckets and value sets --

impl PartialEq for RawValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for RawValue {}

impl PartialOrd for RawValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RawValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use RawValue::*;
        fn discriminant(v: &RawValue) -> u8 {
            match v {
                Null => 0,
                Number(_) => 1,
                Date(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Number(a), Number(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for RawValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            RawValue::Text(s) => s.hash(state),
            RawValue::Number(n) => n.to_bits().hash(state),
            RawValue::Date(d) => d.hash(state),
            RawValue::Null => {}
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Number(v) => write!(f, "{v}"),
            RawValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%dT%H:%M:%S")),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl RawValue {
    pub fn text(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }

    /// A date-only value, stored at midnight.
    pub fn date(date: NaiveDate) -> Self {
        RawValue::Date(date.and_time(chrono::NaiveTime::MIN))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, `None` for anything that is not a number or is NaN.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            RawValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::text(s)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(d: NaiveDate) -> Self {
        RawValue::date(d)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(d: NaiveDateTime) -> Self {
        RawValue::Date(d)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Record – one near-Earth object
// ---------------------------------------------------------------------------

static NULL: RawValue = RawValue::Null;

/// One row: column key → raw value. Missing keys read as `Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, RawValue>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, key: &str, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<RawValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> &RawValue {
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn fields(&self) -> &BTreeMap<String, RawValue> {
        &self.fields
    }
}

impl FromIterator<(String, RawValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded sequence
// ---------------------------------------------------------------------------

/// Immutable, ordered record sequence. Position in `records` is the
/// original dataset order used for stable tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted set of the raw values present in `column`, `Null` included.
    pub fn distinct_values(&self, column: &str) -> BTreeSet<RawValue> {
        self.records.iter().map(|r| r.get(column).clone()).collect()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::from_records(records)
    }
}
