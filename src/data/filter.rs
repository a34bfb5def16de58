use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::{RawValue, Record};
use super::schema::ValueKind;

// ---------------------------------------------------------------------------
// Filter descriptors, one variant per column kind
// ---------------------------------------------------------------------------

/// Matching policy for text columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextOp {
    #[default]
    Contains,
    NotContains,
    Equals,
    NotEqual,
    StartsWith,
    EndsWith,
}

/// Text filter. Case-insensitive unless `case_sensitive` is set.
/// An empty pattern filters nothing out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TextFilter {
    #[serde(default)]
    pub op: TextOp,
    pub pattern: String,
    #[serde(default)]
    pub case_sensitive: bool,
}

impl TextFilter {
    pub fn new(op: TextOp, pattern: &str) -> Self {
        TextFilter {
            op,
            pattern: pattern.to_string(),
            case_sensitive: false,
        }
    }

    pub fn contains(pattern: &str) -> Self {
        TextFilter::new(TextOp::Contains, pattern)
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// The pattern as compared: lowercased unless case-sensitive.
    fn folded_pattern(&self) -> Cow<'_, str> {
        if self.case_sensitive {
            Cow::Borrowed(&self.pattern)
        } else {
            Cow::Owned(self.pattern.to_lowercase())
        }
    }

    fn matches(&self, value: &RawValue) -> bool {
        self.matches_folded(&self.folded_pattern(), value)
    }

    fn matches_folded(&self, pattern: &str, value: &RawValue) -> bool {
        if pattern.is_empty() {
            return true;
        }
        let Some(text) = value.as_text() else {
            return false;
        };
        let text = if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        };
        match self.op {
            TextOp::Contains => text.contains(pattern),
            TextOp::NotContains => !text.contains(pattern),
            TextOp::Equals => text == pattern,
            TextOp::NotEqual => text != pattern,
            TextOp::StartsWith => text.starts_with(pattern),
            TextOp::EndsWith => text.ends_with(pattern),
        }
    }
}

/// Number filter. `InRange` excludes both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberFilter {
    Equals(f64),
    NotEqual(f64),
    GreaterThan(f64),
    GreaterThanOrEqual(f64),
    LessThan(f64),
    LessThanOrEqual(f64),
    InRange { from: f64, to: f64 },
}

impl NumberFilter {
    fn matches(&self, value: &RawValue) -> bool {
        let Some(v) = value.as_number() else {
            return false;
        };
        match *self {
            NumberFilter::Equals(x) => v == x,
            NumberFilter::NotEqual(x) => v != x,
            NumberFilter::GreaterThan(x) => v > x,
            NumberFilter::GreaterThanOrEqual(x) => v >= x,
            NumberFilter::LessThan(x) => v < x,
            NumberFilter::LessThanOrEqual(x) => v <= x,
            NumberFilter::InRange { from, to } => v > from && v < to,
        }
    }
}

/// Date filter against reference days. `InRange` excludes both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFilter {
    On(NaiveDate),
    NotEqual(NaiveDate),
    Before(NaiveDate),
    After(NaiveDate),
    InRange { from: NaiveDate, to: NaiveDate },
}

impl DateFilter {
    fn matches(&self, value: &RawValue) -> bool {
        let rel = |reference| compare_to_reference(value, reference);
        match *self {
            DateFilter::On(d) => rel(d) == Some(Ordering::Equal),
            DateFilter::NotEqual(d) => matches!(rel(d), Some(Ordering::Less | Ordering::Greater)),
            DateFilter::Before(d) => rel(d) == Some(Ordering::Less),
            DateFilter::After(d) => rel(d) == Some(Ordering::Greater),
            DateFilter::InRange { from, to } => {
                rel(from) == Some(Ordering::Greater) && rel(to) == Some(Ordering::Less)
            }
        }
    }
}

/// Three-way comparison of a cell against a reference day.
///
/// Both sides are compared as calendar days. A null cell is always `Less`
/// (earlier than any reference), so it can match `Before` but never `On`.
/// A cell that is not a date yields `None` and matches nothing.
pub fn compare_to_reference(cell: &RawValue, reference: NaiveDate) -> Option<Ordering> {
    match cell {
        RawValue::Null => Some(Ordering::Less),
        RawValue::Date(d) => Some(d.date().cmp(&reference)),
        _ => None,
    }
}

/// Flag filter: exact match on the raw code, not the "Yes"/"No" label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagFilter {
    pub code: String,
}

impl FlagFilter {
    pub fn new(code: &str) -> Self {
        FlagFilter {
            code: code.to_string(),
        }
    }

    fn matches(&self, value: &RawValue) -> bool {
        value.as_text() == Some(self.code.as_str())
    }
}

/// An active filter on one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterDescriptor {
    Text(TextFilter),
    Number(NumberFilter),
    Date(DateFilter),
    BooleanFlag(FlagFilter),
}

impl FilterDescriptor {
    /// The column kind this descriptor applies to.
    pub fn kind(&self) -> ValueKind {
        match self {
            FilterDescriptor::Text(_) => ValueKind::Text,
            FilterDescriptor::Number(_) => ValueKind::Number,
            FilterDescriptor::Date(_) => ValueKind::Date,
            FilterDescriptor::BooleanFlag(_) => ValueKind::BooleanFlag,
        }
    }

    /// Whether a raw cell value passes this filter.
    pub fn matches(&self, value: &RawValue) -> bool {
        match self {
            FilterDescriptor::Text(f) => f.matches(value),
            FilterDescriptor::Number(f) => f.matches(value),
            FilterDescriptor::Date(f) => f.matches(value),
            FilterDescriptor::BooleanFlag(f) => f.matches(value),
        }
    }
}

impl From<TextFilter> for FilterDescriptor {
    fn from(f: TextFilter) -> Self {
        FilterDescriptor::Text(f)
    }
}

impl From<NumberFilter> for FilterDescriptor {
    fn from(f: NumberFilter) -> Self {
        FilterDescriptor::Number(f)
    }
}

impl From<DateFilter> for FilterDescriptor {
    fn from(f: DateFilter) -> Self {
        FilterDescriptor::Date(f)
    }
}

impl From<FlagFilter> for FilterDescriptor {
    fn from(f: FlagFilter) -> Self {
        FilterDescriptor::BooleanFlag(f)
    }
}

// ---------------------------------------------------------------------------
// Filter state: at most one descriptor per column, AND across columns
// ---------------------------------------------------------------------------

/// Per-column active filters: column key → descriptor.
/// A column without an entry lets every record through.
pub type FilterState = BTreeMap<String, FilterDescriptor>;

/// Whether `record` passes every active filter.
pub fn passes_all(record: &Record, filters: &FilterState) -> bool {
    filters
        .iter()
        .all(|(column, filter)| filter.matches(record.get(column)))
}

/// Return indices of records that pass all active filters, in input order.
///
/// Text patterns are case-folded once up front, not per record.
pub fn filtered_indices(records: &[Record], filters: &FilterState) -> Vec<usize> {
    let prepared: Vec<(&str, &FilterDescriptor, Option<Cow<'_, str>>)> = filters
        .iter()
        .map(|(column, filter)| {
            let pattern = match filter {
                FilterDescriptor::Text(f) => Some(f.folded_pattern()),
                _ => None,
            };
            (column.as_str(), filter, pattern)
        })
        .collect();

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| {
            prepared.iter().all(|(column, filter, pattern)| {
                let value = r.get(column);
                match (filter, pattern) {
                    (FilterDescriptor::Text(f), Some(p)) => f.matches_folded(p, value),
                    _ => filter.matches(value),
                }
            })
        })
        .map(|(i, _)| i)
        .collect()
}
