use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::model::{RawValue, Record};
use super::schema::{ColumnDef, ValueKind};

// ---------------------------------------------------------------------------
// Sort key
// ---------------------------------------------------------------------------

/// Sort order specification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// The single active sort: a column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        SortKey {
            column: column.to_string(),
            direction,
        }
    }

    pub fn ascending(column: &str) -> Self {
        SortKey::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: &str) -> Self {
        SortKey::new(column, SortDirection::Descending)
    }
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Where a value lands in the order. `First` and `Last` are pinned and
/// ignore the direction; only `Among` values are flipped by it.
enum Slot<T> {
    First,
    Among(T),
    Last,
}

impl<T> Slot<T> {
    fn position(&self) -> u8 {
        match self {
            Slot::First => 0,
            Slot::Among(_) => 1,
            Slot::Last => 2,
        }
    }
}

fn ranked<T>(
    a: Slot<T>,
    b: Slot<T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (&a, &b) {
        (Slot::Among(x), Slot::Among(y)) => direction.apply(cmp(x, y)),
        _ => a.position().cmp(&b.position()),
    }
}

fn text_slot(v: &RawValue) -> Slot<&str> {
    v.as_text().map_or(Slot::Last, Slot::Among)
}

fn number_slot(v: &RawValue) -> Slot<f64> {
    v.as_number().map_or(Slot::Last, Slot::Among)
}

fn date_slot(v: &RawValue) -> Slot<chrono::NaiveDateTime> {
    match v {
        RawValue::Null => Slot::First,
        RawValue::Date(d) => Slot::Among(*d),
        _ => Slot::Last,
    }
}

/// Canonical flag order: `Y`, `N`, other codes, then anything that is not a code.
fn flag_slot(v: &RawValue) -> Slot<(u8, &str)> {
    let rank = match v.as_text() {
        Some("Y") => (0, ""),
        Some("N") => (1, ""),
        Some(other) => (2, other),
        None => (3, ""),
    };
    Slot::Among(rank)
}

/// Compare two raw values of a column of `kind`.
///
/// * text: lexicographic, non-text last
/// * number: numeric, null/NaN/non-number last in both directions
/// * date: chronological, null first in both directions, non-date last
/// * boolean flag: `Y < N < other`, fully flipped by the direction
pub fn compare_values(
    kind: ValueKind,
    a: &RawValue,
    b: &RawValue,
    direction: SortDirection,
) -> Ordering {
    match kind {
        ValueKind::Text => ranked(text_slot(a), text_slot(b), direction, |x, y| x.cmp(y)),
        ValueKind::Number => ranked(number_slot(a), number_slot(b), direction, |x, y| {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }),
        ValueKind::Date => ranked(date_slot(a), date_slot(b), direction, |x, y| x.cmp(y)),
        ValueKind::BooleanFlag => {
            ranked(flag_slot(a), flag_slot(b), direction, |x, y| x.cmp(y))
        }
    }
}

/// Stable in-place sort of record indices by `column`.
/// Equal keys keep their relative input order.
pub fn sort_indices(
    records: &[Record],
    indices: &mut [usize],
    column: &ColumnDef,
    direction: SortDirection,
) {
    indices.sort_by(|&a, &b| {
        compare_values(
            column.kind,
            records[a].get(&column.key),
            records[b].get(&column.key),
            direction,
        )
    });
}
