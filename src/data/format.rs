//! Display strings for raw values. Presentation only: nothing here feeds back
//! into filtering, sorting or grouping.

use chrono::NaiveDateTime;

use super::model::RawValue;
use super::schema::{ColumnDef, ValueKind};

/// Format a raw value for display in `column`.
pub fn format_value(column: &ColumnDef, value: &RawValue) -> String {
    match column.kind {
        ValueKind::Text => format_text(value),
        ValueKind::Number => format_number(value),
        ValueKind::Date => value.as_date().map(format_date).unwrap_or_default(),
        ValueKind::BooleanFlag => format_flag(value).to_string(),
    }
}

/// Format date as "May 9, 2023".
pub fn format_date(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Map a flag code to "Yes" / "No"; anything else is blank.
pub fn format_flag(value: &RawValue) -> &'static str {
    match value.as_text() {
        Some("Y") => "Yes",
        Some("N") => "No",
        _ => "",
    }
}

fn format_number(value: &RawValue) -> String {
    match value {
        RawValue::Number(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}

fn format_text(value: &RawValue) -> String {
    match value {
        RawValue::Null => String::new(),
        other => other.to_string(),
    }
}
