use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value as JsonValue;

use super::model::{Dataset, RawValue, Record};
use super::schema::{ColumnSchema, ValueKind};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a record dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "designation": "433 Eros", "h_mag": 10.4, ... }, ...]`
/// * `.csv`  – header row with column keys, one record per line
///
/// Cells are decoded according to the column kinds in `schema`. A cell that
/// does not decode is kept as text so the engine's malformed-value rules
/// apply to it; columns unknown to the schema are kept as they come.
pub fn load_file(path: &Path, schema: &ColumnSchema) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path, schema),
        "csv" => load_csv(path, schema),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path, schema: &ColumnSchema) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text, schema)
}

/// Parse a records-oriented JSON array.
pub fn parse_json(text: &str, schema: &ColumnSchema) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let record: Record = obj
            .iter()
            .map(|(key, val)| {
                let value = match schema.lookup(key) {
                    Ok(col) => decode_json(val, col.kind, i, key),
                    Err(_) => json_to_raw(val),
                };
                (key.clone(), value)
            })
            .collect();

        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

fn decode_json(val: &JsonValue, kind: ValueKind, row: usize, col: &str) -> RawValue {
    match (val, kind) {
        (JsonValue::String(s), _) => decode_text(s, kind, row, col),
        (JsonValue::Number(n), ValueKind::Number) => {
            n.as_f64().map_or_else(|| json_to_raw(val), RawValue::Number)
        }
        (JsonValue::Null, _) => RawValue::Null,
        (other, _) => {
            log::warn!("Row {row}, '{col}': {other} is not a {kind} value");
            json_to_raw(other)
        }
    }
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map_or_else(|| RawValue::Text(n.to_string()), RawValue::Number),
        JsonValue::Null => RawValue::Null,
        other => RawValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column keys, every cell is text and is
/// decoded by its column's kind. Empty cells are null.
fn load_csv(path: &Path, schema: &ColumnSchema) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader, schema)
}

/// Parse CSV text with a header row.
pub fn parse_csv(text: &str, schema: &ColumnSchema) -> Result<Dataset> {
    read_csv(csv::Reader::from_reader(text.as_bytes()), schema)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>, schema: &ColumnSchema) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let kinds: Vec<Option<ValueKind>> = headers
        .iter()
        .map(|h| schema.lookup(h).ok().map(|c| c.kind))
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let record: Record = row
            .iter()
            .zip(headers.iter().zip(&kinds))
            .map(|(cell, (col, kind))| {
                let value = match kind {
                    Some(kind) => decode_text(cell, *kind, row_no, col),
                    None if cell.is_empty() => RawValue::Null,
                    None => RawValue::text(cell),
                };
                (col.clone(), value)
            })
            .collect();

        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Cell decoding
// ---------------------------------------------------------------------------

/// Decode a text cell for a column of `kind`. Empty text is null.
fn decode_text(s: &str, kind: ValueKind, row: usize, col: &str) -> RawValue {
    if s.is_empty() {
        return RawValue::Null;
    }
    let decoded = match kind {
        ValueKind::Text | ValueKind::BooleanFlag => Some(RawValue::text(s)),
        ValueKind::Number => s.trim().parse::<f64>().ok().map(RawValue::Number),
        ValueKind::Date => parse_date(s).map(RawValue::Date),
    };
    decoded.unwrap_or_else(|| {
        log::warn!("Row {row}, '{col}': '{s}' is not a {kind} value");
        RawValue::text(s)
    })
}

/// Accepts `2023-05-09`, `2023-05-09T15:00:00` and `2023-05-09T15:00:00.000`.
/// Timestamps with a zone suffix (`Z`, `+02:00`) are converted to UTC.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(d) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(d.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}
