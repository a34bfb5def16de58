use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use neo_grid::{
    ColumnSchema, DateFilter, FilterDescriptor, FlagFilter, NumberFilter, SortDirection,
    TextFilter, TextOp, ValueKind, ViewSnapshot,
};

#[derive(Parser)]
#[command(name = "neo-grid")]
#[command(about = "Filter, sort and group near-Earth-object records", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Dataset file (.json or .csv)
    pub path: PathBuf,

    /// Column filter, e.g. `pha=is:Y`, `h_mag=range:18..22`,
    /// `designation=contains/cs:Eros`, `discovery_date=after:2019-01-01`
    #[arg(long = "filter", value_name = "COLUMN=OP:VALUE")]
    pub filters: Vec<String>,

    /// Sort column with optional direction, e.g. `discovery_date:desc`
    #[arg(long, value_name = "COLUMN[:asc|desc]")]
    pub sort: Option<String>,

    /// Group by a groupable column
    #[arg(long, value_name = "COLUMN")]
    pub group: Option<String>,

    /// Print at most this many rows per group
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print the view as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Parse `COLUMN=OP:VALUE` into a column key and a descriptor for that
/// column's kind.
pub fn parse_filter(arg: &str, schema: &ColumnSchema) -> Result<(String, FilterDescriptor)> {
    let (column, rest) = arg
        .split_once('=')
        .with_context(|| format!("filter '{arg}' is not COLUMN=OP:VALUE"))?;
    let (op, value) = rest
        .split_once(':')
        .with_context(|| format!("filter '{arg}' is missing ':' between operator and value"))?;
    let kind = schema.lookup(column)?.kind;

    let filter = match kind {
        ValueKind::Text => FilterDescriptor::Text(parse_text_filter(op, value)?),
        ValueKind::Number => FilterDescriptor::Number(parse_number_filter(op, value)?),
        ValueKind::Date => FilterDescriptor::Date(parse_date_filter(op, value)?),
        ValueKind::BooleanFlag => match op {
            "is" => FilterDescriptor::BooleanFlag(FlagFilter::new(value)),
            other => bail!("unknown flag operator '{other}' (expected is)"),
        },
    };
    Ok((column.to_string(), filter))
}

fn parse_text_filter(op: &str, value: &str) -> Result<TextFilter> {
    let (op, case_sensitive) = match op.strip_suffix("/cs") {
        Some(op) => (op, true),
        None => (op, false),
    };
    let op = match op {
        "contains" => TextOp::Contains,
        "not-contains" => TextOp::NotContains,
        "equals" => TextOp::Equals,
        "not-equal" => TextOp::NotEqual,
        "starts-with" => TextOp::StartsWith,
        "ends-with" => TextOp::EndsWith,
        other => bail!("unknown text operator '{other}'"),
    };
    Ok(TextFilter {
        op,
        pattern: value.to_string(),
        case_sensitive,
    })
}

fn parse_number_filter(op: &str, value: &str) -> Result<NumberFilter> {
    let num = |s: &str| -> Result<f64> {
        s.trim()
            .parse::<f64>()
            .with_context(|| format!("'{s}' is not a number"))
    };
    Ok(match op {
        "eq" => NumberFilter::Equals(num(value)?),
        "ne" => NumberFilter::NotEqual(num(value)?),
        "gt" => NumberFilter::GreaterThan(num(value)?),
        "ge" => NumberFilter::GreaterThanOrEqual(num(value)?),
        "lt" => NumberFilter::LessThan(num(value)?),
        "le" => NumberFilter::LessThanOrEqual(num(value)?),
        "range" => {
            let (from, to) = split_range(value)?;
            NumberFilter::InRange {
                from: num(from)?,
                to: num(to)?,
            }
        }
        other => bail!("unknown number operator '{other}'"),
    })
}

fn parse_date_filter(op: &str, value: &str) -> Result<DateFilter> {
    let day = |s: &str| -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("'{s}' is not a YYYY-MM-DD date"))
    };
    Ok(match op {
        "on" => DateFilter::On(day(value)?),
        "not-on" => DateFilter::NotEqual(day(value)?),
        "before" => DateFilter::Before(day(value)?),
        "after" => DateFilter::After(day(value)?),
        "range" => {
            let (from, to) = split_range(value)?;
            DateFilter::InRange {
                from: day(from)?,
                to: day(to)?,
            }
        }
        other => bail!("unknown date operator '{other}'"),
    })
}

fn split_range(value: &str) -> Result<(&str, &str)> {
    value
        .split_once("..")
        .with_context(|| format!("range '{value}' is not FROM..TO"))
}

/// Parse `COLUMN[:asc|desc]`.
pub fn parse_sort(arg: &str) -> Result<(&str, SortDirection)> {
    match arg.rsplit_once(':') {
        None => Ok((arg, SortDirection::Ascending)),
        Some((column, "asc")) => Ok((column, SortDirection::Ascending)),
        Some((column, "desc")) => Ok((column, SortDirection::Descending)),
        Some((_, other)) => bail!("unknown sort direction '{other}' (expected asc or desc)"),
    }
}

// ---------------------------------------------------------------------------
// Plain-text table
// ---------------------------------------------------------------------------

/// Render the snapshot as an aligned text table, one section per group.
pub fn render_table(
    snapshot: &ViewSnapshot<'_>,
    schema: &ColumnSchema,
    group_column: Option<&str>,
    limit: Option<usize>,
) -> String {
    let columns = schema.columns();
    let mut widths: Vec<usize> = columns.iter().map(|c| c.display_name.chars().count()).collect();
    for row in snapshot.rows() {
        for (w, col) in widths.iter_mut().zip(columns) {
            let len = row.formatted(&col.key).map_or(0, |s| s.chars().count());
            *w = (*w).max(len);
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(columns.iter().map(|c| c.display_name.as_str()).collect()));
    out.push('\n');

    for group in &snapshot.groups {
        if let Some(col) = group_column {
            let label = group
                .key
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |k| k.to_string());
            out.push_str(&format!("-- {col}: {label} ({})\n", group.rows.len()));
        }
        let shown = limit.unwrap_or(usize::MAX);
        for row in group.rows.iter().take(shown) {
            let cells = columns
                .iter()
                .map(|c| row.formatted(&c.key).unwrap_or(""))
                .collect();
            out.push_str(&line(cells));
            out.push('\n');
        }
    }

    out
}
