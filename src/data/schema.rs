use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

// ---------------------------------------------------------------------------
// ValueKind – how a column's raw values are compared and rendered
// ---------------------------------------------------------------------------

/// The closed set of column kinds. Every filter, sort and format rule
/// dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Text,
    Number,
    Date,
    /// Single-character codes, `"Y"` / `"N"`.
    BooleanFlag,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::BooleanFlag => "boolean-flag",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// ColumnDef / ColumnSchema
// ---------------------------------------------------------------------------

/// One column declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub key: String,
    pub display_name: String,
    pub kind: ValueKind,
    pub groupable: bool,
}

impl ColumnDef {
    pub fn new(key: &str, display_name: &str, kind: ValueKind) -> Self {
        ColumnDef {
            key: key.to_string(),
            display_name: display_name.to_string(),
            kind,
            groupable: false,
        }
    }

    pub fn groupable(mut self) -> Self {
        self.groupable = true;
        self
    }
}

/// Ordered, read-only set of column declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSchema {
    columns: Vec<ColumnDef>,
}

impl ColumnSchema {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        ColumnSchema { columns }
    }

    /// Look up a column by key.
    pub fn lookup(&self, key: &str) -> Result<&ColumnDef> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| ViewError::UnknownColumn(key.to_string()))
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Near-Earth-object schema
// ---------------------------------------------------------------------------

static NEO_SCHEMA: Lazy<ColumnSchema> = Lazy::new(|| {
    use ValueKind::*;
    ColumnSchema::new(vec![
        ColumnDef::new("designation", "Designation", Text),
        ColumnDef::new("discovery_date", "Discovery Date", Date),
        ColumnDef::new("h_mag", "H (mag)", Number),
        ColumnDef::new("moid_au", "MOID (au)", Number),
        ColumnDef::new("q_au_1", "q (au)", Number),
        ColumnDef::new("q_au_2", "Q (au)", Number),
        ColumnDef::new("period_yr", "Period (yr)", Number),
        ColumnDef::new("i_deg", "Inclination (deg)", Number),
        ColumnDef::new("pha", "Potentially Hazardous", BooleanFlag),
        ColumnDef::new("orbit_class", "Orbit Class", Text).groupable(),
    ])
});

/// The process-wide schema of the near-Earth-asteroid dataset.
pub fn neo_schema() -> &'static ColumnSchema {
    &NEO_SCHEMA
}
