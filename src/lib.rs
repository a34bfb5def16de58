//! In-memory view engine for near-Earth-object orbital records: per-column
//! filters, a single-column stable sort, grouping, and display formatting,
//! all driven by each column's declared kind.

pub mod data;
pub mod error;
pub mod state;

pub use data::filter::{
    DateFilter, FilterDescriptor, FilterState, FlagFilter, NumberFilter, TextFilter, TextOp,
};
pub use data::model::{Dataset, RawValue, Record};
pub use data::schema::{neo_schema, ColumnDef, ColumnSchema, ValueKind};
pub use data::sort::{SortDirection, SortKey};
pub use error::{Result, ViewError};
pub use state::{ViewGroup, ViewRow, ViewSnapshot, ViewState};
