//! Data layer: schema, records, filtering, sorting, grouping, formatting.
//!
//! Architecture:
//! ```text
//!  .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset, typed by ColumnSchema
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  active per-column predicates → visible indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  group    │  visible indices → buckets by raw key
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  sort     │  stable sort inside each bucket
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  format   │  raw value → display string
//!   └──────────┘
//! ```

pub mod filter;
pub mod format;
pub mod group;
pub mod loader;
pub mod model;
pub mod schema;
pub mod sort;
