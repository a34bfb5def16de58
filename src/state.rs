use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::filter::{filtered_indices, FilterDescriptor, FilterState};
use crate::data::format::format_value;
use crate::data::group::{group_indices, Bucket};
use crate::data::model::{Dataset, RawValue, Record};
use crate::data::schema::{neo_schema, ColumnSchema};
use crate::data::sort::{sort_indices, SortDirection, SortKey};
use crate::error::{Result, ViewError};

// ---------------------------------------------------------------------------
// View snapshot – what the presentation layer renders
// ---------------------------------------------------------------------------

/// One visible record with its display strings.
#[derive(Debug, Clone, Serialize)]
pub struct ViewRow<'d> {
    /// Position in the dataset.
    pub index: usize,
    pub raw: &'d Record,
    /// Column key → formatted string, for every schema column.
    pub formatted: BTreeMap<String, String>,
}

impl ViewRow<'_> {
    pub fn formatted(&self, column: &str) -> Option<&str> {
        self.formatted.get(column).map(String::as_str)
    }
}

/// A group bucket. `key` is `None` for the flat view and for the bucket of
/// records whose group key is null.
#[derive(Debug, Clone, Serialize)]
pub struct ViewGroup<'d> {
    pub key: Option<RawValue>,
    pub rows: Vec<ViewRow<'d>>,
}

/// Derived view: filtered, grouped, sorted, formatted. Recomputed on demand.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<'d> {
    pub groups: Vec<ViewGroup<'d>>,
}

impl<'d> ViewSnapshot<'d> {
    /// All visible rows, bucket after bucket.
    pub fn rows(&self) -> impl Iterator<Item = &ViewRow<'d>> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }

    /// Dataset positions of the visible rows, in display order.
    pub fn indices(&self) -> Vec<usize> {
        self.rows().map(|r| r.index).collect()
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// View state controller
// ---------------------------------------------------------------------------

/// Active filters, sort and grouping over a schema, independent of rendering.
///
/// Every mutation validates its column against the schema up front, so
/// [`ViewState::compute_view`] never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<'s> {
    schema: &'s ColumnSchema,
    filters: FilterState,
    sort: Option<SortKey>,
    group: Option<String>,
}

impl ViewState<'static> {
    /// Pristine view over the near-Earth-object schema.
    pub fn neo() -> Self {
        ViewState::new(neo_schema())
    }
}

impl<'s> ViewState<'s> {
    /// Pristine view: no filters, no sort, no grouping.
    pub fn new(schema: &'s ColumnSchema) -> Self {
        ViewState {
            schema,
            filters: FilterState::new(),
            sort: None,
            group: None,
        }
    }

    pub fn schema(&self) -> &'s ColumnSchema {
        self.schema
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filter(&self, column: &str) -> Option<&FilterDescriptor> {
        self.filters.get(column)
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Whether no filter, sort or grouping is active.
    pub fn is_pristine(&self) -> bool {
        self.filters.is_empty() && self.sort.is_none() && self.group.is_none()
    }

    /// Install `filter` on `column`, replacing any filter already there.
    pub fn set_filter(&mut self, column: &str, filter: impl Into<FilterDescriptor>) -> Result<()> {
        let filter = filter.into();
        let def = self.schema.lookup(column)?;
        if filter.kind() != def.kind {
            return Err(ViewError::KindMismatch {
                column: column.to_string(),
                expected: def.kind,
                found: filter.kind(),
            });
        }
        log::debug!("set filter on '{column}': {filter:?}");
        self.filters.insert(column.to_string(), filter);
        Ok(())
    }

    /// Remove the filter on `column`, returning it if one was active.
    pub fn clear_filter(&mut self, column: &str) -> Result<Option<FilterDescriptor>> {
        self.schema.lookup(column)?;
        let removed = self.filters.remove(column);
        if removed.is_some() {
            log::debug!("cleared filter on '{column}'");
        }
        Ok(removed)
    }

    pub fn set_sort(&mut self, column: &str, direction: SortDirection) -> Result<()> {
        self.schema.lookup(column)?;
        log::debug!("sort by '{column}' {direction:?}");
        self.sort = Some(SortKey::new(column, direction));
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            log::debug!("cleared sort");
        }
    }

    pub fn set_group(&mut self, column: &str) -> Result<()> {
        let def = self.schema.lookup(column)?;
        if !def.groupable {
            return Err(ViewError::NotGroupable(column.to_string()));
        }
        log::debug!("group by '{column}'");
        self.group = Some(column.to_string());
        Ok(())
    }

    pub fn clear_group(&mut self) {
        if self.group.take().is_some() {
            log::debug!("cleared grouping");
        }
    }

    /// Drop every filter, the sort and the grouping in one step.
    pub fn reset_all(&mut self) {
        log::debug!(
            "reset view ({} filters, sort {:?}, group {:?})",
            self.filters.len(),
            self.sort,
            self.group
        );
        *self = ViewState::new(self.schema);
    }

    /// Produce the visible rows: filter, then group, then sort within each
    /// bucket, then format.
    pub fn compute_view<'d>(&self, dataset: &'d Dataset) -> ViewSnapshot<'d> {
        let records = dataset.records();
        let visible = filtered_indices(records, &self.filters);
        let n_visible = visible.len();

        let mut buckets = match &self.group {
            Some(column) => group_indices(records, &visible, column),
            None => vec![Bucket {
                key: None,
                indices: visible,
            }],
        };

        if let Some(key) = &self.sort {
            if let Ok(column) = self.schema.lookup(&key.column) {
                for bucket in &mut buckets {
                    sort_indices(records, &mut bucket.indices, column, key.direction);
                }
            }
        }

        let groups: Vec<ViewGroup<'d>> = buckets
            .into_iter()
            .map(|bucket| ViewGroup {
                key: bucket.key,
                rows: bucket
                    .indices
                    .into_iter()
                    .map(|i| self.row(i, &records[i]))
                    .collect(),
            })
            .collect();

        log::trace!(
            "computed view: {n_visible}/{} records visible in {} groups",
            dataset.len(),
            groups.len()
        );

        ViewSnapshot { groups }
    }

    fn row<'d>(&self, index: usize, record: &'d Record) -> ViewRow<'d> {
        let formatted = self
            .schema
            .columns()
            .iter()
            .map(|col| (col.key.clone(), format_value(col, record.get(&col.key))))
            .collect();
        ViewRow {
            index,
            raw: record,
            formatted,
        }
    }
}
