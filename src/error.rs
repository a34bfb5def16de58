use thiserror::Error;

use crate::data::schema::ValueKind;

/// Caller-input errors raised by the view state actions.
///
/// Malformed *data* never produces one of these: a cell whose raw value does
/// not fit its column is handled by the filter, sort and format policies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("column '{column}' holds {expected} values, got a {found} filter")]
    KindMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("column '{0}' cannot be used for grouping")]
    NotGroupable(String),
}

pub type Result<T> = std::result::Result<T, ViewError>;
