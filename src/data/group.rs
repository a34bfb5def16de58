use std::collections::HashMap;

use super::model::{RawValue, Record};

/// Record indices sharing one raw group key. `key == None` is the
/// ungrouped bucket (null or missing key).
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: Option<RawValue>,
    pub indices: Vec<usize>,
}

/// Partition `indices` by the raw value of `column`.
///
/// Buckets come out in first-appearance order of their key in `indices`;
/// members keep their input order.
pub fn group_indices(records: &[Record], indices: &[usize], column: &str) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut position: HashMap<Option<&RawValue>, usize> = HashMap::new();

    for &i in indices {
        let value = records[i].get(column);
        let key = (!value.is_null()).then_some(value);
        let slot = *position.entry(key).or_insert_with(|| {
            buckets.push(Bucket {
                key: key.cloned(),
                indices: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].indices.push(i);
    }

    buckets
}
