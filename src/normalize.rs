//! Post-processing applied to each segment's raw parameter tokens.
//!
//! The rules run in a fixed order: value-less tokens are filtered out,
//! duplicate keys collapse to their last declaration, and comma-delimited
//! values split into lists. Each rule is a total function over its input and
//! the pipeline is idempotent, so re-normalizing a normalized map changes
//! nothing.

use crate::matrix::{MatrixMap, MatrixValue};
use crate::parser::RawPair;

/// Runs the full pipeline over one segment's raw pairs.
pub(crate) fn normalize(pairs: Vec<RawPair>) -> MatrixMap {
    comma_separate(use_last_declared(drop_dangling_keys(pairs)))
}

/// A token with no `=` contributes no entry, neither the key nor an empty
/// value. Filtering happens before any map exists, so a dropped key cannot
/// resurface through a later rule.
fn drop_dangling_keys(pairs: Vec<RawPair>) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .filter_map(|pair| pair.value.map(|value| (pair.key, value)))
        .collect()
}

/// Collapses repeated declarations of a key down to the last one. The key
/// keeps the position of its first declaration.
fn use_last_declared(pairs: Vec<(String, String)>) -> MatrixMap {
    let mut map = MatrixMap::new();
    for (key, value) in pairs {
        map.insert(key, MatrixValue::Single(value));
    }
    map
}

/// Splits scalar values containing `,` into ordered lists. Empty runs
/// between commas survive as empty strings, so the element count is always
/// comma count plus one. Values without a comma stay scalar.
fn comma_separate(map: MatrixMap) -> MatrixMap {
    map.into_iter()
        .map(|(key, value)| (key, split_commas(value)))
        .collect()
}

fn split_commas(value: MatrixValue) -> MatrixValue {
    match value {
        MatrixValue::Single(scalar) if scalar.contains(',') => {
            MatrixValue::List(scalar.split(',').map(str::to_owned).collect())
        }
        value => value,
    }
}
