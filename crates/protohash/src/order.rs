//! Deterministic ordering of map entries.

use std::cmp::Ordering;
use std::collections::HashMap;

use protohash_schema::{Kind, MapKey, Value};

use crate::error::HashError;

/// Total order over keys of one map.
///
/// `false < true`; integers numerically; strings byte-wise. Keys of one map
/// always share a variant, the variant rank only breaks ties between
/// malformed mixes so the order stays total.
pub fn compare_keys(a: &MapKey, b: &MapKey) -> Ordering {
    match (a, b) {
        (MapKey::Bool(x), MapKey::Bool(y)) => x.cmp(y),
        (MapKey::I32(x), MapKey::I32(y)) => x.cmp(y),
        (MapKey::I64(x), MapKey::I64(y)) => x.cmp(y),
        (MapKey::U32(x), MapKey::U32(y)) => x.cmp(y),
        (MapKey::U64(x), MapKey::U64(y)) => x.cmp(y),
        (MapKey::String(x), MapKey::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(key: &MapKey) -> u8 {
    match key {
        MapKey::Bool(_) => 0,
        MapKey::I32(_) => 1,
        MapKey::I64(_) => 2,
        MapKey::U32(_) => 3,
        MapKey::U64(_) => 4,
        MapKey::String(_) => 5,
    }
}

/// Visits the entries of map field `field` in key order.
///
/// Bool-keyed maps are looked up as `false` then `true` without sorting.
pub fn for_each_entry<'a, F>(
    field: &str,
    key_kind: &Kind,
    entries: &'a HashMap<MapKey, Value>,
    mut visit: F,
) -> Result<(), HashError>
where
    F: FnMut(&'a MapKey, &'a Value) -> Result<(), HashError>,
{
    if !key_kind.is_valid_map_key() {
        return Err(HashError::UnsupportedKind {
            field: field.to_string(),
            kind: format!("map key {}", key_kind),
        });
    }

    if *key_kind == Kind::Bool {
        for key in [MapKey::Bool(false), MapKey::Bool(true)] {
            if let Some((k, v)) = entries.get_key_value(&key) {
                visit(k, v)?;
            }
        }
        return Ok(());
    }

    let mut sorted: Vec<(&MapKey, &Value)> = entries.iter().collect();
    sorted.sort_unstable_by(|a, b| compare_keys(a.0, b.0));
    for (k, v) in sorted {
        visit(k, v)?;
    }
    Ok(())
}
