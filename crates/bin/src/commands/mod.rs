//! Command implementations.

pub mod query;

use dotree::{NestedMap, Value};
use tracing::debug;

/// Applies `--set` assignments in order to a fresh map.
pub fn build_map(assignments: &[(String, serde_json::Value)]) -> dotree::Result<NestedMap> {
    let mut map = NestedMap::new();
    for (key, value) in assignments {
        map.set(key.as_str(), Value::try_from(value.clone())?)?;
        debug!(key = %key, "Applied assignment");
    }
    Ok(map)
}
