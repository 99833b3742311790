use dotree::{NestedMap, Value};

/// Builds the tree most hierarchy tests start from: `a.b.c.d = 2`, `a.x = 3`
pub fn setup_hierarchy() -> NestedMap {
    let mut map = NestedMap::new();
    map.set("a.b.c.d", 2).unwrap();
    map.set("a.x", 3).unwrap();
    map
}

/// Builds the tree used by index tests: `a.b = 1`, `c = 2`, `l = [1, 2, 3, {d: 3}]`
pub fn setup_indexed() -> NestedMap {
    let mut map = NestedMap::new();
    map.set("a.b", 1).unwrap();
    map.set("c", 2).unwrap();
    let inner = NestedMap::from_pairs([("d", 3)]).unwrap();
    map.set(
        "l",
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Map(inner)],
    )
    .unwrap();
    map
}

/// Collects keys in sorted order, for comparisons that ignore insertion order
pub fn sorted_keys(map: &NestedMap) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().collect();
    keys.sort();
    keys
}

/// Borrows the layer at `key`, panicking if it is not a map
pub fn layer<'a>(map: &'a NestedMap, key: &str) -> &'a NestedMap {
    match map.get(key) {
        Some(Value::Map(layer)) => layer,
        other => panic!("Expected a layer at '{key}', got: {other:?}"),
    }
}
