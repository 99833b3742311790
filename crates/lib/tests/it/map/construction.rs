//! Building maps from pairs, builders and JSON objects

use dotree::{NestedMap, Value};
use serde_json::json;

#[test]
fn test_from_pairs() {
    let map = NestedMap::from_pairs([("a", 1)]).unwrap();
    assert!(map.contains("a"));
    assert_eq!(map.get_item("a").unwrap(), &1);
}

#[test]
fn test_from_pairs_with_override() {
    let map = NestedMap::from_pairs([("a", 1)]).unwrap().with("b", 2).unwrap();
    assert!(map.contains("b"));
    assert_eq!(map.get_item("b").unwrap(), &2);

    let map = NestedMap::from_pairs([("c", 3)]).unwrap().with("d", 4).unwrap();
    assert!(map.contains("c"));
    assert_eq!(map.get_item("c").unwrap(), &3);

    // Keyword-style entries are applied last
    let map = NestedMap::from_pairs([("e", 1)]).unwrap().with("e", 5).unwrap();
    assert_eq!(map.get_item("e").unwrap(), &5);
}

#[test]
fn test_from_json_object() {
    let map = NestedMap::try_from(json!({"a": 1, "b.c": "text"})).unwrap();
    assert_eq!(map.get_item("a").unwrap(), &1);
    assert_eq!(map.get_item("b.c").unwrap(), &"text");
    assert!(map.get_item("b").unwrap().is_map());
}

#[test]
fn test_from_json_rejects_non_objects() {
    let err = NestedMap::try_from(json!([1, 2])).unwrap_err();
    assert_eq!(err.module(), "map");
}

#[test]
fn test_dotted_pairs_nest() {
    let map = NestedMap::from_pairs([("a.b", 1), ("a.c", 2)]).unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a.b", "a.c"]);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_failed_pair_stops_construction() {
    let err = NestedMap::from_pairs([("a", 1), ("a.b", 2)]).unwrap_err();
    assert!(err.is_not_subscriptable());
}

#[test]
fn test_overwrite_returns_previous() {
    let mut map = NestedMap::new();
    assert_eq!(map.set("key", "original").unwrap(), None);
    let old = map.set("key", "modified").unwrap();
    assert_eq!(old, Some(Value::Text("original".to_string())));
    assert_eq!(map.get_as::<String>("key"), Some("modified".to_string()));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_assigned_maps_are_moved_in() {
    let mut source = NestedMap::new();
    source.set("c.d", 2).unwrap();

    let mut map = NestedMap::new();
    map.set("a.b", source.clone()).unwrap();
    source.set("c.d", 99).unwrap();

    assert_eq!(map.get_item("a.b.c.d").unwrap(), &2);
}
