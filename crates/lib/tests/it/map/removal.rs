//! Delete (refuses partial keys) and pop (unrestricted)

use dotree::{NestedMap, Value};
use serde_json::json;

use crate::helpers::*;

#[test]
fn test_delete_refuses_partial_keys() {
    let mut map = setup_hierarchy();

    let err = map.delete("a.b.c").unwrap_err();
    assert!(err.is_partial_key());
    assert!(err.to_string().contains("(partial key)"));
    assert_eq!(sorted_keys(&map), vec!["a.b.c.d", "a.x"]);

    map.delete("a.b.c.d").unwrap();
    assert_eq!(sorted_keys(&map), vec!["a.x"]);

    // Now empty, so the layer itself can go
    map.delete("a.b.c").unwrap();
    assert_eq!(sorted_keys(&map), vec!["a.x"]);
    assert!(map.contains("a.b"));
    assert!(!map.contains("a.b.c"));
}

#[test]
fn test_delete_down_to_empty() {
    let mut map = setup_hierarchy();
    map.delete("a.b.c.d").unwrap();
    map.delete("a.b.c").unwrap();
    assert_eq!(map.get_attr("a").unwrap().as_map().unwrap().get_item("x").unwrap(), &3);

    let a = map.get_mut("a").unwrap().as_map_mut().unwrap();
    a.delete("x").unwrap();
    assert!(map.keys().next().is_none());
    assert!(map.contains("a"));
    assert!(map.has_attr("a.b"));
    assert!(!map.contains("a.b.c"));

    map.delete("a.b").unwrap();
    map.delete("a").unwrap();
    assert!(!map.contains("a"));
}

#[test]
fn test_delete_missing_key() {
    let mut map = setup_hierarchy();
    let err = map.delete("a.q").unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("'q'"));
}

#[test]
fn test_pop_has_no_partial_key_restriction() {
    let mut map = setup_hierarchy();
    assert_eq!(map.get_item("a.b.c.d").unwrap(), &2);

    let popped = map.pop("a.b.c").unwrap();
    assert_eq!(popped, json!({"d": 2}));
    assert_eq!(
        popped,
        Value::Map(NestedMap::from_pairs([("d", 2)]).unwrap())
    );
    assert!(map.contains("a.b"));
    assert!(!map.contains("a.b.c"));
    assert!(layer(&map, "a").contains("x"));

    assert_eq!(map.pop("a.b.c...x").unwrap(), 3);
    assert!(!layer(&map, "a").contains("x"));
}

#[test]
fn test_pop_or_default() {
    let mut map = setup_hierarchy();
    assert_eq!(map.pop_or("a.q", 7), Value::Int(7));
    assert_eq!(map.pop_or("a.x", 7), Value::Int(3));
    assert_eq!(map.pop_or("a.x", Value::Null), Value::Null);
}

#[test]
fn test_clear() {
    let mut map = setup_hierarchy();
    map.clear();
    assert!(map.is_empty());
    assert!(!map.contains("a"));
}
