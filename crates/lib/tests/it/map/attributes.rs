//! Attribute-style access: one existing segment at a time

use dotree::{NestedMap, Value};

use crate::helpers::*;

#[test]
fn test_attribute_access_matches_indexing() {
    let mut map = NestedMap::new();
    map.set("a.b", 1).unwrap();
    assert_eq!(map.get_item("a.b").unwrap(), &1);
    assert_eq!(map.attrs().node("a").unwrap().get("b").unwrap(), &1);

    map.attrs_mut().node("a").unwrap().set("b", 2).unwrap();
    assert_eq!(map.get_item("a.b").unwrap(), &2);
    assert_eq!(map.attrs().node("a").unwrap().get("b").unwrap(), &2);
}

#[test]
fn test_only_one_layer_at_a_time() {
    let mut map = NestedMap::new();
    map.set("a.b", 1).unwrap();

    let err = map.attrs_mut().node("x").and_then(|mut x| x.set("y", 99)).unwrap_err();
    assert!(err.is_attribute_error());
    assert!(err.to_string().contains("'x'"));
    assert!(!map.contains("x"));
    assert!(!map.contains("x.y"));
}

#[test]
fn test_assigned_mapping_with_dotted_keys_is_converted() {
    let mut map = NestedMap::new();
    map.set("a.b", 1).unwrap();

    let converted = NestedMap::from_pairs([("c.d", 2)]).unwrap();
    map.attrs_mut().node("a").unwrap().set("b", converted).unwrap();

    let d = map
        .attrs()
        .node("a")
        .and_then(|a| a.node("b"))
        .and_then(|b| b.node("c"))
        .and_then(|c| c.get("d"))
        .unwrap();
    assert_eq!(d, &2);

    let a = map.attrs().node("a").unwrap();
    assert!(a.has("b.c.d"));
    assert!(!a.has("b.c.x"));
    assert!(!a.has("e.f"));
}

#[test]
fn test_setdefault_returns_existing_layer() {
    let mut map = setup_hierarchy();
    let b = map.get_mut("a.b").unwrap().as_map_mut().unwrap();
    assert!(b.setdefault("c", "boo").unwrap().is_map());
    assert!(map.get_item("a.b.c").unwrap().is_map());
}

#[test]
fn test_has_attr_probes() {
    let mut map = NestedMap::new();
    map.set(".a.b", 1).unwrap();
    map.set(".c", 2).unwrap();

    assert!(map.has_attr("a"));
    assert!(map.has_attr("a.b"));
    assert!(!map.has_attr("b"));
    assert!(map.has_attr("c"));
    assert!(!map.has_attr("l[0"));
}

#[test]
fn test_get_attr_and_set_attr() {
    let mut map = NestedMap::new();
    assert_eq!(map.set_attr("x", 3).unwrap(), None);
    assert_eq!(map.get_attr("x").unwrap(), &3);
    assert_eq!(map.set_attr("x", 4).unwrap(), Some(Value::Int(3)));

    let err = map.set_attr("a.b", 1).unwrap_err();
    assert!(err.is_attribute_error());
    assert!(!map.contains("a"));

    let err = map.get_attr("missing").unwrap_err();
    assert!(err.is_attribute_error());
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_attribute_view_hands_back_map() {
    let mut map = setup_hierarchy();
    let a = map.attrs_mut().node("a").unwrap().into_map();
    a.delete("x").unwrap();
    assert_eq!(sorted_keys(&map), vec!["a.b.c.d"]);

    let a = map.attrs().node("a").unwrap().map();
    assert!(a.contains("b.c"));
}
