//! Key and item iteration

use dotree::{NestedMap, Value};

use crate::helpers::*;

#[test]
fn test_keys_are_fully_dotted_leaves() {
    let map = setup_hierarchy();
    assert_eq!(sorted_keys(&map), vec!["a.b.c.d", "a.x"]);
}

#[test]
fn test_keys_follow_first_insertion_order() {
    let mut map = NestedMap::new();
    map.set("z", 1).unwrap();
    map.set("a.y", 2).unwrap();
    map.set("m", 3).unwrap();
    map.set("a.b", 4).unwrap();
    map.set("z", 5).unwrap();

    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a.y", "a.b", "m"]);
}

#[test]
fn test_items_pair_keys_with_leaves() {
    let map = setup_hierarchy();
    let items: Vec<(String, &Value)> = map.items().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].0, "a.b.c.d");
    assert_eq!(items[0].1, &2);
    assert_eq!(items[1].0, "a.x");
    assert_eq!(items[1].1, &3);

    let values: Vec<&Value> = map.values().collect();
    assert_eq!(values, vec![&Value::Int(2), &Value::Int(3)]);
}

#[test]
fn test_for_loop_over_reference() {
    let map = setup_hierarchy();
    let mut count = 0;
    for (key, value) in &map {
        assert!(map.contains(key.as_str()));
        assert_eq!(map.get_item(key.as_str()).unwrap(), value);
        count += 1;
    }
    assert_eq!(count, map.len());
}

#[test]
fn test_iteration_reflects_current_state() {
    let mut map = setup_hierarchy();
    assert_eq!(map.keys().count(), 2);
    map.set("a.b.e", 4).unwrap();
    assert_eq!(map.keys().count(), 3);
    map.pop("a.b").unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a.x"]);
}

#[test]
fn test_empty_layers_never_yielded() {
    let mut map = NestedMap::new();
    map.set("a.b.c", NestedMap::new()).unwrap();
    assert_eq!(map.keys().count(), 0);
    assert!(map.is_empty());
    assert!(map.contains("a.b.c"));
    assert_eq!(map.len(), 0);
}
