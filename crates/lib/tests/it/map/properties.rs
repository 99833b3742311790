//! General invariants checked over a spread of keys

use dotree::{NestedMap, Value};

use crate::helpers::*;

const KEYS: &[&str] = &["a", "a2.b", "x.y.z", "deep.er.than.most", "k.l[3]", "[7].n"];

#[test]
fn test_set_then_get_round_trips() {
    let mut map = NestedMap::new();
    for (i, key) in KEYS.iter().enumerate() {
        map.set(*key, i as i64).unwrap();
        assert_eq!(map.get_item(*key).unwrap(), &Value::Int(i as i64));
    }
    assert_eq!(map.len(), KEYS.len());
}

#[test]
fn test_unrelated_keys_do_not_interfere() {
    let mut map = NestedMap::new();
    for key in KEYS {
        map.set(*key, "before").unwrap();
    }
    for (i, key) in KEYS.iter().enumerate() {
        map.set(*key, i as i64).unwrap();
        for other in &KEYS[i + 1..] {
            assert_eq!(map.get_item(*other).unwrap(), &"before", "'{key}' changed '{other}'");
        }
    }
}

#[test]
fn test_ascending_beyond_root_is_not_an_error() {
    let map = setup_hierarchy();
    for dots in 1..8 {
        let key = ".".repeat(dots);
        assert!(map.contains(key.as_str()), "'{key}' should land on the root");
        let key = format!("a{}a.x", ".".repeat(dots + 2));
        assert_eq!(map.get_item(key.as_str()).unwrap(), &3, "'{key}'");
    }
}

#[test]
fn test_deleted_leaf_excluded_from_iteration() {
    for key in ["a.b.c.d", "a.x"] {
        let mut map = setup_hierarchy();
        map.delete(key).unwrap();
        assert!(map.keys().all(|k| k != key));
        assert_eq!(map.len(), 1);
    }
}

#[test]
fn test_pop_succeeds_where_delete_refuses() {
    for key in ["a", "a.b", "a.b.c"] {
        let mut map = setup_hierarchy();
        assert!(map.delete(key).unwrap_err().is_partial_key());
        let popped = map.pop(key).unwrap();
        assert!(popped.is_map());
        assert!(!map.contains(key));
    }
}

#[test]
fn test_iteration_never_yields_empty_layers() {
    let mut map = setup_hierarchy();
    map.set("e.f", NestedMap::new()).unwrap();
    map.set("a.g", NestedMap::new()).unwrap();
    for (key, value) in map.items() {
        assert!(!value.is_map(), "'{key}' is a layer");
    }
}

#[test]
fn test_no_silent_overwrite_of_leaves() {
    let mut map = setup_hierarchy();
    for key in ["a.x.y", "a.b.c.d.e", "a.x[0]"] {
        assert!(map.set(key, 1).unwrap_err().is_not_subscriptable(), "'{key}'");
    }
    assert_eq!(sorted_keys(&map), vec!["a.b.c.d", "a.x"]);
}
