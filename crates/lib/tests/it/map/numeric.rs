//! Integer keys addressed directly or with bare brackets

use dotree::{Key, NestedMap};

#[test]
fn test_integer_keys_render_with_brackets() {
    let mut map = NestedMap::new();
    map.set(0, NestedMap::new()).unwrap();
    map.get_mut(0).unwrap().as_map_mut().unwrap().set_attr("a", 1).unwrap();
    map.set(1, NestedMap::new()).unwrap();
    map.get_mut(1).unwrap().as_map_mut().unwrap().set_attr("b", 2).unwrap();

    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["[0].a", "[1].b"]);
}

#[test]
fn test_rendered_integer_keys_resolve() {
    let mut map = NestedMap::new();
    map.set("[0].a", 1).unwrap();
    map.set("x[2].y", 2).unwrap();

    assert_eq!(map.get_item(0).unwrap().as_map().unwrap().get_item("a").unwrap(), &1);
    for key in map.keys() {
        assert!(map.contains(key.as_str()), "'{key}' should resolve");
    }
    assert_eq!(map.child(&Key::Index(0)).map(|v| v.is_map()), Some(true));
    assert!(map.child(&Key::name("0")).is_none());
}

#[test]
fn test_integer_and_name_keys_are_distinct() {
    let mut map = NestedMap::new();
    map.set(5, "int").unwrap();
    map.set("5", "name").unwrap();
    assert_eq!(map.get_item(5).unwrap(), &"int");
    assert_eq!(map.get_item("[5]").unwrap(), &"int");
    assert_eq!(map.get_item("5").unwrap(), &"name");
    assert_eq!(map.len(), 2);
}
