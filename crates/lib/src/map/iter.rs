//! Lazy iteration over the leaves of a [`NestedMap`].
//!
//! Both iterators walk the tree depth-first in first-insertion order and yield
//! fully dotted keys (`"a.b.c"`, `"[0].a"`). Layers with no leaves beneath them
//! produce nothing. Iterators borrow the map, so each call to
//! [`NestedMap::keys`] or [`NestedMap::items`] reflects the current state.

use indexmap::map::Iter;

use super::NestedMap;
use crate::{Value, path::Key};

/// Iterator over `(dotted key, leaf)` pairs.
#[derive(Debug, Clone)]
pub struct Items<'a> {
    /// Rendered prefix and remaining children for each open layer
    stack: Vec<(String, Iter<'a, Key, Value>)>,
}

impl<'a> Items<'a> {
    pub(crate) fn new(map: &'a NestedMap) -> Self {
        Self {
            stack: vec![(String::new(), map.children.iter())],
        }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (prefix, children) = self.stack.last_mut()?;
            let Some((key, value)) = children.next() else {
                self.stack.pop();
                continue;
            };

            let mut dotted = prefix.clone();
            key.append_to(&mut dotted);
            match value {
                Value::Map(layer) => self.stack.push((dotted, layer.children.iter())),
                leaf => return Some((dotted, leaf)),
            }
        }
    }
}

/// Iterator over fully dotted leaf keys.
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    items: Items<'a>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(map: &'a NestedMap) -> Self {
        Self {
            items: Items::new(map),
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(key, _)| key)
    }
}
