//! Attribute-style access to a [`NestedMap`].
//!
//! Unlike path keys, attribute names address exactly one segment. Nothing is
//! split on dots, there is no backtracking, and a write creates at most the
//! one segment it names:
//!
//! ```
//! # use dotree::NestedMap;
//! let mut map = NestedMap::new();
//! map.set("a.b", 1)?;
//!
//! let mut a = map.attrs_mut().node("a")?;
//! a.set("c", 2)?;
//! assert_eq!(a.get("c")?, &2);
//!
//! // `x` does not exist, so it cannot be walked through
//! assert!(map.attrs_mut().node("x").is_err());
//! # Ok::<(), dotree::Error>(())
//! ```

use super::{MapError, NestedMap};
use crate::{Result, Value, path::Key};

/// Validates an attribute name as a single plain segment.
fn attr_key(name: &str) -> Result<Key> {
    if name.is_empty() {
        return Err(MapError::attribute(name, "attribute names cannot be empty").into());
    }
    if name.contains(['.', '[', ']']) {
        return Err(MapError::attribute(
            name,
            "attribute names are single segments; use a path key instead",
        )
        .into());
    }
    Ok(Key::from(name))
}

fn child<'a>(node: &'a NestedMap, name: &str) -> Result<&'a Value> {
    let key = attr_key(name)?;
    node.children
        .get(&key)
        .ok_or_else(|| MapError::attribute(name, "no such child").into())
}

/// Read-only attribute view of one layer.
#[derive(Debug, Clone, Copy)]
pub struct Attrs<'a> {
    node: &'a NestedMap,
}

impl<'a> Attrs<'a> {
    pub(crate) fn new(node: &'a NestedMap) -> Self {
        Self { node }
    }

    /// Gets the direct child `name`.
    ///
    /// # Errors
    /// [`MapError::AttributeAccess`] naming `name` if there is no such child.
    pub fn get(&self, name: &str) -> Result<&'a Value> {
        child(self.node, name)
    }

    /// Descends into the child layer `name`
    pub fn node(&self, name: &str) -> Result<Attrs<'a>> {
        match child(self.node, name)? {
            Value::Map(layer) => Ok(Attrs::new(layer)),
            leaf => Err(MapError::attribute(
                name,
                format!("'{}' value has no attributes", leaf.type_name()),
            )
            .into()),
        }
    }

    /// Probes `name` as a full path; never fails
    pub fn has(&self, name: &str) -> bool {
        self.node.contains(name)
    }

    /// The layer this view wraps
    pub fn map(&self) -> &'a NestedMap {
        self.node
    }
}

/// Mutable attribute view of one layer.
#[derive(Debug)]
pub struct AttrsMut<'a> {
    node: &'a mut NestedMap,
}

impl<'a> AttrsMut<'a> {
    pub(crate) fn new(node: &'a mut NestedMap) -> Self {
        Self { node }
    }

    /// Gets the direct child `name`
    pub fn get(&self, name: &str) -> Result<&Value> {
        child(self.node, name)
    }

    /// Descends into the existing child layer `name`, consuming this view.
    ///
    /// Never creates the layer: a missing `name` fails with
    /// [`MapError::AttributeAccess`] naming it.
    pub fn node(self, name: &str) -> Result<AttrsMut<'a>> {
        let key = attr_key(name)?;
        match self.node.children.get_mut(&key) {
            Some(Value::Map(layer)) => Ok(AttrsMut::new(layer)),
            Some(leaf) => Err(MapError::attribute(
                name,
                format!("'{}' value has no attributes", leaf.type_name()),
            )
            .into()),
            None => Err(MapError::attribute(name, "no such child").into()),
        }
    }

    /// Sets the direct child `name`, returning the previous value.
    ///
    /// Creates at most this one segment.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        let key = attr_key(name)?;
        Ok(self.node.children.insert(key, value.into()))
    }

    /// Probes `name` as a full path; never fails
    pub fn has(&self, name: &str) -> bool {
        self.node.contains(name)
    }

    /// Gives back the wrapped layer for path-based operations
    pub fn into_map(self) -> &'a mut NestedMap {
        self.node
    }
}
