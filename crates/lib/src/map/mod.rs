//! The nested map and its path-driven operations.
//!
//! [`NestedMap`] is an insertion-ordered map whose values are either leaves or
//! further `NestedMap` layers. Every operation takes a key path (see
//! [`crate::path`]) and drives one resolver call.
//!
//! # Usage
//!
//! ```
//! use dotree::NestedMap;
//!
//! let mut map = NestedMap::new();
//! map.set("a.b", 1)?;
//! map.set("a.b..x", 3)?;
//!
//! assert_eq!(map.get_item("a.b")?, &1);
//! assert_eq!(map.get_item("a.x")?, &3);
//! assert!(map.contains("a"));
//! assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a.b", "a.x"]);
//! # Ok::<(), dotree::Error>(())
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Result, Value,
    path::{Key, ToPath},
};

pub mod attr;
pub mod errors;
mod eval;
pub mod iter;
mod resolve;

pub use attr::{Attrs, AttrsMut};
pub use errors::MapError;
pub use iter::{Items, Keys};
use resolve::Mode;

/// A tree of values addressed by dotted key paths.
///
/// # Core Operations
///
/// - **Reads**: [`get`](Self::get) (never fails), [`get_item`](Self::get_item),
///   [`get_mut`](Self::get_mut), [`contains`](Self::contains)
/// - **Writes**: [`set`](Self::set), [`setdefault`](Self::setdefault)
/// - **Removal**: [`delete`](Self::delete) (refuses partial keys),
///   [`pop`](Self::pop) (unrestricted)
/// - **Iteration**: [`keys`](Self::keys), [`items`](Self::items) over fully
///   dotted leaf paths
/// - **Attribute access**: [`attrs`](Self::attrs), one segment at a time
///
/// Each child layer is owned by exactly one parent. Assigning a map value moves
/// it into the tree; nothing is shared with the caller afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedMap {
    /// Children in first-insertion order
    children: IndexMap<Key, Value>,
}

impl NestedMap {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self {
            children: IndexMap::new(),
        }
    }

    /// Builds a map from key/value pairs, assigning each through [`set`](Self::set).
    ///
    /// Dotted keys in the input become nested layers.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: ToPath,
        V: Into<Value>,
    {
        let mut map = Self::new();
        map.extend_pairs(pairs)?;
        Ok(map)
    }

    /// Assigns each pair in order through [`set`](Self::set).
    ///
    /// Stops at the first failing assignment; earlier pairs stay applied.
    pub fn extend_pairs<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: ToPath,
        V: Into<Value>,
    {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Builder method to set a value and return self
    ///
    /// Chained after [`from_pairs`](Self::from_pairs), this plays the role of
    /// keyword arguments: applied last, overriding earlier entries.
    ///
    /// ```
    /// # use dotree::NestedMap;
    /// let map = NestedMap::from_pairs([("c", 3)])?.with("d", 4)?;
    /// assert_eq!(map.get_item("c")?, &3);
    /// assert_eq!(map.get_item("d")?, &4);
    /// # Ok::<(), dotree::Error>(())
    /// ```
    pub fn with(mut self, key: impl ToPath, value: impl Into<Value>) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Gets the value at a path, or `None` on any resolution failure
    pub fn get(&self, key: impl ToPath) -> Option<&Value> {
        self.get_item(key).ok()
    }

    /// Gets the value at a path with automatic type conversion
    ///
    /// Returns `None` if the path does not resolve or the value has another type.
    pub fn get_as<'a, T>(&'a self, key: impl ToPath) -> Option<T>
    where
        T: TryFrom<&'a Value>,
    {
        T::try_from(self.get(key)?).ok()
    }

    /// Gets the value at a path.
    ///
    /// # Errors
    /// - [`PathError::MalformedKey`](crate::path::PathError::MalformedKey) for bad syntax
    /// - [`MapError::KeyNotFound`] when a segment is missing
    /// - [`MapError::NotSubscriptable`] when a leaf is subscripted
    /// - [`MapError::IndexExpression`] when a bracket expression fails
    /// - [`MapError::RootValue`] when the path addresses the root
    pub fn get_item(&self, key: impl ToPath) -> Result<&Value> {
        let path = key.to_path()?;
        Ok(resolve::read(self, &path)?)
    }

    /// Gets a mutable reference to the value at a path
    pub fn get_mut(&mut self, key: impl ToPath) -> Result<&mut Value> {
        let path = key.to_path()?;
        let locator = resolve::locate(self, &path, Mode::Read)?;
        let (container, last) = locator.container(self, &path, false)?;
        container.get_mut(last).ok_or_else(|| {
            MapError::KeyNotFound {
                key: path.as_str().to_string(),
                segment: path.as_str().to_string(),
            }
            .into()
        })
    }

    /// Sets a value at a path, returning the previous value if there was one.
    ///
    /// Missing map layers along the path are created. A leaf in the way is
    /// never replaced: the write fails with [`MapError::NotSubscriptable`]
    /// and the tree is left unchanged.
    pub fn set(&mut self, key: impl ToPath, value: impl Into<Value>) -> Result<Option<Value>> {
        let path = key.to_path()?;
        let locator = resolve::locate(self, &path, Mode::Write)?;
        let (container, last) = locator.container(self, &path, true)?;
        Ok(container.insert(last, value.into()))
    }

    /// Deletes the leaf or empty layer at a path.
    ///
    /// # Errors
    /// [`MapError::PartialKey`] if the path names a layer that still holds
    /// leaves beneath it. Use [`pop`](Self::pop) to remove a whole subtree.
    pub fn delete(&mut self, key: impl ToPath) -> Result<()> {
        let path = key.to_path()?;
        let locator = resolve::locate(self, &path, Mode::Delete)?;
        let (container, last) = locator.container(self, &path, false)?;
        container.remove(last);
        Ok(())
    }

    /// Removes and returns the leaf or subtree at a path
    pub fn pop(&mut self, key: impl ToPath) -> Result<Value> {
        let path = key.to_path()?;
        let locator = resolve::locate(self, &path, Mode::Pop)?;
        let (container, last) = locator.container(self, &path, false)?;
        container.remove(last).ok_or_else(|| {
            MapError::KeyNotFound {
                key: path.as_str().to_string(),
                segment: path.as_str().to_string(),
            }
            .into()
        })
    }

    /// Removes and returns the value at a path, or `default` on any failure
    pub fn pop_or(&mut self, key: impl ToPath, default: impl Into<Value>) -> Value {
        self.pop(key).unwrap_or_else(|_| default.into())
    }

    /// Returns the value at a path, first storing `default` there if absent.
    ///
    /// A stored map comes back as a [`Value::Map`].
    ///
    /// ```
    /// # use dotree::NestedMap;
    /// let mut map = NestedMap::new();
    /// assert_eq!(map.setdefault("a.b", 1)?, &1);
    /// assert_eq!(map.setdefault("a.b", 2)?, &1);
    /// assert!(map.setdefault("a", 3)?.is_map());
    /// # Ok::<(), dotree::Error>(())
    /// ```
    pub fn setdefault(
        &mut self,
        key: impl ToPath,
        default: impl Into<Value>,
    ) -> Result<&mut Value> {
        let path = key.to_path()?;
        if !self.contains(&path) {
            self.set(&path, default)?;
        }
        self.get_mut(&path)
    }

    /// Returns true if the path fully resolves, to a leaf or to a layer.
    ///
    /// Never fails: malformed keys and resolution errors yield `false`.
    pub fn contains(&self, key: impl ToPath) -> bool {
        key.to_path()
            .is_ok_and(|path| resolve::locate(self, &path, Mode::Probe).is_ok())
    }

    /// Returns an iterator over fully dotted leaf keys in first-insertion order.
    ///
    /// Layers without leaves are skipped. Each call starts from the current state.
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self)
    }

    /// Returns an iterator over `(dotted key, leaf)` pairs, like [`keys`](Self::keys)
    pub fn items(&self) -> Items<'_> {
        Items::new(self)
    }

    /// Returns an iterator over leaf values
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.items().map(|(_, value)| value)
    }

    /// Returns the number of leaves, i.e. the number of keys [`keys`](Self::keys) yields
    pub fn len(&self) -> usize {
        self.items().count()
    }

    /// Returns true if no leaves exist anywhere beneath this layer
    pub fn is_empty(&self) -> bool {
        self.children.values().all(|value| match value {
            Value::Map(layer) => layer.is_empty(),
            _ => false,
        })
    }

    /// Returns the direct child with the given key, without path parsing
    pub fn child(&self, key: &Key) -> Option<&Value> {
        self.children.get(key)
    }

    /// Returns an iterator over direct children, including empty layers
    pub fn children(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.children.iter()
    }

    /// Clears all data from this map
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Borrows the map for attribute-style, one-segment-at-a-time access
    pub fn attrs(&self) -> Attrs<'_> {
        Attrs::new(self)
    }

    /// Mutably borrows the map for attribute-style access
    pub fn attrs_mut(&mut self) -> AttrsMut<'_> {
        AttrsMut::new(self)
    }

    /// Gets a direct child by attribute name; see [`Attrs::get`]
    pub fn get_attr(&self, name: &str) -> Result<&Value> {
        self.attrs().get(name)
    }

    /// Sets a direct child by attribute name; see [`AttrsMut::set`]
    pub fn set_attr(&mut self, name: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        self.attrs_mut().set(name, value)
    }

    /// Probes a path by attribute name; see [`Attrs::has`]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs().has(name)
    }

    /// Serializes any value to JSON and stores it at a path.
    ///
    /// Objects are plain mappings, so their dotted keys become nested layers.
    pub fn set_json<T>(&mut self, key: impl ToPath, value: T) -> Result<Option<Value>>
    where
        T: Serialize,
    {
        let json = serde_json::to_value(value)?;
        self.set(key, Value::try_from(json)?)
    }

    /// Deserializes the value at a path from its JSON form
    pub fn get_json<T>(&self, key: impl ToPath) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let json = self.get_item(key)?.to_json();
        Ok(serde_json::from_value(json)?)
    }

    /// Converts to a nested `serde_json::Value` object
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.children
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_json()))
                .collect(),
        )
    }
}

impl fmt::Display for NestedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in &self.children {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a NestedMap {
    type Item = (String, &'a Value);
    type IntoIter = Items<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

impl TryFrom<serde_json::Map<String, serde_json::Value>> for NestedMap {
    type Error = crate::Error;

    fn try_from(entries: serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut map = NestedMap::new();
        for (key, value) in entries {
            map.set(key.as_str(), Value::try_from(value)?)?;
        }
        Ok(map)
    }
}

impl TryFrom<serde_json::Value> for NestedMap {
    type Error = crate::Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(entries) => NestedMap::try_from(entries),
            other => Err(MapError::TypeMismatch {
                expected: "object".to_string(),
                actual: format!("{other}"),
            }
            .into()),
        }
    }
}

impl Serialize for NestedMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (key, value) in &self.children {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}
