//!
//! Dotree: nested maps addressed by dotted key paths.
//! This library stores values in a tree of insertion-ordered maps and addresses
//! them with filesystem-like keys such as `"a.b.c"`.
//!
//! ## Core Concepts
//!
//! * **Paths (`path::Path`)**: A parsed key string. Dots separate segments, runs of
//!   dots backtrack toward the root (`"a.b..x"` is `"a.x"`), and brackets index into
//!   lists (`"l[a.b+2]"`).
//! * **Maps (`map::NestedMap`)**: The tree itself. Reads, writes, deletes and probes
//!   all go through a single resolver that folds backtracking before touching the tree.
//! * **Values (`value::Value`)**: Either a leaf (null, bool, int, float, text, list)
//!   or a deeper `NestedMap` layer.
//! * **Attribute access (`map::Attrs`)**: A stricter one-segment-at-a-time view that
//!   never creates more than the single segment it names.
//!
//! ```
//! use dotree::NestedMap;
//!
//! let mut map = NestedMap::new();
//! map.set("a.b.c", 1)?;
//! map.set("a.b.c..d", 2)?;
//! map.set("a.l", vec![10, 20, 30])?;
//!
//! assert_eq!(map.get_item("a.b.d")?, &2);
//! assert_eq!(map.get_item("a.l[b.d-1]")?, &20);
//! assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a.b.c", "a.b.d", "a.l"]);
//! # Ok::<(), dotree::Error>(())
//! ```

pub mod map;
pub mod path;
pub mod value;

pub use map::{MapError, NestedMap};
pub use path::{Key, Path, PathError};
/// Re-export the `Value` enum for easier access.
pub use value::Value;

/// Result type used throughout the Dotree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Dotree library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured key syntax errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured resolution errors from the map module
    #[error(transparent)]
    Map(map::MapError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Map(_) => "map",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a missing key or list index.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is a malformed key string.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this error is a rejected delete of a layer that still holds values.
    pub fn is_partial_key(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_partial_key(),
            _ => false,
        }
    }

    /// Check if this error is a subscript applied to a leaf.
    pub fn is_not_subscriptable(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_not_subscriptable(),
            _ => false,
        }
    }

    /// Check if this error came from attribute-style access.
    pub fn is_attribute_error(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_attribute_error(),
            _ => false,
        }
    }

    /// Check if this error came from evaluating a bracket expression.
    pub fn is_index_expression(&self) -> bool {
        match self {
            Error::Map(map_err) => map_err.is_index_expression(),
            _ => false,
        }
    }

    /// Check if this error is serialization-related.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
