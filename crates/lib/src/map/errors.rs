//! Error types for nested map operations.
//!
//! These cover every way resolving a parsed [`Path`](crate::path::Path) against a
//! [`NestedMap`](crate::NestedMap) can fail. Key syntax errors live in
//! [`PathError`](crate::path::PathError).

use thiserror::Error;

use crate::Value;

/// Structured error types for nested map operations.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A required child is absent
    #[error("Key '{segment}' not found resolving '{key}'")]
    KeyNotFound { key: String, segment: String },

    /// A name or index was applied to a leaf that cannot be subscripted
    #[error("'{type_name}' value is not subscriptable by '{segment}' (resolving '{key}')")]
    NotSubscriptable {
        key: String,
        segment: String,
        type_name: String,
    },

    /// A sequence index fell outside the sequence
    #[error("Index {index} out of range for list of {len} items (resolving '{key}')")]
    IndexOutOfRange { key: String, index: i64, len: usize },

    /// A delete named a layer that still holds values
    #[error("Cannot delete '{key}' (partial key): it still holds values beneath it")]
    PartialKey { key: String },

    /// A bracket expression could not be evaluated
    #[error("Invalid index expression '[{expr}]': {reason}")]
    IndexExpression { expr: String, reason: String },

    /// Attribute access went past an existing segment boundary
    #[error("No attribute '{name}': {reason}")]
    AttributeAccess { name: String, reason: String },

    /// The key addresses the root, which has no value slot of its own
    #[error("Key '{key}' addresses the root, not a value")]
    RootValue { key: String },

    /// A typed extraction found a different kind of value
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl MapError {
    pub(crate) fn type_mismatch(expected: &str, actual: &Value) -> Self {
        MapError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
        }
    }

    pub(crate) fn attribute(name: &str, reason: impl Into<String>) -> Self {
        MapError::AttributeAccess {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error indicates a missing key or index
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MapError::KeyNotFound { .. } | MapError::IndexOutOfRange { .. }
        )
    }

    /// Check if this error is a subscript of a non-subscriptable value
    pub fn is_not_subscriptable(&self) -> bool {
        matches!(self, MapError::NotSubscriptable { .. })
    }

    /// Check if this error is a rejected partial-key delete
    pub fn is_partial_key(&self) -> bool {
        matches!(self, MapError::PartialKey { .. })
    }

    /// Check if this error came from an index expression
    pub fn is_index_expression(&self) -> bool {
        matches!(self, MapError::IndexExpression { .. })
    }

    /// Check if this error came from attribute-style access
    pub fn is_attribute_error(&self) -> bool {
        matches!(self, MapError::AttributeAccess { .. })
    }

    /// Get the full key being resolved, if this is a resolution error
    pub fn key(&self) -> Option<&str> {
        match self {
            MapError::KeyNotFound { key, .. }
            | MapError::NotSubscriptable { key, .. }
            | MapError::IndexOutOfRange { key, .. }
            | MapError::PartialKey { key }
            | MapError::RootValue { key } => Some(key),
            _ => None,
        }
    }

    /// Get the segment the error names, if any
    pub fn segment(&self) -> Option<&str> {
        match self {
            MapError::KeyNotFound { segment, .. } | MapError::NotSubscriptable { segment, .. } => {
                Some(segment)
            }
            MapError::AttributeAccess { name, .. } => Some(name),
            _ => None,
        }
    }
}

// Conversion from MapError to the main Error type
impl From<MapError> for crate::Error {
    fn from(err: MapError) -> Self {
        crate::Error::Map(err)
    }
}
