//! Dotted key paths for addressing nested maps.
//!
//! A key string such as `"a.b.c"` is parsed into a [`Path`]: an ordered list of
//! [`PathOp`]s that the resolver walks against a [`NestedMap`](crate::NestedMap).
//!
//! # Syntax
//!
//! - `a.b.c` descends through `a`, then `b`, then `c`.
//! - A single leading dot is a root marker and changes nothing: `.a.b` == `a.b`.
//! - Every further empty segment ascends one level, so a run of `N` dots between
//!   two segments ascends `N - 1` levels: `a.b..x` == `a.x`. Ascending past the
//!   root stays at the root, like `..` at `/` in a filesystem.
//! - A trailing run counts the same way, its last dot being a plain separator:
//!   `a.b.` == `a.b` and `a.b..` == `a`.
//! - A bracket suffix indexes the value reached so far: `l[2]`, `l[a.b+c]`,
//!   `l[0][1]`. A bracket with no name indexes the current map by integer key:
//!   `[0].a`.
//!
//! # Examples
//!
//! ```rust
//! use dotree::path::{Key, Path, PathOp};
//!
//! let path = Path::parse("a.b..x")?;
//! assert_eq!(
//!     path.ops(),
//!     &[
//!         PathOp::Descend(Key::name("a")),
//!         PathOp::Descend(Key::name("b")),
//!         PathOp::Backtrack(1),
//!         PathOp::Descend(Key::name("x")),
//!     ]
//! );
//! # Ok::<(), dotree::Error>(())
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error type for key strings that cannot be parsed.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Brackets are unbalanced, an index expression is empty, or a segment is
    /// otherwise not well formed.
    #[error("Malformed key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },
}

impl PathError {
    fn malformed(key: &str, reason: impl Into<String>) -> Self {
        PathError::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Get the offending key string
    pub fn key(&self) -> &str {
        match self {
            PathError::MalformedKey { key, .. } => key,
        }
    }
}

// Conversion from PathError to the main Error type
impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// A single child key within a map.
///
/// Children are addressed either by name (`a` in `a.b`) or by integer
/// (`[0]` in `[0].a`). Rendering follows the same syntax, so a rendered
/// key parses back to the same child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Index(i64),
}

impl Key {
    /// Creates a named key.
    pub fn name(name: impl Into<String>) -> Self {
        Key::Name(name.into())
    }

    /// Returns the name if this is a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Appends this key to a rendered dotted prefix.
    pub(crate) fn append_to(&self, prefix: &mut String) {
        match self {
            Key::Name(name) => {
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(name);
            }
            Key::Index(index) => {
                prefix.push('[');
                prefix.push_str(&index.to_string());
                prefix.push(']');
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name}"),
            Key::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Key::Index(index)
    }
}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOp {
    /// Move into a named or integer child.
    Descend(Key),
    /// Move up this many levels, stopping at the root.
    Backtrack(usize),
    /// Subscript the value reached so far with the result of an index
    /// expression (the text between the brackets).
    Index(String),
}

/// A parsed key path.
///
/// Parsing is pure: the same string always yields the same operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    source: String,
    ops: Vec<PathOp>,
}

impl Path {
    /// Parses a dotted key string.
    ///
    /// # Errors
    /// Returns [`PathError::MalformedKey`] when brackets are unbalanced, an
    /// index expression is empty, or text follows a closing bracket.
    pub fn parse(key: &str) -> Result<Self, PathError> {
        let mut ops = Vec::new();

        let segments = split_segments(key)?;
        let last = segments.len() - 1;
        for (position, token) in segments.into_iter().enumerate() {
            if token.is_empty() {
                // A leading root marker or a trailing separator; anything between ascends
                if position > 0 && position < last {
                    push_backtrack(&mut ops, 1);
                }
                continue;
            }
            parse_segment(key, token, &mut ops)?;
        }

        Ok(Path {
            source: key.to_string(),
            ops,
        })
    }

    /// Creates a path addressing a single top-level child.
    ///
    /// # Errors
    /// Returns [`PathError::MalformedKey`] for a name that would not render
    /// back to itself: empty, or containing `.`, `[` or `]`.
    pub fn from_key(key: impl Into<Key>) -> Result<Self, PathError> {
        let key = key.into();
        if let Key::Name(name) = &key {
            if name.is_empty() {
                return Err(PathError::malformed(name, "empty key name"));
            }
            if name.contains(['.', '[', ']']) {
                return Err(PathError::malformed(
                    name,
                    "a single key name cannot contain '.', '[' or ']'",
                ));
            }
        }
        Ok(Self::single(key))
    }

    fn single(key: Key) -> Self {
        Path {
            source: key.to_string(),
            ops: vec![PathOp::Descend(key)],
        }
    }

    /// Returns the operations in order.
    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    /// Returns the key string this path was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

/// Anything that can address a location in a [`NestedMap`](crate::NestedMap).
///
/// Strings are parsed as dotted paths; integers address a top-level integer
/// child directly.
pub trait ToPath {
    fn to_path(&self) -> Result<Path, PathError>;
}

impl ToPath for str {
    fn to_path(&self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl ToPath for &str {
    fn to_path(&self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl ToPath for String {
    fn to_path(&self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl ToPath for &String {
    fn to_path(&self) -> Result<Path, PathError> {
        Path::parse(self)
    }
}

impl ToPath for Path {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(self.clone())
    }
}

impl ToPath for &Path {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok((*self).clone())
    }
}

impl ToPath for i64 {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::single(Key::Index(*self)))
    }
}

impl ToPath for i32 {
    fn to_path(&self) -> Result<Path, PathError> {
        Ok(Path::single(Key::Index(*self as i64)))
    }
}

impl ToPath for usize {
    fn to_path(&self) -> Result<Path, PathError> {
        let index = i64::try_from(*self)
            .map_err(|_| PathError::malformed(&self.to_string(), "integer key out of range"))?;
        Ok(Path::single(Key::Index(index)))
    }
}

/// Splits on dots outside of brackets.
fn split_segments(key: &str) -> Result<Vec<&str>, PathError> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in key.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| PathError::malformed(key, "unbalanced ']'"))?;
            }
            '.' if depth == 0 => {
                segments.push(&key[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(PathError::malformed(key, "unbalanced '['"));
    }
    segments.push(&key[start..]);
    Ok(segments)
}

fn push_backtrack(ops: &mut Vec<PathOp>, levels: usize) {
    if let Some(PathOp::Backtrack(n)) = ops.last_mut() {
        *n += levels;
    } else {
        ops.push(PathOp::Backtrack(levels));
    }
}

/// Parses `name`, `name[expr]...` or `[expr]...`.
fn parse_segment(key: &str, segment: &str, ops: &mut Vec<PathOp>) -> Result<(), PathError> {
    let (name, mut rest) = match segment.find('[') {
        Some(open) => segment.split_at(open),
        None => (segment, ""),
    };

    if !name.is_empty() {
        ops.push(PathOp::Descend(Key::name(name)));
    }

    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(PathError::malformed(
                key,
                format!("unexpected '{rest}' after index in segment '{segment}'"),
            ));
        }

        let close = matching_bracket(rest)
            .ok_or_else(|| PathError::malformed(key, "unbalanced '['"))?;
        let expr = rest[1..close].trim();
        if expr.is_empty() {
            return Err(PathError::malformed(
                key,
                format!("empty index expression in segment '{segment}'"),
            ));
        }

        ops.push(PathOp::Index(expr.to_string()));
        rest = &rest[close + 1..];
    }

    Ok(())
}

/// Returns the byte offset of the bracket closing the one at offset 0.
fn matching_bracket(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
