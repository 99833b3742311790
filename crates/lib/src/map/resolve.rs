//! Path resolution against a [`NestedMap`].
//!
//! Resolution happens in two phases:
//!
//! 1. **Fold**: the path's operations are reduced symbolically. Each
//!    `Backtrack(n)` discards the last `n` levels walked so far (clamped at the
//!    root), so segments skipped by backtracking are never looked up, never
//!    validated and never created.
//! 2. **Bind**: the folded steps are walked immutably. Index expressions are
//!    evaluated to concrete integers, existence is checked and leaves that
//!    cannot be subscripted are rejected. The result is a [`Locator`]: the
//!    concrete steps from the root to the target slot.
//!
//! Mutating operations then replay the locator mutably. Because every check
//! happens during binding, a failed write leaves the tree untouched.

use tracing::{debug, trace};

use super::{MapError, NestedMap, eval};
use crate::{
    Value,
    path::{Key, Path, PathOp},
};

/// What the caller intends to do at the resolved location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Fetch the value; every step must exist.
    Read,
    /// Store a value; absent map layers are created on the way.
    Write,
    /// Test for presence; the root itself counts as present.
    Probe,
    /// Remove a leaf or a layer without leaves beneath it.
    Delete,
    /// Remove and return whatever is there, leaf or layer.
    Pop,
}

/// A folded step: a map child by key, or a bracket expression still to evaluate.
#[derive(Debug, Clone, Copy)]
enum Step<'p> {
    Key(&'p Key),
    Index(&'p str),
}

impl Step<'_> {
    fn label(&self) -> String {
        match self {
            Step::Key(key) => key.to_string(),
            Step::Index(expr) => format!("[{expr}]"),
        }
    }
}

/// A bound step with every expression evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Bound {
    /// Child of a map
    Key(Key),
    /// Element of a list, already normalised to a valid position
    Item(usize),
}

impl Bound {
    fn label(&self) -> String {
        match self {
            Bound::Key(key) => key.to_string(),
            Bound::Item(index) => format!("[{index}]"),
        }
    }
}

/// Where a path leads: the concrete steps from the root to the target.
///
/// All steps but the last select the containing map or list; the last step
/// is the slot inside it. No steps at all means the root itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Locator {
    steps: Vec<Bound>,
}

/// Cursor for the immutable walk.
#[derive(Clone, Copy)]
enum At<'a> {
    Root(&'a NestedMap),
    Value(&'a Value),
    /// Past the end of existing structure during a write; will be a new map.
    Vacant,
}

/// Reduces backtracking so that only the surviving steps remain.
fn fold(path: &Path) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    // Index into `steps` where each level begins
    let mut levels: Vec<usize> = Vec::new();

    for op in path.ops() {
        match op {
            PathOp::Descend(key) => {
                levels.push(steps.len());
                steps.push(Step::Key(key));
            }
            PathOp::Index(expr) => {
                // Brackets belong to the level they follow; a bare `[n]` opens one
                if levels.is_empty() {
                    levels.push(steps.len());
                }
                steps.push(Step::Index(expr));
            }
            PathOp::Backtrack(n) => {
                if *n > levels.len() {
                    debug!(
                        key = path.as_str(),
                        levels = n,
                        depth = levels.len(),
                        "Backtrack clamped at root"
                    );
                }
                let keep = levels.len().saturating_sub(*n);
                if let Some(&start) = levels.get(keep) {
                    steps.truncate(start);
                    levels.truncate(keep);
                }
            }
        }
    }

    steps
}

/// Converts a possibly negative index into a list position.
fn list_position(key: &Path, index: i64, len: usize) -> Result<usize, MapError> {
    let position = if index < 0 {
        (len as i64).checked_add(index)
    } else {
        Some(index)
    };

    match position {
        Some(position) if position >= 0 && (position as usize) < len => Ok(position as usize),
        _ => Err(MapError::IndexOutOfRange {
            key: key.as_str().to_string(),
            index,
            len,
        }),
    }
}

fn not_subscriptable(path: &Path, segment: String, value: &Value) -> MapError {
    MapError::NotSubscriptable {
        key: path.as_str().to_string(),
        segment,
        type_name: value.type_name().to_string(),
    }
}

/// Walks the folded steps immutably, returning the bound steps and the cursor
/// at the target.
fn bind<'a>(
    root: &'a NestedMap,
    path: &Path,
    mode: Mode,
) -> Result<(Vec<Bound>, At<'a>), MapError> {
    let create = mode == Mode::Write;
    let vacant_context = NestedMap::new();
    let mut bound = Vec::new();
    let mut at = At::Root(root);
    // The map holding the current position; index expressions see its entries
    let mut context: Option<&'a NestedMap> = Some(root);

    for step in fold(path) {
        let key = match step {
            Step::Key(key) => key.clone(),
            Step::Index(expr) => {
                let index = eval::evaluate(expr, context.unwrap_or(&vacant_context))?;
                if let At::Value(Value::List(items)) = at {
                    let position = list_position(path, index, items.len())?;
                    bound.push(Bound::Item(position));
                    at = At::Value(&items[position]);
                    continue;
                }
                Key::Index(index)
            }
        };

        let map = match at {
            At::Root(map) | At::Value(Value::Map(map)) => map,
            At::Value(leaf) => return Err(not_subscriptable(path, step.label(), leaf)),
            At::Vacant => {
                bound.push(Bound::Key(key));
                continue;
            }
        };

        context = Some(map);
        at = match map.children.get(&key) {
            Some(child) => At::Value(child),
            None if create => {
                context = None;
                At::Vacant
            }
            None => {
                return Err(MapError::KeyNotFound {
                    key: path.as_str().to_string(),
                    segment: step.label(),
                });
            }
        };
        bound.push(Bound::Key(key));
    }

    Ok((bound, at))
}

/// Resolves a path to the value it names.
pub(crate) fn read<'a>(root: &'a NestedMap, path: &Path) -> Result<&'a Value, MapError> {
    let (bound, at) = bind(root, path, Mode::Read)?;
    trace!(key = path.as_str(), steps = bound.len(), "Resolved path for read");
    match at {
        At::Value(value) => Ok(value),
        _ => Err(MapError::RootValue {
            key: path.as_str().to_string(),
        }),
    }
}

/// Resolves a path to the slot an operation should act on.
pub(crate) fn locate(root: &NestedMap, path: &Path, mode: Mode) -> Result<Locator, MapError> {
    let (steps, at) = bind(root, path, mode)?;
    trace!(key = path.as_str(), ?mode, steps = steps.len(), "Resolved path");

    if steps.is_empty() && mode != Mode::Probe {
        return Err(MapError::RootValue {
            key: path.as_str().to_string(),
        });
    }

    if let (Mode::Delete, At::Value(Value::Map(layer))) = (mode, at) {
        if !layer.is_empty() {
            debug!(key = path.as_str(), "Rejected delete of a partial key");
            return Err(MapError::PartialKey {
                key: path.as_str().to_string(),
            });
        }
    }

    Ok(Locator { steps })
}

/// A mutable handle on the container holding a locator's target slot.
pub(crate) enum Container<'a> {
    Map(&'a mut NestedMap),
    List(&'a mut Vec<Value>),
}

impl<'a> Container<'a> {
    fn of(value: &'a mut Value, path: &Path, step: &Bound) -> Result<Self, MapError> {
        match value {
            Value::Map(map) => Ok(Container::Map(map)),
            Value::List(items) => Ok(Container::List(items)),
            leaf => Err(not_subscriptable(path, step.label(), leaf)),
        }
    }

    fn child(self, path: &Path, step: &Bound, create: bool) -> Result<&'a mut Value, MapError> {
        let missing = || MapError::KeyNotFound {
            key: path.as_str().to_string(),
            segment: step.label(),
        };

        match (self, step) {
            (Container::Map(map), Bound::Key(key)) if create => {
                Ok(map.children.entry(key.clone()).or_insert_with(|| {
                    debug!(key = path.as_str(), segment = %key, "Creating intermediate layer");
                    Value::Map(NestedMap::new())
                }))
            }
            (Container::Map(map), Bound::Key(key)) => map.children.get_mut(key).ok_or_else(missing),
            (Container::List(items), Bound::Item(index)) => {
                items.get_mut(*index).ok_or_else(missing)
            }
            _ => Err(missing()),
        }
    }

    /// Stores a value in the slot, returning what was there.
    pub(crate) fn insert(self, step: &Bound, value: Value) -> Option<Value> {
        match (self, step) {
            (Container::Map(map), Bound::Key(key)) => map.children.insert(key.clone(), value),
            (Container::List(items), Bound::Item(index)) => items
                .get_mut(*index)
                .map(|slot| std::mem::replace(slot, value)),
            _ => None,
        }
    }

    /// Removes the slot, returning its value.
    pub(crate) fn remove(self, step: &Bound) -> Option<Value> {
        match (self, step) {
            (Container::Map(map), Bound::Key(key)) => map.children.shift_remove(key),
            (Container::List(items), Bound::Item(index)) if *index < items.len() => {
                Some(items.remove(*index))
            }
            _ => None,
        }
    }

    /// Borrows the value in the slot.
    pub(crate) fn get_mut(self, step: &Bound) -> Option<&'a mut Value> {
        match (self, step) {
            (Container::Map(map), Bound::Key(key)) => map.children.get_mut(key),
            (Container::List(items), Bound::Item(index)) => items.get_mut(*index),
            _ => None,
        }
    }
}

impl Locator {
    /// Replays all but the last step mutably, creating map layers if asked.
    ///
    /// Returns the container and the final step. Must not be called on a
    /// root locator.
    pub(crate) fn container<'a>(
        &self,
        root: &'a mut NestedMap,
        path: &Path,
        create: bool,
    ) -> Result<(Container<'a>, &Bound), MapError> {
        let Some((last, parents)) = self.steps.split_last() else {
            return Err(MapError::RootValue {
                key: path.as_str().to_string(),
            });
        };

        let mut container = Container::Map(root);
        for step in parents {
            let child = container.child(path, step, create)?;
            container = Container::of(child, path, step)?;
        }
        Ok((container, last))
    }
}
