//! Path traversal over immutable collections.

use super::error::DigError;
use super::value::{Symbol, Value};

/// One step of a [`dig`] path: a map key or a positional index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(Symbol),
    /// Negative indices count back from the end.
    Index(i64),
}

impl PathSegment {
    fn key(&self) -> Option<&Symbol> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    fn index(&self) -> Option<i64> {
        match self {
            Self::Key(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(Symbol::from(key))
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(Symbol::from(key))
    }
}

impl From<Symbol> for PathSegment {
    fn from(key: Symbol) -> Self {
        Self::Key(key)
    }
}

impl From<i64> for PathSegment {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for PathSegment {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// Build a `[PathSegment; N]` from keys and indices.
///
/// ```rust
/// use stratum::immutable::PathSegment;
/// use stratum::path;
///
/// let path = path!["cities", 1, "name"];
/// assert_eq!(path[1], PathSegment::Index(1));
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        [$($crate::immutable::PathSegment::from($segment)),*]
    };
}

/// Look up a nested value by walking `path` through maps and indexed kinds.
///
/// Maps are addressed by key; sequences and sorted sets by index. A missing
/// key or an out-of-range index anywhere along the path yields `Ok(None)`
/// for the whole call, as does reaching a `Null` with path left to walk. An
/// empty path returns the root itself.
///
/// # Errors
///
/// - [`DigError::NotImmutable`] when `root` is not an immutable collection.
/// - [`DigError::NotTraversable`] when the path continues into a scalar or
///   into a set, which has no keyed or indexed lookup.
///
/// # Example
///
/// ```rust
/// use stratum::immutable::{dig, Value};
/// use stratum::path;
///
/// let state = Value::map([("weapons", Value::map([("bows", Value::from(3))]))]);
///
/// assert_eq!(dig(&state, &path!["weapons", "bows"]), Ok(Some(Value::from(3))));
/// assert_eq!(dig(&state, &path!["armor", "helmets", 0]), Ok(None));
/// ```
pub fn dig(root: &Value, path: &[PathSegment]) -> Result<Option<Value>, DigError> {
    if !root.is_collection() {
        return Err(DigError::NotImmutable {
            type_name: root.type_name(),
        });
    }

    let mut node = root;
    let mut rest = path;
    while let Some((segment, remaining)) = rest.split_first() {
        let found = match node {
            Value::Null => return Ok(None),
            Value::Map(map) => segment.key().and_then(|key| map.get(key)),
            Value::Sequence(items) => segment
                .index()
                .and_then(|index| resolve_index(index, items.len()))
                .and_then(|index| items.get(index)),
            Value::SortedSet(items) => segment
                .index()
                .and_then(|index| resolve_index(index, items.len()))
                .and_then(|index| items.iter().nth(index)),
            Value::Set(_)
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Text(_)
            | Value::Symbol(_) => {
                return Err(DigError::NotTraversable {
                    type_name: node.type_name(),
                })
            }
        };

        match found {
            Some(value) => node = value,
            None => return Ok(None),
        }
        rest = remaining;
    }

    Ok(Some(node.clone()))
}

impl Value {
    /// Method form of [`dig`].
    pub fn dig(&self, path: &[PathSegment]) -> Result<Option<Value>, DigError> {
        dig(self, path)
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if index < 0 { len + index } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}
