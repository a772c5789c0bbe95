//! Ordered registration tables of reducers.

use crate::dispatch::{Action, ActionType, BoxError};
use crate::immutable::Value;
use std::fmt;
use std::rc::Rc;

/// State transform run for a matching action.
///
/// `Ok(None)` declines to update and leaves the state as it was.
pub type Transform = Rc<dyn Fn(&Value, &Action) -> Result<Option<Value>, BoxError>>;

/// A transform registered against one action type.
#[derive(Clone)]
pub struct Reducer {
    action_type: ActionType,
    transform: Transform,
}

impl Reducer {
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Run the transform against `state`.
    pub fn apply(&self, state: &Value, action: &Action) -> Result<Option<Value>, BoxError> {
        (self.transform)(state, action)
    }
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

/// Ordered table of `(action type, transform)` pairs.
///
/// Tables are built by composition: each reducer-bearing unit exposes its
/// own table and a store merges them in a fixed order. Within a table,
/// declaration order is kept; merged tables follow the tables before them.
///
/// # Example
///
/// ```rust
/// use stratum::dispatch::Action;
/// use stratum::immutable::Value;
/// use stratum::reducer::ReducerTable;
///
/// let power = ReducerTable::new()
///     .on("power.on", |state, _| state.merge([("on", Value::from(true))]));
/// let counter = ReducerTable::new().on("power.on", |state, _| {
///     state.merge([("value", Value::from(0))])
/// });
///
/// let table = power.merge(counter);
/// let state = Value::map([("on", Value::from(false))]);
/// let next = table.reduce(&state, &Action::new("power.on")).unwrap();
///
/// assert_eq!(next.get("on"), Some(&Value::from(true)));
/// assert_eq!(next.get("value"), Some(&Value::from(0)));
/// ```
#[derive(Clone, Default)]
pub struct ReducerTable {
    entries: Vec<Reducer>,
}

impl ReducerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an infallible transform. Returning `None` leaves the state
    /// unchanged.
    pub fn on<F>(self, action_type: impl Into<ActionType>, transform: F) -> Self
    where
        F: Fn(&Value, &Action) -> Option<Value> + 'static,
    {
        self.try_on(action_type, move |state, action| Ok(transform(state, action)))
    }

    /// Register a transform that may fail. Its error is returned from the
    /// dispatch that triggered it.
    pub fn try_on<F>(mut self, action_type: impl Into<ActionType>, transform: F) -> Self
    where
        F: Fn(&Value, &Action) -> Result<Option<Value>, BoxError> + 'static,
    {
        self.entries.push(Reducer {
            action_type: action_type.into(),
            transform: Rc::new(transform),
        });
        self
    }

    /// Append every entry of `other` after this table's entries.
    pub fn merge(mut self, other: ReducerTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reducer> {
        self.entries.iter()
    }

    /// Fold `action` through every matching reducer in order, without a
    /// store. Each reducer sees the state produced by the one before it.
    pub fn reduce(&self, state: &Value, action: &Action) -> Result<Value, BoxError> {
        let mut current = state.clone();
        for reducer in self
            .entries
            .iter()
            .filter(|reducer| reducer.action_type() == action.action_type())
        {
            if let Some(next) = reducer.apply(&current, action)? {
                current = next;
            }
        }
        Ok(current)
    }
}

impl IntoIterator for ReducerTable {
    type Item = Reducer;
    type IntoIter = std::vec::IntoIter<Reducer>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Debug for ReducerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(Reducer::action_type))
            .finish()
    }
}
