//! The store: one immutable state value plus its dispatcher.

use super::builder::StoreBuilder;
use super::definition::StoreDefinition;
use super::error::StoreError;
use crate::dispatch::{Action, ActionType, DispatchError, Dispatcher, Listener};
use crate::immutable::{DigError, PathSegment, Plain, Value};
use crate::reducer::Reducer;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

pub(crate) struct StoreInner {
    state: RefCell<Value>,
    dispatcher: Dispatcher,
    // Reducer subscriptions owned by this store; removed on drop.
    reducers: RefCell<Vec<Listener>>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let reducers = self.reducers.get_mut();
        if reducers.is_empty() {
            return;
        }
        for listener in reducers.drain(..) {
            self.dispatcher.unsubscribe(&listener);
        }
        debug!(
            listeners = self.dispatcher.len(),
            "store dropped, reducers unsubscribed"
        );
    }
}

/// Holds a single immutable state and routes actions to its listeners.
///
/// The state can only be replaced by reducers installed at construction;
/// callers read it with [`Store::state`]. `Store` is a cheap, cloneable
/// handle for single-threaded use.
///
/// # Example
///
/// ```rust
/// use stratum::dispatch::Action;
/// use stratum::immutable::{Plain, Value};
/// use stratum::reducers;
/// use stratum::store::Store;
///
/// let store = Store::builder()
///     .initial_state(Plain::map([("on", Plain::Bool(false)), ("value", Plain::Null)]))
///     .reducers(reducers! {
///         "power.on" => |state, _| state.merge([("on", Value::from(true)), ("value", Value::from(0))]),
///     })
///     .build()
///     .unwrap();
///
/// store.dispatch(&Action::new("power.on")).unwrap();
///
/// assert_eq!(store.get("on"), Some(Value::from(true)));
/// assert_eq!(store.get("value"), Some(Value::from(0)));
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

impl Store {
    /// Build a store with the default empty-map state when `initial` is
    /// absent.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidInitialState`] when `initial` is neither absent,
    /// `Null`, a plain map, nor an immutable map.
    pub fn new(initial: Option<Plain>) -> Result<Self, StoreError> {
        StoreBuilder::new().initial_state_opt(initial).build()
    }

    /// Build a store from a [`StoreDefinition`]'s default state and reducers.
    pub fn define<D: StoreDefinition>(initial: Option<Plain>) -> Result<Self, StoreError> {
        StoreBuilder::from_definition::<D>()
            .initial_state_opt(initial)
            .build()
    }

    /// Start a [`StoreBuilder`].
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_parts(state: Value, dispatcher: Dispatcher) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(state),
                dispatcher,
                reducers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The current state. Cloning a persistent value shares its structure,
    /// so this does not copy the state's contents.
    pub fn state(&self) -> Value {
        self.inner.state.borrow().clone()
    }

    /// Top-level key of the current state.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.state.borrow().get(key).cloned()
    }

    /// [`dig`](crate::immutable::dig) into the current state.
    pub fn dig(&self, path: &[PathSegment]) -> Result<Option<Value>, DigError> {
        self.inner.state.borrow().dig(path)
    }

    /// The dispatcher this store delivers through, possibly shared.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Dispatch `action` to every listener, reducers included.
    pub fn dispatch(&self, action: &Action) -> Result<(), DispatchError> {
        self.inner.dispatcher.dispatch(action)
    }

    /// Subscribe a listener notified for every action.
    pub fn subscribe<F>(&self, callback: F) -> Result<Listener, DispatchError>
    where
        F: Fn(&Action) -> Result<(), DispatchError> + 'static,
    {
        self.inner.dispatcher.subscribe(callback)
    }

    /// Subscribe a listener notified only for `action_type`.
    pub fn subscribe_to<F>(
        &self,
        action_type: impl Into<ActionType>,
        callback: F,
    ) -> Result<Listener, DispatchError>
    where
        F: Fn(&Action) -> Result<(), DispatchError> + 'static,
    {
        self.inner.dispatcher.subscribe_to(action_type, callback)
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        self.inner.dispatcher.unsubscribe(listener)
    }

    /// Swap in a new state value. The previous value is left untouched.
    pub(crate) fn replace_state(&self, next: Value) {
        *self.inner.state.borrow_mut() = next;
    }

    /// Subscribe `reducer` so that matching actions rewrite the state.
    ///
    /// The callback holds a weak reference so the dispatcher's listener list
    /// does not keep the store alive. The subscription lasts until the last
    /// handle to the store is dropped.
    pub(crate) fn install_reducer(&self, reducer: Reducer) -> Result<Listener, DispatchError> {
        let weak: Weak<StoreInner> = Rc::downgrade(&self.inner);
        let action_type = reducer.action_type().clone();

        let listener = self
            .inner
            .dispatcher
            .subscribe_to(action_type, move |action| {
                let Some(inner) = weak.upgrade() else {
                    return Ok(());
                };
                let store = Store { inner };
                let current = store.state();
                match reducer.apply(&current, action).map_err(DispatchError::Listener)? {
                    Some(next) => {
                        trace!(action_type = %action.action_type(), "reducer updated state");
                        store.replace_state(next);
                    }
                    None => {
                        trace!(action_type = %action.action_type(), "reducer declined to update");
                    }
                }
                Ok(())
            })?;
        self.inner.reducers.borrow_mut().push(listener.clone());
        Ok(listener)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.borrow())
            .field("dispatcher", &self.inner.dispatcher)
            .finish()
    }
}
