//! Listeners: notification targets registered with a dispatcher.

use super::action::{Action, ActionType};
use super::error::{DispatchError, ListenerError};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Callback invoked with each delivered action.
pub type Callback = Rc<dyn Fn(&Action) -> Result<(), DispatchError>>;

/// Which actions a listener responds to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    /// Notified for every action.
    Unconditional,
    /// Notified only for actions whose type equals the stored one.
    Typed(ActionType),
}

impl ListenerKind {
    pub fn matches(&self, action: &Action) -> bool {
        match self {
            Self::Unconditional => true,
            Self::Typed(expected) => action.action_type() == expected,
        }
    }
}

struct ListenerInner {
    kind: ListenerKind,
    callback: Callback,
    subscribed: Cell<bool>,
}

/// Handle to a subscribed listener.
///
/// Listeners are created by `subscribe` and compared by identity: two
/// subscriptions with the same criterion are still distinct listeners.
#[derive(Clone)]
pub struct Listener(Rc<ListenerInner>);

impl Listener {
    fn new(kind: ListenerKind, callback: Callback) -> Self {
        Self(Rc::new(ListenerInner {
            kind,
            callback,
            subscribed: Cell::new(false),
        }))
    }

    pub fn kind(&self) -> &ListenerKind {
        &self.0.kind
    }

    /// The expected action type, for type-filtered listeners.
    pub fn action_type(&self) -> Option<&ActionType> {
        match &self.0.kind {
            ListenerKind::Unconditional => None,
            ListenerKind::Typed(action_type) => Some(action_type),
        }
    }

    pub fn matches(&self, action: &Action) -> bool {
        self.0.kind.matches(action)
    }

    /// Deliver `action`, skipping the callback when the kind does not match.
    pub fn notify(&self, action: &Action) -> Result<(), DispatchError> {
        if !self.matches(action) {
            return Ok(());
        }
        (self.0.callback)(action)
    }

    /// Whether the listener is still registered with its dispatcher.
    pub fn is_subscribed(&self) -> bool {
        self.0.subscribed.get()
    }

    pub(crate) fn set_subscribed(&self, subscribed: bool) {
        self.0.subscribed.set(subscribed);
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("kind", &self.0.kind)
            .field("subscribed", &self.is_subscribed())
            .finish_non_exhaustive()
    }
}

/// Builder for listener definitions, consumed by
/// [`Dispatcher::subscribe_with`](crate::dispatch::Dispatcher::subscribe_with).
#[derive(Default)]
pub struct ListenerBuilder {
    action_type: Option<ActionType>,
    callback: Option<Callback>,
}

impl ListenerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only notify for actions of this type (optional).
    pub fn action_type(mut self, action_type: impl Into<ActionType>) -> Self {
        self.action_type = Some(action_type.into());
        self
    }

    /// Set the callback (required).
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Action) -> Result<(), DispatchError> + 'static,
    {
        self.callback = Some(Rc::new(callback));
        self
    }

    pub(crate) fn build(self) -> Result<Listener, ListenerError> {
        let callback = self.callback.ok_or(ListenerError::MissingCallback)?;
        let kind = match self.action_type {
            Some(action_type) => ListenerKind::Typed(action_type),
            None => ListenerKind::Unconditional,
        };
        Ok(Listener::new(kind, callback))
    }
}

impl fmt::Debug for ListenerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBuilder")
            .field("action_type", &self.action_type)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
