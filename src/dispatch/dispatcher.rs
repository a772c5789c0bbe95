//! Ordered, reentrancy-guarded delivery of actions to listeners.

use super::action::{Action, ActionType};
use super::error::DispatchError;
use super::listener::{Listener, ListenerBuilder};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace, warn};

/// Whether a dispatch pass is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DispatchPhase {
    #[default]
    Idle,
    /// `depth` counts nested passes; 1 for a top-level dispatch.
    Dispatching { depth: usize },
}

#[derive(Default)]
struct DispatcherInner {
    listeners: RefCell<Vec<Listener>>,
    phase: Cell<DispatchPhase>,
    // Set when a subscription is rejected mid-pass; cleared once the
    // outermost pass ends.
    rejected: Cell<bool>,
}

/// Delivers actions to subscribed listeners in subscription order.
///
/// The dispatcher is a cheap, cloneable handle for single-threaded use.
/// Listener callbacks may dispatch nested actions through a clone (or a
/// [`WeakDispatcher`]); a nested pass runs to completion before the outer
/// pass moves on. Subscribing while any pass is active fails with
/// [`DispatchError::Reentrant`], and that failure is reported by the
/// enclosing `dispatch` even if the callback ignores it.
///
/// # Example
///
/// ```rust
/// use stratum::dispatch::{Action, Dispatcher};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let dispatcher = Dispatcher::new();
/// let count = Rc::new(Cell::new(0));
///
/// let counter = Rc::clone(&count);
/// dispatcher
///     .subscribe_to("tick", move |_| {
///         counter.set(counter.get() + 1);
///         Ok(())
///     })
///     .unwrap();
///
/// dispatcher.dispatch(&Action::new("tick")).unwrap();
/// dispatcher.dispatch(&Action::new("tock")).unwrap();
/// assert_eq!(count.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Dispatcher {
    inner: Rc<DispatcherInner>,
}

impl Dispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener notified for every action.
    pub fn subscribe<F>(&self, callback: F) -> Result<Listener, DispatchError>
    where
        F: Fn(&Action) -> Result<(), DispatchError> + 'static,
    {
        self.subscribe_with(ListenerBuilder::new().callback(callback))
    }

    /// Subscribe a listener notified only for actions of `action_type`.
    pub fn subscribe_to<F>(
        &self,
        action_type: impl Into<ActionType>,
        callback: F,
    ) -> Result<Listener, DispatchError>
    where
        F: Fn(&Action) -> Result<(), DispatchError> + 'static,
    {
        self.subscribe_with(
            ListenerBuilder::new()
                .action_type(action_type)
                .callback(callback),
        )
    }

    /// Subscribe a listener described by `builder`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Reentrant`] while a dispatch pass is active.
    /// - [`DispatchError::Definition`] when the builder has no callback.
    pub fn subscribe_with(&self, builder: ListenerBuilder) -> Result<Listener, DispatchError> {
        if self.is_dispatching() {
            self.inner.rejected.set(true);
            warn!(?builder, "rejected subscription during dispatch");
            return Err(DispatchError::Reentrant);
        }

        let listener = builder.build()?;
        listener.set_subscribed(true);

        let mut listeners = self.inner.listeners.borrow_mut();
        listeners.push(listener.clone());
        debug!(
            kind = ?listener.kind(),
            listeners = listeners.len(),
            "subscribed listener"
        );
        Ok(listener)
    }

    /// Remove `listener`. Returns `false` if it was not subscribed here.
    ///
    /// Allowed during a dispatch pass: a listener removed before the pass
    /// reaches it is not notified.
    pub fn unsubscribe(&self, listener: &Listener) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let Some(position) = listeners.iter().position(|entry| entry == listener) else {
            return false;
        };

        listeners.remove(position);
        listener.set_subscribed(false);
        debug!(
            kind = ?listener.kind(),
            listeners = listeners.len(),
            "unsubscribed listener"
        );
        true
    }

    /// Deliver `action` to every matching listener in subscription order.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Reentrant`] if any callback in this pass (or a
    ///   nested one) attempted to subscribe.
    /// - Otherwise the first callback error, unchanged. Listeners after the
    ///   failing one are not notified.
    pub fn dispatch(&self, action: &Action) -> Result<(), DispatchError> {
        let pass = PassGuard::enter(&self.inner);
        let snapshot: Vec<Listener> = self.inner.listeners.borrow().clone();
        trace!(
            action_type = %action.action_type(),
            depth = pass.depth,
            listeners = snapshot.len(),
            "dispatching action"
        );

        for listener in snapshot.iter().filter(|listener| listener.is_subscribed()) {
            let result = listener.notify(action);
            if self.inner.rejected.get() {
                return Err(DispatchError::Reentrant);
            }
            result?;
        }
        Ok(())
    }

    /// Current phase, with the nesting depth while dispatching.
    pub fn phase(&self) -> DispatchPhase {
        self.inner.phase.get()
    }

    /// True while any pass, nested or not, is running.
    pub fn is_dispatching(&self) -> bool {
        matches!(self.phase(), DispatchPhase::Dispatching { .. })
    }

    /// Number of subscribed listeners.
    pub fn len(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.listeners.borrow().is_empty()
    }

    /// A non-owning handle, for callbacks that dispatch nested actions
    /// without keeping the dispatcher alive.
    pub fn downgrade(&self) -> WeakDispatcher {
        WeakDispatcher {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("phase", &self.phase())
            .field("listeners", &self.len())
            .finish()
    }
}

/// Weak counterpart of [`Dispatcher`].
#[derive(Clone, Debug, Default)]
pub struct WeakDispatcher {
    inner: Weak<DispatcherInner>,
}

impl WeakDispatcher {
    /// The dispatcher, if any strong handle is still alive.
    pub fn upgrade(&self) -> Option<Dispatcher> {
        self.inner.upgrade().map(|inner| Dispatcher { inner })
    }
}

/// Marks a pass as active for its lifetime and restores the previous phase
/// on every exit path, unwinding included.
struct PassGuard<'a> {
    inner: &'a DispatcherInner,
    previous: DispatchPhase,
    depth: usize,
}

impl<'a> PassGuard<'a> {
    fn enter(inner: &'a DispatcherInner) -> Self {
        let previous = inner.phase.get();
        let depth = match previous {
            DispatchPhase::Idle => 1,
            DispatchPhase::Dispatching { depth } => depth + 1,
        };
        inner.phase.set(DispatchPhase::Dispatching { depth });
        Self {
            inner,
            previous,
            depth,
        }
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.inner.phase.set(self.previous);
        if self.previous == DispatchPhase::Idle {
            self.inner.rejected.set(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn record(log: &Log, label: &'static str) -> impl Fn(&Action) -> Result<(), DispatchError> {
        let log = Rc::clone(log);
        move |action: &Action| {
            log.borrow_mut()
                .push(format!("{label}:{}", action.action_type()));
            Ok(())
        }
    }

    #[test]
    fn new_dispatcher_is_idle_and_empty() {
        let dispatcher = Dispatcher::new();
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn subscribe_returns_matching_listener_kind() {
        let dispatcher = Dispatcher::new();

        let untyped = dispatcher.subscribe(|_| Ok(())).unwrap();
        let typed = dispatcher
            .subscribe_to("widgets.example_action", |_| Ok(()))
            .unwrap();

        assert_eq!(untyped.action_type(), None);
        assert_eq!(
            typed.action_type(),
            Some(&ActionType::from("widgets.example_action"))
        );
        assert!(typed.is_subscribed());
        assert_eq!(dispatcher.len(), 2);
    }

    #[test]
    fn subscribe_with_requires_callback() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher
            .subscribe_with(ListenerBuilder::new().action_type("a"))
            .unwrap_err();

        assert!(matches!(err, DispatchError::Definition(_)));
        assert_eq!(err.to_string(), "must provide a callback");
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn dispatch_notifies_in_subscription_order() {
        let dispatcher = Dispatcher::new();
        let log = log();
        dispatcher.subscribe(record(&log, "first")).unwrap();
        dispatcher.subscribe_to("other", record(&log, "skipped")).unwrap();
        dispatcher.subscribe_to("example", record(&log, "second")).unwrap();
        dispatcher.subscribe(record(&log, "third")).unwrap();

        dispatcher.dispatch(&Action::new("example")).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["first:example", "second:example", "third:example"]
        );
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
    }

    #[test]
    fn nested_dispatch_completes_before_outer_pass_resumes() {
        let dispatcher = Dispatcher::new();
        let log = log();
        dispatcher.subscribe(record(&log, "l1")).unwrap();

        let nested = dispatcher.downgrade();
        let inner_log = Rc::clone(&log);
        dispatcher
            .subscribe(move |action| {
                inner_log
                    .borrow_mut()
                    .push(format!("l2:{}", action.action_type()));
                if action.action_type().as_str() == "outer" {
                    if let Some(dispatcher) = nested.upgrade() {
                        dispatcher.dispatch(&Action::new("inner"))?;
                    }
                }
                Ok(())
            })
            .unwrap();
        dispatcher.subscribe(record(&log, "l3")).unwrap();

        dispatcher.dispatch(&Action::new("outer")).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "l1:outer", "l2:outer", "l1:inner", "l2:inner", "l3:inner", "l3:outer"
            ]
        );
    }

    #[test]
    fn nested_dispatch_tracks_depth() {
        let dispatcher = Dispatcher::new();
        let depths = Rc::new(RefCell::new(Vec::new()));

        let handle = dispatcher.downgrade();
        let seen = Rc::clone(&depths);
        dispatcher
            .subscribe(move |action| {
                let Some(dispatcher) = handle.upgrade() else {
                    return Ok(());
                };
                seen.borrow_mut().push(dispatcher.phase());
                if action.action_type().as_str() == "outer" {
                    dispatcher.dispatch(&Action::new("inner"))?;
                }
                Ok(())
            })
            .unwrap();

        dispatcher.dispatch(&Action::new("outer")).unwrap();

        assert_eq!(
            *depths.borrow(),
            vec![
                DispatchPhase::Dispatching { depth: 1 },
                DispatchPhase::Dispatching { depth: 2 },
            ]
        );
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
    }

    #[test]
    fn subscribing_during_dispatch_is_reentrant_error() {
        let dispatcher = Dispatcher::new();
        let handle = dispatcher.downgrade();
        dispatcher
            .subscribe(move |_| {
                if let Some(dispatcher) = handle.upgrade() {
                    dispatcher.subscribe(|_| Ok(()))?;
                }
                Ok(())
            })
            .unwrap();

        let err = dispatcher.dispatch(&Action::new("a")).unwrap_err();

        assert!(err.is_reentrant());
        assert_eq!(
            err.to_string(),
            "cannot add a listener while dispatching an action"
        );
        assert_eq!(dispatcher.len(), 1);
        assert!(!dispatcher.is_dispatching());
    }

    #[test]
    fn swallowed_reentrant_subscribe_still_fails_dispatch() {
        let dispatcher = Dispatcher::new();
        let handle = dispatcher.downgrade();
        let log = log();
        dispatcher
            .subscribe(move |_| {
                if let Some(dispatcher) = handle.upgrade() {
                    let _ = dispatcher.subscribe(|_| Ok(()));
                }
                Ok(())
            })
            .unwrap();
        dispatcher.subscribe(record(&log, "after")).unwrap();

        let err = dispatcher.dispatch(&Action::new("a")).unwrap_err();

        assert!(err.is_reentrant());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn reentrancy_flag_resets_after_pass() {
        let dispatcher = Dispatcher::new();
        let handle = dispatcher.downgrade();
        let listener = dispatcher
            .subscribe(move |_| {
                if let Some(dispatcher) = handle.upgrade() {
                    dispatcher.subscribe(|_| Ok(()))?;
                }
                Ok(())
            })
            .unwrap();

        assert!(dispatcher.dispatch(&Action::new("a")).is_err());
        assert!(dispatcher.unsubscribe(&listener));

        dispatcher.subscribe(|_| Ok(())).unwrap();
        dispatcher.dispatch(&Action::new("a")).unwrap();
    }

    #[test]
    fn listener_errors_propagate_unchanged_and_abort_pass() {
        let dispatcher = Dispatcher::new();
        let log = log();
        dispatcher
            .subscribe(|_| Err(DispatchError::listener("something has gone terribly wrong")))
            .unwrap();
        dispatcher.subscribe(record(&log, "after")).unwrap();

        let err = dispatcher.dispatch(&Action::new("a")).unwrap_err();

        assert!(matches!(err, DispatchError::Listener(_)));
        assert_eq!(err.to_string(), "something has gone terribly wrong");
        assert!(log.borrow().is_empty());
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let dispatcher = Dispatcher::new();
        let log = log();
        let first = dispatcher.subscribe(record(&log, "first")).unwrap();
        dispatcher.subscribe(record(&log, "second")).unwrap();

        assert!(dispatcher.unsubscribe(&first));
        assert!(!first.is_subscribed());
        dispatcher.dispatch(&Action::new("a")).unwrap();

        assert_eq!(*log.borrow(), vec!["second:a"]);
    }

    #[test]
    fn unsubscribe_unknown_listener_is_noop() {
        let dispatcher = Dispatcher::new();
        let other = Dispatcher::new();
        let foreign = other.subscribe(|_| Ok(())).unwrap();

        assert!(!dispatcher.unsubscribe(&foreign));
        assert!(foreign.is_subscribed());
    }

    #[test]
    fn unsubscribe_during_dispatch_skips_pending_listener() {
        let dispatcher = Dispatcher::new();
        let log = log();
        let victim: Rc<RefCell<Option<Listener>>> = Rc::new(RefCell::new(None));

        let handle = dispatcher.downgrade();
        let target = Rc::clone(&victim);
        dispatcher
            .subscribe(move |_| {
                let dispatcher = handle.upgrade();
                if let (Some(dispatcher), Some(listener)) = (dispatcher, target.borrow().as_ref()) {
                    dispatcher.unsubscribe(listener);
                }
                Ok(())
            })
            .unwrap();
        let second = dispatcher.subscribe(record(&log, "second")).unwrap();
        *victim.borrow_mut() = Some(second);

        dispatcher.dispatch(&Action::new("a")).unwrap();

        assert!(log.borrow().is_empty());
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn phase_is_restored_when_a_listener_panics() {
        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(|_| panic!("listener blew up")).unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _ = dispatcher.dispatch(&Action::new("a"));
        }));

        assert!(result.is_err());
        assert_eq!(dispatcher.phase(), DispatchPhase::Idle);
        dispatcher.subscribe(|_| Ok(())).unwrap();
    }
}
