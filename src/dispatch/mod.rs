//! Action dispatch.
//!
//! This module contains the publish/subscribe core of the store:
//! - [`Action`]s, opaque records tagged with an [`ActionType`]
//! - [`Listener`]s, unconditional or filtered by action type
//! - the [`Dispatcher`], which delivers each action to its listeners in
//!   subscription order and rejects listener-set changes mid-pass
//!
//! Everything here is single-threaded. A host that shares a dispatcher
//! across threads must serialize access itself.

mod action;
mod dispatcher;
mod error;
mod listener;

pub use action::{Action, ActionType};
pub use dispatcher::{DispatchPhase, Dispatcher, WeakDispatcher};
pub use error::{ActionError, BoxError, DispatchError, ListenerError};
pub use listener::{Callback, Listener, ListenerBuilder, ListenerKind};
