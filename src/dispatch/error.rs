//! Dispatch, listener and action errors.

use crate::immutable::ConversionError;
use thiserror::Error;

/// Boxed error returned by listener callbacks and reducer transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when defining a listener.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListenerError {
    #[error("must provide a callback")]
    MissingCallback,
}

/// Errors that can occur when building an action from a plain record.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("action must be a keyed map, got {type_name}")]
    NotARecord { type_name: &'static str },

    #[error("action is missing a type field")]
    MissingType,

    #[error("action type must be text or a symbol, got {type_name}")]
    InvalidType { type_name: &'static str },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Errors surfaced by [`Dispatcher`](crate::dispatch::Dispatcher) operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The listener set was changed while a dispatch pass was running.
    #[error("cannot add a listener while dispatching an action")]
    Reentrant,

    #[error(transparent)]
    Definition(#[from] ListenerError),

    /// A listener callback failed. The original error is kept as-is.
    #[error(transparent)]
    Listener(BoxError),
}

impl DispatchError {
    /// Wrap an arbitrary callback failure.
    pub fn listener(err: impl Into<BoxError>) -> Self {
        Self::Listener(err.into())
    }

    pub fn is_reentrant(&self) -> bool {
        matches!(self, Self::Reentrant)
    }
}
