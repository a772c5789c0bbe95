//! Crate-level error type.
//!
//! Each module reports its own error enum. [`Error`] gathers them so that
//! applications mixing several operations can propagate with `?`.

use crate::dispatch::{ActionError, DispatchError, ListenerError};
use crate::immutable::{ConversionError, DigError};
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Dig(#[from] DigError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// True when the failure was a subscription attempted mid-dispatch,
    /// whether it surfaced from the dispatcher or from store construction.
    pub fn is_reentrant(&self) -> bool {
        match self {
            Self::Dispatch(err) | Self::Store(StoreError::Subscription(err)) => err.is_reentrant(),
            _ => false,
        }
    }
}
