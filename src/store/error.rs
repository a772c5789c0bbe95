//! Store construction errors.

use crate::dispatch::DispatchError;
use crate::immutable::ConversionError;
use thiserror::Error;

/// Errors that can occur when building a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("initial state must be a keyed map or absent, got {value}")]
    InvalidInitialState { value: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Installing the reducers failed, e.g. because the injected dispatcher
    /// was in the middle of a pass.
    #[error(transparent)]
    Subscription(#[from] DispatchError),
}
