//! Conversion and traversal errors.

use thiserror::Error;

/// Errors raised while converting plain values into immutable ones.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    /// Map keys must be text or symbols to be canonicalized.
    #[error("{type_name} is not a recognized plain key type")]
    InvalidKey { type_name: &'static str },
}

/// Errors raised by [`dig`](crate::immutable::dig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DigError {
    /// The root passed to `dig` is not an immutable collection.
    #[error("argument must be an immutable data structure")]
    NotImmutable { type_name: &'static str },

    /// The path continues past a scalar or a set.
    #[error("{type_name} does not have a path-traversal operation")]
    NotTraversable { type_name: &'static str },
}
