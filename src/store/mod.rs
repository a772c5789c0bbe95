//! The store.
//!
//! A [`Store`] owns one immutable state value and one dispatcher. State
//! given at construction is converted to its immutable form; afterwards it
//! only changes through reducers, each of which replaces the whole value.

mod builder;
mod container;
mod definition;
mod error;

pub use builder::StoreBuilder;
pub use container::Store;
pub use definition::StoreDefinition;
pub use error::StoreError;
