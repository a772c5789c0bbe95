//! Reducer composition.
//!
//! Reducers are pure `(state, action) -> new state` transforms registered
//! against an action type. Reducer-bearing units expose a [`ReducerTable`];
//! a store merges the tables it is built with and subscribes every entry as
//! a type-filtered listener.

pub mod macros;
mod table;

pub use table::{Reducer, ReducerTable, Transform};
