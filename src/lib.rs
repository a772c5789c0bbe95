//! Stratum: a minimal unidirectional state store
//!
//! Application state lives in one immutable, structurally-shared value. The
//! only way to change it is to dispatch an action: reducers registered for
//! that action's type each produce a replacement state, and listeners are
//! notified in the order they subscribed.
//!
//! # Core Concepts
//!
//! - **Immutable values**: [`immutable::from_plain`] deep-converts plain
//!   nested data into persistent maps, sequences and sets, and
//!   [`immutable::to_plain`] converts back
//! - **Dispatcher**: ordered delivery of [`dispatch::Action`]s, with nested
//!   dispatch allowed and mid-pass subscription rejected
//! - **Reducers**: ordered [`reducer::ReducerTable`]s, composable with
//!   [`reducer::ReducerTable::merge`]
//! - **Store**: one state value plus one dispatcher, built with
//!   [`store::StoreBuilder`]
//!
//! # Example
//!
//! ```rust
//! use stratum::dispatch::Action;
//! use stratum::immutable::{Plain, Value};
//! use stratum::reducer::ReducerTable;
//! use stratum::store::Store;
//!
//! let power = ReducerTable::new()
//!     .on("power.on", |state, _| state.merge([("on", Value::from(true)), ("value", Value::from(0))]));
//! let counter = ReducerTable::new().on("op.add", |state, action| {
//!     let value = state.get("value")?.as_int()?;
//!     let amount = action.get("amount")?.as_int()?;
//!     state.merge([("value", Value::from(value + amount))])
//! });
//!
//! let store = Store::builder()
//!     .initial_state(Plain::map([("on", Plain::Bool(false)), ("value", Plain::Null)]))
//!     .reducers(power.merge(counter))
//!     .build()?;
//!
//! store.dispatch(&Action::new("power.on"))?;
//! store.dispatch(&Action::new("op.add").with("amount", 5))?;
//!
//! assert_eq!(store.get("on"), Some(Value::from(true)));
//! assert_eq!(store.dig(&stratum::path!["value"])?, Some(Value::from(5)));
//! # Ok::<(), stratum::Error>(())
//! ```

pub mod dispatch;
pub mod error;
pub mod immutable;
pub mod reducer;
pub mod store;

// Re-export commonly used types
pub use dispatch::{Action, ActionType, BoxError, DispatchError, Dispatcher, Listener};
pub use error::Error;
pub use immutable::{dig, from_plain, to_plain, PathSegment, Plain, Value};
pub use reducer::ReducerTable;
pub use store::{Store, StoreBuilder, StoreDefinition, StoreError};
