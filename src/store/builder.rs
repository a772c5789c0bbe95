//! Builder for constructing stores.

use super::container::Store;
use super::definition::StoreDefinition;
use super::error::StoreError;
use crate::dispatch::Dispatcher;
use crate::immutable::{from_plain, Plain};
use crate::reducer::ReducerTable;
use tracing::debug;

/// Builder for constructing stores with a fluent API.
#[derive(Debug, Default)]
pub struct StoreBuilder {
    initial: Option<Plain>,
    default_state: Option<Plain>,
    dispatcher: Option<Dispatcher>,
    reducers: ReducerTable,
}

impl StoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a [`StoreDefinition`]'s default state and reducers.
    pub fn from_definition<D: StoreDefinition>() -> Self {
        Self::new()
            .default_state(D::default_initial_state())
            .reducers(D::reducers())
    }

    /// Set the initial state (optional). `Null` counts as absent.
    pub fn initial_state(mut self, state: impl Into<Plain>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub(crate) fn initial_state_opt(mut self, state: Option<Plain>) -> Self {
        self.initial = state;
        self
    }

    /// State used when no initial state is given (optional, defaults to an
    /// empty map).
    pub fn default_state(mut self, state: impl Into<Plain>) -> Self {
        self.default_state = Some(state.into());
        self
    }

    /// Use an existing dispatcher instead of creating one (optional).
    pub fn dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Add reducers after any already registered (optional, repeatable).
    pub fn reducers(mut self, reducers: ReducerTable) -> Self {
        self.reducers = self.reducers.merge(reducers);
        self
    }

    /// Build the store.
    ///
    /// Converts the chosen state to its immutable form, then subscribes each
    /// reducer in registration order.
    pub fn build(self) -> Result<Store, StoreError> {
        let plain = self
            .initial
            .filter(|state| !state.is_null())
            .or(self.default_state)
            .unwrap_or_else(Plain::empty_map);

        if !plain.is_map_like() {
            return Err(StoreError::InvalidInitialState {
                value: format!("{plain:?}"),
            });
        }

        let state = from_plain(plain)?;
        let store = Store::from_parts(state, self.dispatcher.unwrap_or_default());
        let reducer_count = self.reducers.len();
        for reducer in self.reducers {
            store.install_reducer(reducer)?;
        }

        debug!(
            reducers = reducer_count,
            listeners = store.dispatcher().len(),
            "store constructed"
        );
        Ok(store)
    }
}
