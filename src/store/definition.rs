//! Type-level store definitions.

use crate::immutable::Plain;
use crate::reducer::ReducerTable;

/// Describes a kind of store: its default state and the reducers every
/// instance starts with.
///
/// Both hooks have defaults, so a definition only overrides what it needs.
/// Reducer tables from several units are combined with
/// [`ReducerTable::merge`] in the order they should apply.
///
/// # Example
///
/// ```rust
/// use stratum::dispatch::Action;
/// use stratum::immutable::{Plain, Value};
/// use stratum::reducer::ReducerTable;
/// use stratum::store::{Store, StoreDefinition};
///
/// struct Counter;
///
/// impl StoreDefinition for Counter {
///     fn default_initial_state() -> Plain {
///         Plain::map([("count", 0)])
///     }
///
///     fn reducers() -> ReducerTable {
///         ReducerTable::new().on("increment", |state, _| {
///             let count = state.get("count")?.as_int()?;
///             state.merge([("count", Value::from(count + 1))])
///         })
///     }
/// }
///
/// let store = Store::define::<Counter>(None).unwrap();
/// store.dispatch(&Action::new("increment")).unwrap();
/// assert_eq!(store.get("count"), Some(Value::from(1)));
/// ```
pub trait StoreDefinition {
    /// State used when a store is built without one.
    ///
    /// Default implementation returns an empty map.
    fn default_initial_state() -> Plain {
        Plain::empty_map()
    }

    /// Reducers subscribed when a store is built.
    ///
    /// Default implementation returns an empty table.
    fn reducers() -> ReducerTable {
        ReducerTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Action;
    use crate::immutable::Value;
    use crate::store::Store;

    struct Bare;

    impl StoreDefinition for Bare {}

    struct Lamp;

    impl StoreDefinition for Lamp {
        fn default_initial_state() -> Plain {
            Plain::map([("lit", false)])
        }

        fn reducers() -> ReducerTable {
            ReducerTable::new()
                .on("lamp.toggle", |state, _| {
                    let lit = state.get("lit")?.as_bool()?;
                    state.merge([("lit", Value::from(!lit))])
                })
                .on("lamp.noop", |_, _| None)
        }
    }

    #[test]
    fn default_definition_is_empty() {
        assert_eq!(Bare::default_initial_state(), Plain::empty_map());
        assert!(Bare::reducers().is_empty());

        let store = Store::define::<Bare>(None).unwrap();
        assert_eq!(store.state(), Value::empty_map());
    }

    #[test]
    fn definition_supplies_default_state_and_reducers() {
        let store = Store::define::<Lamp>(None).unwrap();
        assert_eq!(store.get("lit"), Some(Value::from(false)));

        store.dispatch(&Action::new("lamp.toggle")).unwrap();
        assert_eq!(store.get("lit"), Some(Value::from(true)));

        store.dispatch(&Action::new("lamp.noop")).unwrap();
        assert_eq!(store.get("lit"), Some(Value::from(true)));
    }

    #[test]
    fn explicit_initial_state_overrides_definition_default() {
        let store = Store::define::<Lamp>(Some(Plain::map([("lit", true)]))).unwrap();
        assert_eq!(store.get("lit"), Some(Value::from(true)));
    }
}
