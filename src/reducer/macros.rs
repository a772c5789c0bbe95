//! Declarative reducer registration.

/// Build a [`ReducerTable`](crate::reducer::ReducerTable) from
/// `action type => transform` pairs, in declaration order.
///
/// Transforms are closures or functions of the form
/// `fn(&Value, &Action) -> Option<Value>`.
///
/// # Example
///
/// ```
/// use stratum::dispatch::Action;
/// use stratum::immutable::Value;
/// use stratum::reducers;
///
/// fn turn_on(state: &Value, _action: &Action) -> Option<Value> {
///     state.merge([("on", Value::from(true)), ("value", Value::from(0))])
/// }
///
/// let table = reducers! {
///     "power.on" => turn_on,
///     "power.off" => |state, _| state.merge([("on", Value::from(false)), ("value", Value::Null)]),
/// };
///
/// assert_eq!(table.len(), 2);
/// ```
#[macro_export]
macro_rules! reducers {
    ($($action_type:expr => $transform:expr),* $(,)?) => {
        $crate::reducer::ReducerTable::new()
            $(.on($action_type, $transform))*
    };
}
