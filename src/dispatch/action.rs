//! Actions: tagged records delivered to listeners.

use super::error::ActionError;
use crate::immutable::{from_plain, Plain, Symbol, Value};
use im::OrdMap;
use std::fmt;
use std::sync::Arc;

/// Discriminator carried by every action. Compared by value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionType(Arc<str>);

impl ActionType {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ActionType {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&ActionType> for ActionType {
    fn from(action_type: &ActionType) -> Self {
        action_type.clone()
    }
}

/// An immutable tagged record: a `type` plus opaque payload fields.
///
/// # Example
///
/// ```rust
/// use stratum::dispatch::Action;
/// use stratum::immutable::Value;
///
/// let action = Action::new("op.add").with("amount", 5);
///
/// assert_eq!(action.action_type().as_str(), "op.add");
/// assert_eq!(action.get("amount"), Some(&Value::from(5)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    action_type: ActionType,
    fields: OrdMap<Symbol, Value>,
}

impl Action {
    pub fn new(action_type: impl Into<ActionType>) -> Self {
        Self {
            action_type: action_type.into(),
            fields: OrdMap::new(),
        }
    }

    /// Add a payload field. The `type` discriminator is kept separately and
    /// cannot be overwritten here.
    pub fn with(mut self, field: impl Into<Symbol>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Build an action from a plain record, discovering its `type` field.
    ///
    /// The type may be text or a symbol; the remaining fields are converted
    /// to immutable values.
    pub fn from_plain(record: Plain) -> Result<Self, ActionError> {
        let mut fields = match from_plain(record)? {
            Value::Map(fields) => fields,
            other => {
                return Err(ActionError::NotARecord {
                    type_name: other.type_name(),
                })
            }
        };
        let action_type = match fields.remove("type") {
            Some(Value::Text(name)) => ActionType(name),
            Some(Value::Symbol(symbol)) => ActionType::new(symbol.as_str()),
            Some(other) => {
                return Err(ActionError::InvalidType {
                    type_name: other.type_name(),
                })
            }
            None => return Err(ActionError::MissingType),
        };

        Ok(Self {
            action_type,
            fields,
        })
    }

    /// The action's type discriminator.
    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// A payload field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All payload fields, without `type`.
    pub fn fields(&self) -> &OrdMap<Symbol, Value> {
        &self.fields
    }

    /// The whole record as an immutable map, `type` included.
    pub fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert(Symbol::from("type"), Value::text(self.action_type.as_str()));
        Value::Map(fields)
    }
}
