//! Plain, mutable-side values.
//!
//! A [`Plain`] is what callers hand to the engine before conversion and what
//! they get back from [`to_plain`](crate::immutable::to_plain). Map keys may
//! be any plain value so that keys which cannot be canonicalized are still
//! representable and rejected during conversion.

use super::value::{Float, Symbol, Value};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Plain {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(Float),
    /// Mutable text. Copied and frozen on conversion.
    Text(String),
    Symbol(Symbol),
    List(Vec<Plain>),
    Map(BTreeMap<Plain, Plain>),
    Set(BTreeSet<Plain>),
    /// A value that is already immutable; conversion passes it through.
    Frozen(Value),
}

impl Plain {
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Plain>,
        V: Into<Plain>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    pub fn list<T: Into<Plain>, I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn set<T: Into<Plain>, I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Text(_) => "Text",
            Self::Symbol(_) => "Symbol",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Set(_) => "Set",
            Self::Frozen(value) => value.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for plain maps and for already-immutable maps.
    pub fn is_map_like(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Frozen(Value::Map(_)))
    }

    pub fn get(&self, key: &str) -> Option<&Plain> {
        match self {
            Self::Map(map) => map
                .get(&Plain::Symbol(Symbol::from(key)))
                .or_else(|| map.get(&Plain::Text(key.to_string()))),
            _ => None,
        }
    }
}

impl From<bool> for Plain {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Plain {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Plain {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Plain {
    fn from(value: f64) -> Self {
        Self::Float(Float(value))
    }
}

impl From<&str> for Plain {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Plain {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Symbol> for Plain {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Value> for Plain {
    fn from(value: Value) -> Self {
        Self::Frozen(value)
    }
}

impl<T: Into<Plain>> From<Option<T>> for Plain {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Plain {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::Null,
            Json::Bool(value) => Self::Bool(value),
            Json::Number(number) => match number.as_i64() {
                Some(int) => Self::Int(int),
                None => Self::Float(Float(number.as_f64().unwrap_or(f64::NAN))),
            },
            Json::String(text) => Self::Text(text),
            Json::Array(items) => Self::List(items.into_iter().map(Plain::from).collect()),
            Json::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (Self::Text(key), Plain::from(value)))
                    .collect(),
            ),
        }
    }
}
