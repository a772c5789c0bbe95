//! The immutable value model.
//!
//! Every collection reachable from a [`Value`] is one of four persistent
//! kinds backed by `im`, so cloning a value (or deriving a new one from it)
//! shares structure with the original instead of copying it.

use im::{HashSet, OrdMap, OrdSet, Vector};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Canonical symbolic key for immutable maps.
///
/// Textual keys are normalized to symbols when plain maps are converted, so
/// `"name"` and `:name` address the same entry.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Create a symbol with the given name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The symbol's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// A float with a total order, so values can live in sets and sorted sets.
///
/// Equality and ordering follow [`f64::total_cmp`]; hashing uses the bit
/// pattern, which agrees with that equality.
#[derive(Clone, Copy, Debug)]
pub struct Float(pub f64);

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Float {}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Float {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl From<f64> for Float {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Unordered set of unique values.
///
/// Iteration order is unspecified. Equality, ordering and hashing only look
/// at membership.
#[derive(Clone, Default)]
pub struct SetValue(HashSet<Value>);

impl SetValue {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(HashSet::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership test.
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    /// Members in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.0.iter()
    }

    /// Return a new set with `value` added, sharing structure with `self`.
    pub fn insert(&self, value: Value) -> Self {
        Self(self.0.update(value))
    }

    /// Members in ascending order.
    pub fn sorted(&self) -> Vec<&Value> {
        let mut members: Vec<&Value> = self.0.iter().collect();
        members.sort();
        members
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SetValue {}

impl PartialOrd for SetValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SetValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl Hash for SetValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: sum the member hashes.
        let combined = self.0.iter().fold(0u64, |acc, member| {
            let mut hasher = DefaultHasher::new();
            member.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl fmt::Debug for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sorted()).finish()
    }
}

impl FromIterator<Value> for SetValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Concrete kind of a [`Value`], used for dispatch and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    Symbol,
    Map,
    Sequence,
    Set,
    SortedSet,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Text => "Text",
            Self::Symbol => "Symbol",
            Self::Map => "Map",
            Self::Sequence => "Sequence",
            Self::Set => "Set",
            Self::SortedSet => "SortedSet",
        }
    }

    /// True for the four persistent collection kinds.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::Map | Self::Sequence | Self::Set | Self::SortedSet
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable, structurally-shared value.
///
/// Produced by [`from_plain`](crate::immutable::from_plain) or built
/// directly with the constructors below. Values are never mutated in place;
/// operations such as [`Value::merge`] return a new value.
///
/// # Example
///
/// ```rust
/// use stratum::immutable::Value;
///
/// let state = Value::map([("on", Value::from(false)), ("value", Value::Null)]);
/// let next = state.merge([("on", Value::from(true))]).unwrap();
///
/// assert_eq!(state.get("on"), Some(&Value::from(false)));
/// assert_eq!(next.get("on"), Some(&Value::from(true)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(Float),
    Text(Arc<str>),
    Symbol(Symbol),
    Map(OrdMap<Symbol, Value>),
    Sequence(Vector<Value>),
    Set(SetValue),
    SortedSet(OrdSet<Value>),
}

impl Value {
    /// Build a keyed map from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<Symbol>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// An empty keyed map.
    pub fn empty_map() -> Self {
        Self::Map(OrdMap::new())
    }

    /// Build an ordered sequence.
    pub fn sequence<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Sequence(items.into_iter().collect())
    }

    /// Build an unordered set. Duplicates collapse.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Build a set kept in ascending order.
    pub fn sorted_set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::SortedSet(items.into_iter().collect())
    }

    /// Frozen text.
    pub fn text(text: impl AsRef<str>) -> Self {
        Self::Text(Arc::from(text.as_ref()))
    }

    /// A symbol value.
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    /// The concrete kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Map(_) => ValueKind::Map,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Set(_) => ValueKind::Set,
            Self::SortedSet(_) => ValueKind::SortedSet,
        }
    }

    /// Kind name used in error messages, e.g. `"Text"`.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for maps, sequences, sets and sorted sets.
    pub fn is_collection(&self) -> bool {
        self.kind().is_collection()
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(value.0),
            _ => None,
        }
    }

    /// Numeric view of either an `Int` or a `Float`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(value.0),
            _ => None,
        }
    }

    /// The text, if this is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The symbol, if this is a `Symbol`.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// The entries, if this is a `Map`.
    pub fn as_map(&self) -> Option<&OrdMap<Symbol, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The items, if this is a `Sequence`.
    pub fn as_sequence(&self) -> Option<&Vector<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The members, if this is a `Set`.
    pub fn as_set(&self) -> Option<&SetValue> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// The members, if this is a `SortedSet`.
    pub fn as_sorted_set(&self) -> Option<&OrdSet<Value>> {
        match self {
            Self::SortedSet(items) => Some(items),
            _ => None,
        }
    }

    /// Look up `key` in a map. Returns `None` for a missing key or a
    /// non-map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Return a new map with `entries` written over this one.
    ///
    /// Returns `None` when `self` is not a map, which lets reducers decline
    /// to update with `?`.
    pub fn merge<K, I>(&self, entries: I) -> Option<Value>
    where
        K: Into<Symbol>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut map = self.as_map()?.clone();
        for (key, value) in entries {
            map.insert(key.into(), value);
        }
        Some(Self::Map(map))
    }

    /// Number of members for collections, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Map(map) => Some(map.len()),
            Self::Sequence(items) => Some(items.len()),
            Self::Set(items) => Some(items.len()),
            Self::SortedSet(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(Arc::from(value))
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
