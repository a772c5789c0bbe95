//! Deep conversion between plain and immutable values.

use super::error::ConversionError;
use super::plain::Plain;
use super::value::{SetValue, Symbol, Value};
use im::{OrdMap, Vector};
use std::sync::Arc;

/// Recursively convert a plain value into its immutable form.
///
/// Text is copied and frozen, lists become sequences, sets become sets and
/// maps become symbol-keyed maps. Already-immutable values pass through
/// unchanged. Text and symbol keys that name the same symbol collapse into
/// one entry.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidKey`] when a map key, at any depth, is
/// neither text nor a symbol.
///
/// # Example
///
/// ```rust
/// use stratum::immutable::{from_plain, Plain, Value};
///
/// let plain = Plain::map([("polearms", Plain::list(["halberd", "pike"]))]);
/// let value = from_plain(plain).unwrap();
///
/// assert_eq!(
///     value.get("polearms"),
///     Some(&Value::sequence([Value::from("halberd"), Value::from("pike")]))
/// );
/// ```
pub fn from_plain(plain: Plain) -> Result<Value, ConversionError> {
    let value = match plain {
        Plain::Null => Value::Null,
        Plain::Bool(value) => Value::Bool(value),
        Plain::Int(value) => Value::Int(value),
        Plain::Float(value) => Value::Float(value),
        Plain::Text(text) => Value::Text(Arc::from(text.as_str())),
        Plain::Symbol(symbol) => Value::Symbol(symbol),
        Plain::List(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_plain)
                .collect::<Result<Vector<_>, _>>()?,
        ),
        Plain::Map(entries) => {
            let mut map = OrdMap::new();
            for (key, value) in entries {
                map.insert(canonical_key(key)?, from_plain(value)?);
            }
            Value::Map(map)
        }
        Plain::Set(items) => Value::Set(
            items
                .into_iter()
                .map(from_plain)
                .collect::<Result<SetValue, _>>()?,
        ),
        Plain::Frozen(value) => value,
    };
    Ok(value)
}

/// Recursively unwrap an immutable value into plain collections.
///
/// Maps come back with symbol keys, sequences as lists, and both set kinds
/// as plain sets. Scalars are unchanged.
pub fn to_plain(value: &Value) -> Plain {
    match value {
        Value::Null => Plain::Null,
        Value::Bool(value) => Plain::Bool(*value),
        Value::Int(value) => Plain::Int(*value),
        Value::Float(value) => Plain::Float(*value),
        Value::Text(text) => Plain::Text(text.to_string()),
        Value::Symbol(symbol) => Plain::Symbol(symbol.clone()),
        Value::Map(map) => Plain::Map(
            map.iter()
                .map(|(key, value)| (Plain::Symbol(key.clone()), to_plain(value)))
                .collect(),
        ),
        Value::Sequence(items) => Plain::List(items.iter().map(to_plain).collect()),
        Value::Set(items) => Plain::Set(items.iter().map(to_plain).collect()),
        Value::SortedSet(items) => Plain::Set(items.iter().map(to_plain).collect()),
    }
}

fn canonical_key(key: Plain) -> Result<Symbol, ConversionError> {
    match key {
        Plain::Text(text) => Ok(Symbol::from(text)),
        Plain::Symbol(symbol) | Plain::Frozen(Value::Symbol(symbol)) => Ok(symbol),
        Plain::Frozen(Value::Text(text)) => Ok(Symbol::new(text)),
        other => Err(ConversionError::InvalidKey {
            type_name: other.type_name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapons() -> Plain {
        Plain::map([
            ("bows", Plain::set(["crossbow", "longbow", "shortbow"])),
            ("polearms", Plain::list(["halberd", "pike", "spear"])),
            (
                "swords",
                Plain::map([("japanese", Plain::set(["shoto", "daito", "tachi"]))]),
            ),
        ])
    }

    fn texts(items: &[&str]) -> Vec<Value> {
        items.iter().map(|item| Value::from(*item)).collect()
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(from_plain(Plain::Null), Ok(Value::Null));
        assert_eq!(from_plain(Plain::from(3)), Ok(Value::Int(3)));
        assert_eq!(from_plain(Plain::from(5.0)), Ok(Value::from(5.0)));
        assert_eq!(
            from_plain(Plain::symbol("high")),
            Ok(Value::symbol("high"))
        );
    }

    #[test]
    fn text_is_frozen_copy() {
        let value = from_plain(Plain::from("string")).unwrap();
        assert_eq!(value.as_text(), Some("string"));
    }

    #[test]
    fn empty_collections_keep_their_kind() {
        assert_eq!(
            from_plain(Plain::list(Vec::<Plain>::new())),
            Ok(Value::sequence([]))
        );
        assert_eq!(from_plain(Plain::empty_map()), Ok(Value::empty_map()));
        assert_eq!(
            from_plain(Plain::set(Vec::<Plain>::new())),
            Ok(Value::set([]))
        );
    }

    #[test]
    fn text_keys_become_symbols() {
        let plain = Plain::map([("english", "shortsword"), ("german", "einhänder")]);
        let value = from_plain(plain).unwrap();

        let keys: Vec<&str> = value.as_map().unwrap().keys().map(Symbol::as_str).collect();
        assert_eq!(keys, vec!["english", "german"]);
        assert_eq!(value.get("german"), Some(&Value::from("einhänder")));
    }

    #[test]
    fn nested_collections_convert_recursively() {
        let value = from_plain(weapons()).unwrap();

        let expected = Value::map([
            (
                "bows",
                Value::set(texts(&["crossbow", "longbow", "shortbow"])),
            ),
            (
                "polearms",
                Value::sequence(texts(&["halberd", "pike", "spear"])),
            ),
            (
                "swords",
                Value::map([("japanese", Value::set(texts(&["shoto", "daito", "tachi"])))]),
            ),
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn sets_of_maps_convert_members() {
        let plain = Plain::set([
            Plain::map([("name", "fireball")]),
            Plain::map([("name", "magic missile")]),
        ]);
        let value = from_plain(plain).unwrap();

        let set = value.as_set().unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Value::map([("name", Value::from("fireball"))])));
    }

    #[test]
    fn invalid_keys_are_rejected_at_depth() {
        let plain = Plain::map([(
            "outer",
            Plain::map([(Plain::from(1), Plain::from("one"))]),
        )]);

        let err = from_plain(plain).unwrap_err();
        assert_eq!(err, ConversionError::InvalidKey { type_name: "Int" });
        assert_eq!(err.to_string(), "Int is not a recognized plain key type");
    }

    #[test]
    fn frozen_values_pass_through() {
        let frozen = Value::sorted_set([Value::from(2), Value::from(1)]);
        assert_eq!(from_plain(Plain::from(frozen.clone())), Ok(frozen));
    }

    #[test]
    fn text_and_symbol_keys_collapse() {
        let plain = Plain::map([
            (Plain::from("name"), Plain::from(1)),
            (Plain::symbol("name"), Plain::from(2)),
        ]);
        let value = from_plain(plain).unwrap();
        assert_eq!(value.len(), Some(1));
    }

    #[test]
    fn to_plain_restores_collection_kinds() {
        let value = from_plain(weapons()).unwrap();
        let plain = to_plain(&value);

        assert!(matches!(plain.get("bows"), Some(Plain::Set(_))));
        assert!(matches!(plain.get("polearms"), Some(Plain::List(_))));
        assert!(matches!(plain.get("swords"), Some(Plain::Map(_))));
        assert_eq!(
            plain.get("polearms"),
            Some(&Plain::list(["halberd", "pike", "spear"]))
        );
    }

    #[test]
    fn to_plain_turns_sorted_sets_into_sets() {
        let value = Value::sorted_set([Value::from(3), Value::from(1)]);
        assert_eq!(to_plain(&value), Plain::set([1, 3]));
    }
}
