//! Flattening of ordered records into parallel key/value sequences.
//!
//! A record is an insertion-ordered map with string keys. Flattening it
//! yields two sequences of equal length where `keys[i]` maps to `values[i]`.
//! Only entries actually inserted into the map participate, and keys are
//! compared as raw strings (no case folding or Unicode normalization).
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use rigging_config::record::flatten;
//!
//! let mut record = IndexMap::new();
//! record.insert("a".to_string(), 1);
//! record.insert("b".to_string(), 2);
//!
//! let split = flatten(&record);
//! assert_eq!(split.keys(), ["a", "b"]);
//! assert_eq!(split.values(), [1, 2]);
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Insertion-ordered mapping from string keys to values.
pub type Record<V = Value> = IndexMap<String, V>;

/// Two order-correlated sequences produced by [`flatten`].
///
/// The split owns its data; it never aliases the record it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValueSplit<V = Value> {
    keys: Vec<String>,
    values: Vec<V>,
}

impl<V> KeyValueSplit<V> {
    fn from_entries<'a, I>(entries: I) -> Self
    where
        I: ExactSizeIterator<Item = (&'a String, &'a V)>,
        V: Clone + 'a,
    {
        let mut keys = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            keys.push(key.clone());
            values.push(value.clone());
        }
        Self { keys, values }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate `(key, value)` pairs in the original enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<V>) {
        (self.keys, self.values)
    }
}

/// Split a record into its keys and values, preserving insertion order.
pub fn flatten<V: Clone>(record: &IndexMap<String, V>) -> KeyValueSplit<V> {
    KeyValueSplit::from_entries(record.iter())
}

/// Split a JSON object into its keys and values.
///
/// Objects keep insertion order because `serde_json` is built with
/// `preserve_order` in this workspace.
pub fn flatten_object(object: &Map<String, Value>) -> KeyValueSplit<Value> {
    KeyValueSplit::from_entries(object.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_yields_empty_sequences() {
        let record: Record<i32> = IndexMap::new();
        let split = flatten(&record);
        assert!(split.is_empty());
        assert!(split.keys().is_empty());
        assert!(split.values().is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut record = IndexMap::new();
        record.insert("b".to_string(), 2);
        record.insert("a".to_string(), 1);

        let split = flatten(&record);
        assert_eq!(split.keys(), ["b", "a"]);
        assert_eq!(split.values(), [2, 1]);
    }

    #[test]
    fn keys_are_not_normalized() {
        let mut record = IndexMap::new();
        record.insert("Key".to_string(), 1);
        record.insert("key".to_string(), 2);

        let split = flatten(&record);
        assert_eq!(split.len(), 2);
        assert_eq!(split.keys(), ["Key", "key"]);
    }

    #[test]
    fn does_not_alias_the_record() {
        let mut record = IndexMap::new();
        record.insert("a".to_string(), vec![1]);

        let split = flatten(&record);
        record.get_mut("a").unwrap().push(2);

        assert_eq!(split.values()[0], vec![1]);
    }

    #[test]
    fn flatten_object_follows_json_order() {
        let value = json!({"zeta": 1, "alpha": {"nested": true}, "mid": "x"});
        let split = flatten_object(value.as_object().unwrap());

        assert_eq!(split.keys(), ["zeta", "alpha", "mid"]);
        assert_eq!(split.values()[1], json!({"nested": true}));
    }

    #[test]
    fn iter_pairs_keys_with_values() {
        let value = json!({"a": 1, "b": 2});
        let split = flatten_object(value.as_object().unwrap());
        let pairs: Vec<_> = split.iter().collect();
        assert_eq!(pairs, vec![("a", &json!(1)), ("b", &json!(2))]);
    }

    #[test]
    fn serializes_as_keys_and_values() {
        let value = json!({"a": 1, "b": 2});
        let split = flatten_object(value.as_object().unwrap());
        assert_eq!(
            serde_json::to_value(&split).unwrap(),
            json!({"keys": ["a", "b"], "values": [1, 2]})
        );
    }
}
