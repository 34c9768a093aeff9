//! Properties of record flattening.

use indexmap::IndexMap;
use proptest::prelude::*;
use rigging_config::{flatten, flatten_object};
use serde_json::json;

fn records() -> impl Strategy<Value = IndexMap<String, i64>> {
    proptest::collection::vec(("[a-zA-Z_]{1,8}", any::<i64>()), 0..32)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    #[test]
    fn sequences_match_record_length(record in records()) {
        let split = flatten(&record);
        prop_assert_eq!(split.keys().len(), record.len());
        prop_assert_eq!(split.values().len(), record.len());
    }

    #[test]
    fn every_key_maps_to_its_value(record in records()) {
        let split = flatten(&record);
        for (i, key) in split.keys().iter().enumerate() {
            prop_assert_eq!(record[key], split.values()[i]);
        }
    }

    #[test]
    fn order_follows_insertion(record in records()) {
        let split = flatten(&record);
        let expected: Vec<_> = record.keys().cloned().collect();
        prop_assert_eq!(split.keys(), expected.as_slice());
    }
}

#[test]
fn empty_object_flattens_to_empty_sequences() {
    let split = flatten_object(json!({}).as_object().unwrap());
    assert!(split.keys().is_empty());
    assert!(split.values().is_empty());
}

#[test]
fn two_entries_keep_insertion_order() {
    let value = json!({"a": 1, "b": 2});
    let (keys, values) = flatten_object(value.as_object().unwrap()).into_parts();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(values, [json!(1), json!(2)]);
}
