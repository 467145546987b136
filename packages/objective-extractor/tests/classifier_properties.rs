//! Property tests for classifier reply parsing.

use objective_extractor::{parse_classification, ExtractionResult};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Randomly re-case every ASCII letter of the sentinel.
fn recased_sentinel() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), 17).prop_map(|upper| {
        "Objective not met"
            .chars()
            .zip(upper)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect()
    })
}

fn whitespace() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

/// Small flat JSON objects with string and integer values.
fn data_object() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map("[a-z]{1,8}", prop_oneof![
        "[a-zA-Z0-9@. ]{0,16}".prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
    ], 0..5)
    .prop_map(|map| Value::Object(map.into_iter().collect()))
}

proptest! {
    #[test]
    fn sentinel_is_not_found_in_any_casing(
        sentinel in recased_sentinel(),
        lead in whitespace(),
        trail in whitespace(),
    ) {
        let reply = format!("{}{}{}", lead, sentinel, trail);
        prop_assert_eq!(parse_classification(&reply).unwrap(), ExtractionResult::NotFound);
    }

    #[test]
    fn think_spans_are_ignored(
        data in data_object(),
        thought in "[a-zA-Z .\n]{0,40}",
    ) {
        let body = json!({"found": true, "data": data}).to_string();
        let plain = parse_classification(&body).unwrap();
        let with_thought = parse_classification(&format!("<think>{}</think>{}", thought, body)).unwrap();
        prop_assert_eq!(plain, with_thought);
    }

    #[test]
    fn fenced_equals_unfenced(data in data_object(), tagged in any::<bool>()) {
        let body = json!({"found": true, "data": data}).to_string();
        let fence = if tagged { "```json" } else { "```" };
        let fenced = format!("{}\n{}\n```", fence, body);
        prop_assert_eq!(
            parse_classification(&fenced).unwrap(),
            parse_classification(&body).unwrap()
        );
    }

    #[test]
    fn found_true_preserves_data(data in data_object()) {
        let body = json!({"found": true, "data": data.clone()}).to_string();
        prop_assert_eq!(parse_classification(&body).unwrap(), ExtractionResult::Found(data));
    }

    #[test]
    fn found_false_is_not_found(data in data_object()) {
        let body = json!({"found": false, "data": data}).to_string();
        prop_assert_eq!(parse_classification(&body).unwrap(), ExtractionResult::NotFound);
    }
}
