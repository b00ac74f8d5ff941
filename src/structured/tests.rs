use serde_json::{Value, json};

use super::{RecoveryStep, amount, is_blank, pretty, recover, scalar_text, section};

fn recover_json(text: &str) -> Value {
    recover(text).0
}

#[test]
fn valid_json_round_trips() {
    let samples = [
        r#"{"score": 9, "intent": "hot"}"#,
        r#"[1, 2, {"a": null}]"#,
        "  {\"nested\": {\"list\": [true, false]}}\n",
        "42",
        "\"just a string\"",
    ];

    for sample in samples {
        let direct: Value = serde_json::from_str(sample).unwrap();
        let (recovered, step) = recover(sample);
        assert_eq!(recovered, direct, "sample: {sample}");
        assert_eq!(step, RecoveryStep::FullText);
    }
}

#[test]
fn object_inside_prose_is_extracted() {
    let text = "Here is the plan you asked for: {\"name\": \"Desk Kit\", \"price\": 27} Let me know!";
    let (value, step) = recover(text);

    assert_eq!(value, json!({"name": "Desk Kit", "price": 27}));
    assert_eq!(step, RecoveryStep::Embedded);
}

#[test]
fn bracketed_prose_before_object_is_skipped() {
    let text = "Here is the plan for [desk toys]: {\"a\": 1}";
    let (value, step) = recover(text);

    assert_eq!(value, json!({"a": 1}));
    assert_eq!(step, RecoveryStep::Embedded);
}

#[test]
fn braced_prose_before_array_is_skipped() {
    let text = "Use {niche} here: [\"@alice\"]";
    assert_eq!(recover_json(text), json!(["@alice"]));
}

#[test]
fn array_inside_prose_is_extracted() {
    let text = "Leads follow:\n[\"@alice\", \"@bob\"]\nThat's all.";
    assert_eq!(recover_json(text), json!(["@alice", "@bob"]));
}

#[test]
fn fenced_json_is_unwrapped() {
    let text = "Sure! ```json\n{\"score\": 9, \"intent\": \"hot\"}\n```";
    let value = recover_json(text);

    assert_eq!(value["score"], 9);
    assert_eq!(value["intent"], "hot");
    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn plain_prose_falls_back_to_raw_wrapper() {
    let text = "I'm sorry, I can't produce that right now.";
    let (value, step) = recover(text);

    assert_eq!(step, RecoveryStep::RawFallback);
    assert_eq!(value, json!({ "raw": text }));
}

#[test]
fn raw_wrapper_preserves_text_exactly() {
    let text = "  leading space, a { stray brace and\ttabs\n";
    let value = recover_json(text);

    let map = value.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["raw"], Value::String(text.to_string()));
}

#[test]
fn empty_text_falls_back_to_raw_wrapper() {
    assert_eq!(recover_json(""), json!({ "raw": "" }));
}

#[test]
fn greedy_span_over_two_objects_falls_back() {
    // The span runs from the first `{` to the last `}`, swallowing the prose
    // between the two objects, so it does not parse.
    let text = "first {\"a\": 1} and then {\"b\": 2}";
    let (value, step) = recover(text);

    assert_eq!(step, RecoveryStep::RawFallback);
    assert_eq!(value["raw"], text);
}

#[test]
fn section_defaults_to_empty_mapping() {
    let research = json!({"audience": {"persona": {"name": "Dev Dana"}}});

    assert_eq!(section(&research, "audience")["persona"]["name"], "Dev Dana");
    assert_eq!(section(&research, "competitors"), json!({}));
    assert_eq!(section(&json!("not a map"), "audience"), json!({}));
}

#[test]
fn pretty_uses_two_space_indent() {
    let rendered = pretty(&json!({"a": [1]}));
    assert_eq!(rendered, "{\n  \"a\": [\n    1\n  ]\n}");
}

#[test]
fn scalar_text_renders_scalars_and_defaults_the_rest() {
    assert_eq!(scalar_text(Some(&json!(27)), "0"), "27");
    assert_eq!(scalar_text(Some(&json!("$19")), "0"), "$19");
    assert_eq!(scalar_text(Some(&json!(true)), "0"), "true");
    assert_eq!(scalar_text(Some(&json!([1])), "none"), "none");
    assert_eq!(scalar_text(None, "27"), "27");
}

#[test]
fn amount_parses_numbers_and_price_strings() {
    assert_eq!(amount(Some(&json!(12.5))), Some(12.5));
    assert_eq!(amount(Some(&json!("27"))), Some(27.0));
    assert_eq!(amount(Some(&json!(" $9.99 "))), Some(9.99));
    assert_eq!(amount(Some(&json!("free"))), None);
    assert_eq!(amount(Some(&Value::Null)), None);
    assert_eq!(amount(None), None);
}

#[test]
fn blank_matches_empty_containers_and_falsy_scalars() {
    assert!(is_blank(None));
    assert!(is_blank(Some(&json!({}))));
    assert!(is_blank(Some(&json!([]))));
    assert!(is_blank(Some(&json!(""))));
    assert!(!is_blank(Some(&json!({"raw": "text"}))));
    assert!(!is_blank(Some(&json!(["#tag"]))));
}
