use serde_json::{Map, Value};

/// Returns `value[key]`, or an empty mapping when the key (or the mapping
/// itself) is absent. Used wherever a prompt embeds an upstream section.
pub fn section(value: &Value, key: &str) -> Value {
    value
        .get(key)
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Two-space indented JSON, the form upstream results take inside prompts.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Renders a scalar for display: strings verbatim, numbers and booleans via
/// their JSON form. Missing, null and compound values fall back to `default`.
pub fn scalar_text(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => default.to_string(),
    }
}

/// Parses a price-like value: numbers directly, strings after trimming a
/// leading currency sign.
pub fn amount(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().trim_start_matches('$').trim().parse().ok(),
        _ => None,
    }
}

/// Absent, null, `false`, zero, or an empty string/sequence/mapping.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => !flag,
        Some(Value::Number(number)) => number.as_f64() == Some(0.0),
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
    }
}
