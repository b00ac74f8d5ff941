use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Value, json};

/// Which link of the fallback chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    FullText,
    Embedded,
    RawFallback,
}

/// Greedy spans tried in order: whichever bracket opens first, then the
/// object span alone, then the array span alone.
fn embedded_json_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(\{[\s\S]*\}|\[[\s\S]*\])",
            r"\{[\s\S]*\}",
            r"\[[\s\S]*\]",
        ]
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("embedded JSON pattern is valid"))
        .collect()
    })
}

/// Best-effort conversion of model text into a structured value.
///
/// Tries the whole text as JSON, then the greedy object/array span inside
/// it, and finally wraps the untouched text as `{"raw": text}`. Never fails.
pub fn recover(text: &str) -> (Value, RecoveryStep) {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return (value, RecoveryStep::FullText);
    }

    let embedded = embedded_json_patterns()
        .iter()
        .filter_map(|pattern| pattern.find(text))
        .find_map(|found| serde_json::from_str::<Value>(found.as_str()).ok());
    if let Some(value) = embedded {
        return (value, RecoveryStep::Embedded);
    }

    (json!({ "raw": text }), RecoveryStep::RawFallback)
}
