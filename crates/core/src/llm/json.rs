use serde_json::{Map, Value};
use std::fmt;

pub const LUNCH_KEY: &str = "lunch_restaurants";
pub const DINNER_KEY: &str = "dinner_restaurants";

/// Why a model answer yielded no recommendations. Not an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    NoJsonObject,
    InvalidJson(String),
    MissingKey(&'static str),
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoJsonObject => f.write_str("no '{' ... '}' span in model output"),
            Self::InvalidJson(err) => write!(f, "model output is not valid JSON: {err}"),
            Self::MissingKey(key) => write!(f, "model output is missing key {key}"),
        }
    }
}

/// Slice from the first '{' to the last '}' (inclusive). Not brace-balance aware.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses the embedded object and checks both top-level keys. Item contents are not inspected.
pub fn extract_recommendations(text: &str) -> Result<Map<String, Value>, ExtractionFailure> {
    let json_str = extract_json(text).ok_or(ExtractionFailure::NoJsonObject)?;
    let parsed = serde_json::from_str::<Map<String, Value>>(json_str)
        .map_err(|e| ExtractionFailure::InvalidJson(e.to_string()))?;

    for key in [LUNCH_KEY, DINNER_KEY] {
        if !parsed.contains_key(key) {
            return Err(ExtractionFailure::MissingKey(key));
        }
    }
    Ok(parsed)
}
