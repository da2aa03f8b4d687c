use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Validated inbound request. Coordinates and date keep the caller's spelling (`35.0` stays
/// `35.0`, `2024-6-5` stays `2024-6-5`) since both are echoed into prompt and fallback text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub latitude: Number,
    pub longitude: Number,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub link: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub lunch_restaurants: Vec<Restaurant>,
    pub dinner_restaurants: Vec<Restaurant>,
}

impl RecommendationResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Response body. Model output is passed through untouched once its two top-level keys are
/// confirmed; everything else is one of our own typed results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecommendationPayload {
    Model(serde_json::Map<String, serde_json::Value>),
    Static(RecommendationResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// The model answered with a well-formed result.
    Model,
    /// The model answered but nothing usable could be extracted.
    Empty,
    /// The model call itself failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationOutcome {
    pub source: RecommendationSource,
    pub payload: RecommendationPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_result_keeps_both_keys() {
        let value = serde_json::to_value(RecommendationResult::empty()).unwrap();
        assert_eq!(
            value,
            json!({"lunch_restaurants": [], "dinner_restaurants": []})
        );
    }

    #[test]
    fn model_payload_keeps_key_order() {
        let map = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(
            r#"{"lunch_restaurants":[],"dinner_restaurants":[]}"#,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_string(&RecommendationPayload::Model(map)).unwrap(),
            r#"{"lunch_restaurants":[],"dinner_restaurants":[]}"#
        );
    }

    #[test]
    fn model_payload_serializes_as_plain_object() {
        let map = json!({"lunch_restaurants": [], "dinner_restaurants": [], "note": "extra"})
            .as_object()
            .cloned()
            .unwrap();
        let value = serde_json::to_value(RecommendationPayload::Model(map)).unwrap();
        assert_eq!(value["note"], "extra");
    }
}
