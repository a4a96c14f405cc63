use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field of the evaluation payload holding the batch score
pub const AGGREGATE_SCORE_FIELD: &str = "average_final_score";

/// Evaluation payload, kept opaque apart from the aggregate score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationResult(pub Value);

impl EvaluationResult {
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// True for the failure payload (`{}`, `null` or `[]`)
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn aggregate_score(&self) -> Option<f64> {
        self.0.get(AGGREGATE_SCORE_FIELD).and_then(Value::as_f64)
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl Default for EvaluationResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Response of `GET /profiles/count`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCountResponse {
    #[serde(default)]
    pub count: u64,
}

/// Response of `GET /profiles/sample`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleProfilesResponse {
    #[serde(default)]
    pub profiles: Vec<Value>,
}

impl SampleProfilesResponse {
    /// Identifiers of the sampled profiles, skipping entries without `_id`
    pub fn ids(&self) -> Vec<String> {
        self.profiles
            .iter()
            .filter_map(|p| p.get("_id").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the service on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aggregate_score() {
        let result = EvaluationResult(json!({"average_final_score": 0.82, "per_candidate": []}));
        assert_eq!(result.aggregate_score(), Some(0.82));
        assert!(!result.is_empty());

        let result = EvaluationResult(json!({"average_final_score": "n/a"}));
        assert_eq!(result.aggregate_score(), None);
    }

    #[test]
    fn test_empty_payload() {
        assert!(EvaluationResult::empty().is_empty());
        assert!(EvaluationResult(Value::Null).is_empty());
        assert_eq!(EvaluationResult::empty().aggregate_score(), None);
    }

    #[test]
    fn test_sample_ids_skip_missing() {
        let sample: SampleProfilesResponse = serde_json::from_value(json!({
            "profiles": [{"_id": "1"}, {"name": "no id"}, {"_id": "2"}]
        }))
        .unwrap();
        assert_eq!(sample.ids(), vec!["1", "2"]);
    }
}
