use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Query, SearchConfig};

/// Body of `POST /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a Query,
    pub config: &'a SearchConfig,
}

/// Body of `POST /evaluate`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EvaluationRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "configPath", alias = "config_path")]
    pub config_path: String,
    #[validate(length(min = 1))]
    #[serde(rename = "candidateIds", alias = "object_ids")]
    pub candidate_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_evaluation_request_wire_names() {
        let request = EvaluationRequest {
            config_path: "radiology.yml".to_string(),
            candidate_ids: vec!["a".to_string(), "b".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"configPath": "radiology.yml", "candidateIds": ["a", "b"]})
        );
    }

    #[test]
    fn test_evaluation_request_reads_legacy_names() {
        let request: EvaluationRequest =
            serde_json::from_value(json!({"config_path": "x.yml", "object_ids": ["1"]})).unwrap();
        assert_eq!(request.config_path, "x.yml");
        assert_eq!(request.candidate_ids, vec!["1"]);
    }

    #[test]
    fn test_empty_candidate_list_is_invalid() {
        let request = EvaluationRequest {
            config_path: "x.yml".to_string(),
            candidate_ids: vec![],
        };
        assert!(request.validate().is_err());
    }
}
