use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// A candidate search query as understood by the search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Query {
    #[validate(length(min = 1))]
    pub id: String,
    pub name: String,
    #[serde(rename = "naturalLanguage", alias = "natural_language")]
    pub natural_language: String,
    #[serde(rename = "hardCriteria", alias = "hard_criteria", default)]
    pub hard_criteria: Vec<String>,
    #[serde(rename = "softCriteria", alias = "soft_criteria", default)]
    pub soft_criteria: Vec<String>,
    /// Named evaluation configuration, e.g. `tax_lawyer.yml`
    #[validate(length(min = 1))]
    #[serde(rename = "configPath", alias = "config_path")]
    pub config_path: String,
}

/// Ranking options forwarded to the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SearchConfig {
    #[serde(rename = "useSemanticSearch", alias = "use_semantic_search", default = "default_true")]
    pub use_semantic_search: bool,
    #[serde(rename = "useHardFiltering", alias = "use_hard_filtering", default)]
    pub use_hard_filtering: bool,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(rename = "softCriteriaWeight", alias = "soft_criteria_weight", default = "default_soft_weight")]
    pub soft_criteria_weight: f64,
    #[validate(range(min = 1))]
    #[serde(rename = "maxResults", alias = "max_results", default = "default_max_results")]
    pub max_results: usize,
    #[validate(range(min = 0.0))]
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_true() -> bool { true }
fn default_soft_weight() -> f64 { 0.7 }
fn default_max_results() -> usize { 100 }
fn default_threshold() -> f64 { 0.01 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_semantic_search: default_true(),
            use_hard_filtering: false,
            soft_criteria_weight: default_soft_weight(),
            max_results: default_max_results(),
            threshold: default_threshold(),
        }
    }
}

/// One ranked entry returned by the search endpoint
///
/// The profile is kept as raw JSON: the service owns its schema and only
/// `_id` and `name` are read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub profile: Value,
    #[serde(default)]
    pub score: f64,
}

impl SearchHit {
    /// Build a hit from an arbitrary response entry, tolerating missing fields
    pub fn from_value(value: &Value) -> Self {
        Self {
            profile: value.get("profile").cloned().unwrap_or(Value::Null),
            score: value.get("score").and_then(Value::as_f64).unwrap_or(0.0),
        }
    }

    /// Profile identifier (`profile._id`), if present and a string
    pub fn profile_id(&self) -> Option<&str> {
        self.profile.get("_id").and_then(Value::as_str)
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile.get("name").and_then(Value::as_str)
    }
}

/// Ranked search output, in the order the service returned it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
}

impl SearchResult {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self { hits }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[Value]) -> Self {
        Self {
            hits: values.iter().map(SearchHit::from_value).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// First `n` hits in rank order
    pub fn top(&self, n: usize) -> &[SearchHit] {
        &self.hits[..n.min(self.hits.len())]
    }
}

/// A catalog query paired with its display label
#[derive(Debug, Clone)]
pub struct NamedQuery {
    pub label: String,
    pub query: Query,
}
