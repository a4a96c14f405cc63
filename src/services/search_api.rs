use crate::config::ApiSettings;
use crate::models::{
    ErrorResponse, EvaluationRequest, EvaluationResult, HealthResponse, ProfileCountResponse,
    Query, SampleProfilesResponse, SearchConfig, SearchRequest, SearchResult,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur when talking to the search service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::RequestError(e) if e.is_timeout())
    }
}

/// Client for the candidate search service
///
/// Wraps the endpoints used by the harness:
/// - `POST /search` and `POST /evaluate`
/// - `GET /profiles/count` and `GET /profiles/sample`
/// - `GET /health`
///
/// The evaluation identity is handed in at construction and sent as the
/// `Authorization` header on evaluation calls.
#[derive(Debug, Clone)]
pub struct SearchApiClient {
    base_url: String,
    email: Option<String>,
    settings: ApiSettings,
    client: Client,
}

impl SearchApiClient {
    /// Create a new client
    pub fn new(settings: ApiSettings, email: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            email,
            settings,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Run a semantic search and return hits in service rank order
    pub async fn search(
        &self,
        query: &Query,
        config: &SearchConfig,
    ) -> Result<SearchResult, ApiError> {
        query
            .validate()
            .map_err(|e| ApiError::Validation(format!("query {}: {}", query.id, e)))?;
        config
            .validate()
            .map_err(|e| ApiError::Validation(format!("search config: {}", e)))?;

        let url = self.url("search");
        tracing::debug!("Searching {} for query {}", url, query.id);

        let request = self
            .client
            .post(&url)
            .timeout(self.settings.search_timeout())
            .json(&SearchRequest { query, config });

        let json = send_json(request).await?;

        let hits = json
            .as_array()
            .ok_or_else(|| ApiError::InvalidResponse("Search response is not an array".into()))?;

        Ok(SearchResult::from_values(hits))
    }

    /// Submit candidate ids for evaluation against a named config
    pub async fn evaluate(
        &self,
        config_path: &str,
        candidate_ids: &[String],
    ) -> Result<EvaluationResult, ApiError> {
        self.evaluate_with_timeout(config_path, candidate_ids, self.settings.evaluate_timeout())
            .await
    }

    pub async fn evaluate_with_timeout(
        &self,
        config_path: &str,
        candidate_ids: &[String],
        timeout: std::time::Duration,
    ) -> Result<EvaluationResult, ApiError> {
        let payload = EvaluationRequest {
            config_path: config_path.to_string(),
            candidate_ids: candidate_ids.to_vec(),
        };
        payload
            .validate()
            .map_err(|e| ApiError::Validation(format!("evaluation request: {}", e)))?;

        let url = self.url("evaluate");
        tracing::debug!("Evaluating {} candidates with {} at {}", candidate_ids.len(), config_path, url);

        let mut request = self.client.post(&url).timeout(timeout).json(&payload);
        if let Some(email) = &self.email {
            request = request.header(reqwest::header::AUTHORIZATION, email);
        }

        let json = send_json(request).await?;

        if !json.is_object() {
            return Err(ApiError::InvalidResponse("Evaluation response is not an object".into()));
        }

        Ok(EvaluationResult(json))
    }

    /// Total number of profiles in the backing database
    pub async fn profile_count(&self) -> Result<u64, ApiError> {
        let url = self.url("profiles/count");
        tracing::debug!("Counting profiles at {}", url);

        let request = self.client.get(&url).timeout(self.settings.probe_timeout());
        let json = send_json(request).await?;

        let body: ProfileCountResponse = serde_json::from_value(json)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse count: {}", e)))?;

        Ok(body.count)
    }

    /// Identifiers of up to `limit` sample profiles
    pub async fn sample_profiles(&self, limit: usize) -> Result<Vec<String>, ApiError> {
        let url = self.url("profiles/sample");
        tracing::debug!("Sampling {} profiles from {}", limit, url);

        let request = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .timeout(self.settings.probe_timeout());
        let json = send_json(request).await?;

        let body: SampleProfilesResponse = serde_json::from_value(json)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse sample: {}", e)))?;

        Ok(body.ids())
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = self.url("health");
        let request = self.client.get(&url).timeout(self.settings.probe_timeout());
        let json = send_json(request).await?;

        serde_json::from_value(json)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse health: {}", e)))
    }
}

/// Send a request and decode a JSON body, mapping non-2xx to `ApiError::Status`
async fn send_json(request: RequestBuilder) -> Result<Value, ApiError> {
    let response = request.send().await?;
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read body".to_string());

    if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
        tracing::debug!("Service error {}: {} ({:?})", status, error.error, error.details);
    }

    Err(ApiError::Status { status, body })
}
