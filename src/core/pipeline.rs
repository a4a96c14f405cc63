use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::models::{EvaluationResult, NamedQuery, Query, SearchConfig, SearchHit, SearchResult};
use crate::services::SearchApiClient;

/// Number of leading hits kept on a summary for display
pub const TOP_HITS_SHOWN: usize = 3;

/// How far a pipeline run got
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    Completed,
    /// Search failed or returned nothing; evaluation was not attempted
    NoSearchResults,
    /// Search returned hits but none carried an identifier
    NoIdentifiers,
    EvaluationFailed,
}

impl PipelineOutcome {
    pub fn describe(&self) -> &'static str {
        match self {
            PipelineOutcome::Completed => "completed",
            PipelineOutcome::NoSearchResults => "no search results found",
            PipelineOutcome::NoIdentifiers => "no candidate IDs found",
            PipelineOutcome::EvaluationFailed => "evaluation failed",
        }
    }
}

/// Result of a single search -> extract -> evaluate run
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub query_name: String,
    pub config_path: String,
    pub outcome: PipelineOutcome,
    pub candidates_found: usize,
    pub candidates_evaluated: usize,
    pub aggregate_score: Option<f64>,
    pub top_hits: Vec<SearchHit>,
    pub candidate_ids: Vec<String>,
    pub evaluation: EvaluationResult,
    pub started_at: DateTime<Utc>,
}

impl PipelineSummary {
    fn new(query: &Query, started_at: DateTime<Utc>) -> Self {
        Self {
            query_name: query.name.clone(),
            config_path: query.config_path.clone(),
            outcome: PipelineOutcome::NoSearchResults,
            candidates_found: 0,
            candidates_evaluated: 0,
            aggregate_score: None,
            top_hits: Vec::new(),
            candidate_ids: Vec::new(),
            evaluation: EvaluationResult::empty(),
            started_at,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == PipelineOutcome::Completed
    }
}

/// Take the identifiers of the first `max_count` hits, in rank order
///
/// Hits without a `profile._id` are skipped, so the result may be shorter
/// than `max_count` even when more hits are available.
pub fn extract_identifiers(result: &SearchResult, max_count: usize) -> Vec<String> {
    result
        .hits
        .iter()
        .take(max_count)
        .filter_map(|hit| hit.profile_id().map(str::to_string))
        .collect()
}

/// Sequential search/evaluate orchestrator
///
/// Every step is a single awaited HTTP call; failures are logged and turned
/// into empty values so callers never see an error from this type.
#[derive(Debug, Clone)]
pub struct PipelineRunner {
    client: SearchApiClient,
}

impl PipelineRunner {
    pub fn new(client: SearchApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SearchApiClient {
        &self.client
    }

    /// Search, returning an empty result on any failure
    pub async fn search(&self, query: &Query, config: &SearchConfig) -> SearchResult {
        match self.client.search(query, config).await {
            Ok(result) => result,
            Err(e) if e.is_timeout() => {
                tracing::error!("Search timed out for {}: {}", query.id, e);
                SearchResult::empty()
            }
            Err(e) => {
                tracing::error!("Search failed for {}: {}", query.id, e);
                SearchResult::empty()
            }
        }
    }

    /// Evaluate, returning an empty payload on any failure
    pub async fn evaluate(&self, config_path: &str, candidate_ids: &[String]) -> EvaluationResult {
        match self.client.evaluate(config_path, candidate_ids).await {
            Ok(result) => result,
            Err(e) if e.is_timeout() => {
                tracing::error!("Evaluation timed out for {}: {}", config_path, e);
                EvaluationResult::empty()
            }
            Err(e) => {
                tracing::error!("Evaluation failed for {}: {}", config_path, e);
                EvaluationResult::empty()
            }
        }
    }

    /// Run search -> extract -> evaluate for one query
    ///
    /// Stops before evaluation when the search yields nothing or no hit
    /// carries an identifier.
    pub async fn run_pipeline(
        &self,
        query: &Query,
        config: &SearchConfig,
        max_candidates: usize,
    ) -> PipelineSummary {
        let mut summary = PipelineSummary::new(query, Utc::now());

        tracing::info!("Searching for candidates: {}", query.name);
        let results = self.search(query, config).await;
        if results.is_empty() {
            tracing::warn!("No search results found for {}", query.name);
            return summary;
        }

        summary.candidates_found = results.len();
        summary.top_hits = results.top(TOP_HITS_SHOWN).to_vec();
        tracing::info!("Found {} candidates", results.len());

        let candidate_ids = extract_identifiers(&results, max_candidates);
        if candidate_ids.is_empty() {
            tracing::warn!("No candidate IDs found for {}", query.name);
            summary.outcome = PipelineOutcome::NoIdentifiers;
            return summary;
        }
        tracing::info!("Extracted {} candidate IDs", candidate_ids.len());

        tracing::info!("Evaluating candidates with {}", query.config_path);
        let evaluation = self.evaluate(&query.config_path, &candidate_ids).await;
        summary.candidate_ids = candidate_ids;
        if evaluation.is_empty() {
            summary.outcome = PipelineOutcome::EvaluationFailed;
            return summary;
        }

        summary.candidates_evaluated = summary.candidate_ids.len();
        summary.aggregate_score = evaluation.aggregate_score();
        summary.evaluation = evaluation;
        summary.outcome = PipelineOutcome::Completed;

        tracing::info!(
            "Evaluation successful for {}: score {:?}",
            query.name,
            summary.aggregate_score
        );

        summary
    }

    /// Run the pipeline for each query in turn, pausing `delay` between runs
    ///
    /// Summaries are labelled with each query's catalog label and returned
    /// in input order, failures included.
    pub async fn run_batch(
        &self,
        queries: &[NamedQuery],
        config: &SearchConfig,
        max_candidates: usize,
        delay: Duration,
    ) -> Vec<PipelineSummary> {
        let mut summaries = Vec::with_capacity(queries.len());

        for (i, named) in queries.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            tracing::info!("Testing query: {}", named.label);
            let mut summary = self.run_pipeline(&named.query, config, max_candidates).await;
            summary.query_name = named.label.clone();
            summaries.push(summary);
        }

        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result_with(entries: Vec<serde_json::Value>) -> SearchResult {
        SearchResult::from_values(&entries)
    }

    #[test]
    fn test_extract_respects_limit_and_order() {
        let result = result_with(vec![
            json!({"profile": {"_id": "a"}, "score": 0.9}),
            json!({"profile": {"_id": "b"}, "score": 0.8}),
            json!({"profile": {"_id": "c"}, "score": 0.7}),
        ]);

        assert_eq!(extract_identifiers(&result, 2), vec!["a", "b"]);
        assert_eq!(extract_identifiers(&result, 10), vec!["a", "b", "c"]);
        assert!(extract_identifiers(&result, 0).is_empty());
    }

    #[test]
    fn test_extract_skips_entries_without_id() {
        let result = result_with(vec![
            json!({"profile": {"_id": "a"}, "score": 0.9}),
            json!({"profile": {"name": "anonymous"}, "score": 0.8}),
            json!({"score": 0.7}),
            json!({"profile": {"_id": 42}, "score": 0.6}),
            json!({"profile": {"_id": "e"}, "score": 0.5}),
        ]);

        // The window is taken before skipping
        assert_eq!(extract_identifiers(&result, 3), vec!["a"]);
        assert_eq!(extract_identifiers(&result, 5), vec!["a", "e"]);
    }

    #[test]
    fn test_extract_from_empty_result() {
        assert!(extract_identifiers(&SearchResult::empty(), 5).is_empty());
    }

    #[test]
    fn test_outcome_descriptions() {
        assert_eq!(PipelineOutcome::Completed.describe(), "completed");
        assert_eq!(PipelineOutcome::NoIdentifiers.describe(), "no candidate IDs found");
    }
}
