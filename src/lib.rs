//! Search Harness - setup and smoke tests for the candidate search service
//!
//! This library drives the external search service over HTTP: it checks the
//! environment and connectivity, runs search -> extract -> evaluate pipelines
//! and renders the results for the console.

pub mod config;
pub mod core;
pub mod models;
pub mod report;
pub mod services;

// Re-export commonly used types
pub use crate::core::{extract_identifiers, PipelineOutcome, PipelineRunner, PipelineSummary, SetupReport, SetupRunner};
pub use models::{Query, SearchConfig, SearchHit, SearchResult, EvaluationResult};
pub use services::{ApiError, SearchApiClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = SearchResult::empty();
        assert!(extract_identifiers(&result, 3).is_empty());
        assert!(EvaluationResult::empty().is_empty());
    }
}
