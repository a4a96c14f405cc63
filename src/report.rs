//! Console rendering for setup and pipeline results.
//!
//! Everything here returns plain strings; `main` decides where they go.

use crate::core::{EvaluationCheck, PipelineSummary, SetupReport};
use crate::models::SearchHit;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// `1234567` -> `1,234,567`
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "N/A".to_string(), |s| s.to_string())
}

pub fn render_top_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "  {}. {} (Score: {:.2})",
                i + 1,
                hit.profile_name().unwrap_or("Unknown"),
                hit.score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detailed report for one pipeline run
pub fn render_pipeline_summary(summary: &PipelineSummary, email: Option<&str>) -> String {
    let mut lines = vec![
        format!("Query: {}", summary.query_name),
        format!("Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ];

    if summary.candidates_found > 0 {
        lines.push(format!("Found {} candidates", summary.candidates_found));
        lines.push(format!("Top {} candidates:", summary.top_hits.len()));
        lines.push(render_top_hits(&summary.top_hits));
    }

    if !summary.is_success() {
        lines.push(format!("Pipeline stopped: {}", summary.outcome.describe()));
        return lines.join("\n");
    }

    let sample: Vec<&str> = summary.candidate_ids.iter().take(3).map(String::as_str).collect();
    lines.push(format!("Sample IDs: {:?}", sample));
    lines.push(String::new());
    lines.push(format!("Overall Score: {}", format_score(summary.aggregate_score)));
    lines.push(String::new());
    lines.push("Evaluation Details:".to_string());
    lines.push(format!("  - Candidates evaluated: {}", summary.candidates_evaluated));
    lines.push(format!("  - Config path: {}", summary.config_path));
    if let Some(email) = email {
        lines.push(format!("  - Email used: {}", email));
    }
    lines.push(String::new());
    lines.push("Full evaluation response:".to_string());
    lines.push(summary.evaluation.pretty());

    lines.join("\n")
}

/// Closing table for a batch run
pub fn render_batch_summary(summaries: &[PipelineSummary]) -> String {
    let mut lines = vec![rule(), "TEST SUMMARY".to_string(), rule()];

    let completed: Vec<&PipelineSummary> = summaries.iter().filter(|s| s.is_success()).collect();
    if completed.is_empty() {
        lines.push("No tests completed successfully".to_string());
    } else {
        lines.push(format!("Successfully tested {} queries", completed.len()));
        for summary in &completed {
            lines.push(String::new());
            lines.push(format!("{}:", summary.query_name));
            lines.push(format!("  - Candidates found: {}", summary.candidates_found));
            lines.push(format!("  - Candidates evaluated: {}", summary.candidates_evaluated));
            lines.push(format!("  - Overall score: {}", format_score(summary.aggregate_score)));
        }
    }

    for failed in summaries.iter().filter(|s| !s.is_success()) {
        lines.push(format!("{} failed: {}", failed.query_name, failed.outcome.describe()));
    }

    lines.join("\n")
}

pub fn render_setup(report: &SetupReport) -> String {
    let mut lines = Vec::new();

    if !report.missing_credentials.is_empty() {
        lines.push(format!(
            "Missing environment variables: {}",
            report.missing_credentials.join(", ")
        ));
        lines.push("Please update your .env file with the required credentials.".to_string());
        return lines.join("\n");
    }
    lines.push("Environment configuration validated.".to_string());

    if report.validate_only {
        lines.push("Environment validation complete.".to_string());
        return lines.join("\n");
    }

    match &report.service_status {
        Some(status) => lines.push(format!("Service status: {}", status)),
        None => lines.push("Service health check failed, continuing.".to_string()),
    }

    match report.profile_count {
        Some(count) => lines.push(format!("Database connected. Found {} profiles.", format_count(count))),
        None => {
            lines.push("Setup failed: Database connection failed.".to_string());
            return lines.join("\n");
        }
    }

    if report.sample_ids.is_empty() {
        lines.push("Setup failed: Could not load sample profiles.".to_string());
        return lines.join("\n");
    }
    lines.push("Sample profile IDs:".to_string());
    for (i, id) in report.sample_ids.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, id));
    }

    match &report.evaluation {
        Some(EvaluationCheck::Passed(result)) => {
            lines.push("Evaluation API test successful!".to_string());
            lines.push(format!("Response: {}", result.pretty()));
        }
        Some(EvaluationCheck::Failed(reason)) => {
            lines.push(format!("Evaluation API test failed: {}", reason));
            lines.push("Evaluation API test failed, but setup can continue.".to_string());
        }
        None => {}
    }

    lines.push(String::new());
    lines.push("Setup complete!".to_string());
    lines.push(String::new());
    lines.push("Next steps:".to_string());
    lines.push("   1. Start the server: npm run server".to_string());
    lines.push("   2. Open http://localhost:3001".to_string());
    lines.push("   3. Test the evaluation: search-harness evaluate".to_string());
    lines.push("   4. Run the retrieval checks: search-harness retrieval".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PipelineOutcome;
    use crate::models::EvaluationResult;
    use chrono::Utc;
    use serde_json::json;

    fn summary(name: &str, outcome: PipelineOutcome, score: Option<f64>) -> PipelineSummary {
        PipelineSummary {
            query_name: name.to_string(),
            config_path: "tax_lawyer.yml".to_string(),
            outcome,
            candidates_found: 12,
            candidates_evaluated: if outcome == PipelineOutcome::Completed { 10 } else { 0 },
            aggregate_score: score,
            top_hits: vec![SearchHit::from_value(&json!({"profile": {"_id": "1", "name": "Ada"}, "score": 0.912}))],
            candidate_ids: vec!["1".to_string()],
            evaluation: EvaluationResult(json!({"average_final_score": score})),
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(0.82)), "0.82");
        assert_eq!(format_score(None), "N/A");
    }

    #[test]
    fn test_top_hits_unknown_name() {
        let hits = vec![
            SearchHit::from_value(&json!({"profile": {"_id": "1", "name": "Ada"}, "score": 0.912})),
            SearchHit::from_value(&json!({"profile": {"_id": "2"}, "score": 0.5})),
        ];
        let rendered = render_top_hits(&hits);
        assert!(rendered.contains("1. Ada (Score: 0.91)"));
        assert!(rendered.contains("2. Unknown (Score: 0.50)"));
    }

    #[test]
    fn test_batch_summary() {
        let summaries = vec![
            summary("Tax Lawyer", PipelineOutcome::Completed, Some(0.82)),
            summary("Radiology", PipelineOutcome::EvaluationFailed, None),
        ];

        let rendered = render_batch_summary(&summaries);
        assert!(rendered.contains("Successfully tested 1 queries"));
        assert!(rendered.contains("  - Overall score: 0.82"));
        assert!(rendered.contains("Radiology failed: evaluation failed"));
    }

    #[test]
    fn test_batch_summary_all_failed() {
        let summaries = vec![summary("Radiology", PipelineOutcome::NoSearchResults, None)];
        assert!(render_batch_summary(&summaries).contains("No tests completed successfully"));
    }

    #[test]
    fn test_pipeline_summary_details() {
        let rendered = render_pipeline_summary(
            &summary("Tax Lawyer", PipelineOutcome::Completed, Some(0.82)),
            Some("dev@example.com"),
        );
        assert!(rendered.contains("Overall Score: 0.82"));
        assert!(rendered.contains("  - Candidates evaluated: 10"));
        assert!(rendered.contains("  - Email used: dev@example.com"));
    }

    #[test]
    fn test_setup_missing_credentials() {
        let report = SetupReport {
            missing_credentials: vec!["MERCOR_EMAIL"],
            ..SetupReport::default()
        };
        assert!(render_setup(&report).starts_with("Missing environment variables: MERCOR_EMAIL"));
    }

    #[test]
    fn test_setup_complete() {
        let report = SetupReport {
            service_status: Some("OK".to_string()),
            profile_count: Some(193_000),
            sample_ids: vec!["a".to_string(), "b".to_string()],
            evaluation: Some(EvaluationCheck::Failed("API returned 401".to_string())),
            success: true,
            ..SetupReport::default()
        };
        let rendered = render_setup(&report);
        assert!(rendered.contains("Service status: OK"));
        assert!(rendered.contains("Found 193,000 profiles."));
        assert!(rendered.contains("  2. b"));
        assert!(rendered.contains("setup can continue"));
        assert!(rendered.contains("Setup complete!"));
    }
}
