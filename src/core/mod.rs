// Harness orchestration exports
pub mod pipeline;
pub mod queries;
pub mod setup;

pub use pipeline::{extract_identifiers, PipelineOutcome, PipelineRunner, PipelineSummary};
pub use setup::{EvaluationCheck, SetupReport, SetupRunner};
