// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Query, SearchConfig, SearchHit, SearchResult, NamedQuery};
pub use requests::{SearchRequest, EvaluationRequest};
pub use responses::{EvaluationResult, ProfileCountResponse, SampleProfilesResponse, HealthResponse, ErrorResponse, AGGREGATE_SCORE_FIELD};
