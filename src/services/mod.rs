// Service exports
pub mod search_api;

pub use search_api::{ApiError, SearchApiClient};
