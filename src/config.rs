use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::models::SearchConfig;

/// Environment variable carrying the database URI
pub const MONGO_URI_VAR: &str = "MONGO_URI";
/// Environment variable carrying the evaluation identity
pub const EMAIL_VAR: &str = "MERCOR_EMAIL";
/// Environment variable overriding the API base URL
pub const API_BASE_VAR: &str = "SEARCH_API_BASE";

/// Harness configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub credentials: CredentialSettings,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,
    #[serde(default = "default_evaluate_timeout")]
    pub evaluate_timeout_secs: u64,
    #[serde(default = "default_smoke_evaluate_timeout")]
    pub smoke_evaluate_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            probe_timeout_secs: default_probe_timeout(),
            search_timeout_secs: default_search_timeout(),
            evaluate_timeout_secs: default_evaluate_timeout(),
            smoke_evaluate_timeout_secs: default_smoke_evaluate_timeout(),
        }
    }
}

impl ApiSettings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn evaluate_timeout(&self) -> Duration {
        Duration::from_secs(self.evaluate_timeout_secs)
    }

    pub fn smoke_evaluate_timeout(&self) -> Duration {
        Duration::from_secs(self.smoke_evaluate_timeout_secs)
    }
}

fn default_base_url() -> String { "http://localhost:3001/api".to_string() }
fn default_probe_timeout() -> u64 { 10 }
fn default_search_timeout() -> u64 { 30 }
fn default_evaluate_timeout() -> u64 { 60 }
fn default_smoke_evaluate_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialSettings {
    pub mongo_uri: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSettings {
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_single_query_candidates")]
    pub single_query_candidates: usize,
    /// `maxResults` sent by the single-query evaluate run
    #[serde(default = "default_single_query_max_results")]
    pub single_query_max_results: usize,
    #[serde(default = "default_batch_delay")]
    pub batch_delay_secs: u64,
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,
    #[serde(default = "default_smoke_candidates")]
    pub smoke_candidates: usize,
    #[serde(default = "default_smoke_config_path")]
    pub smoke_config_path: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
            single_query_candidates: default_single_query_candidates(),
            single_query_max_results: default_single_query_max_results(),
            batch_delay_secs: default_batch_delay(),
            sample_limit: default_sample_limit(),
            smoke_candidates: default_smoke_candidates(),
            smoke_config_path: default_smoke_config_path(),
        }
    }
}

impl PipelineSettings {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_secs(self.batch_delay_secs)
    }
}

fn default_max_candidates() -> usize { 10 }
fn default_single_query_candidates() -> usize { 5 }
fn default_single_query_max_results() -> usize { 10 }
fn default_batch_delay() -> u64 { 2 }
fn default_sample_limit() -> usize { 5 }
fn default_smoke_candidates() -> usize { 3 }
fn default_smoke_config_path() -> String { "tax_lawyer.yml".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with SEARCH_HARNESS)
    /// 4. MONGO_URI, MERCOR_EMAIL and SEARCH_API_BASE
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SEARCH_HARNESS__API__BASE_URL -> api.base_url
            .add_source(
                Environment::with_prefix("SEARCH_HARNESS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SEARCH_HARNESS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Search options for the single-query run: the batch defaults with a
    /// smaller result cap, optionally overridden
    pub fn single_query_search(&self, max_results: Option<usize>) -> SearchConfig {
        SearchConfig {
            max_results: max_results.unwrap_or(self.pipeline.single_query_max_results),
            ..self.search.clone()
        }
    }

    /// Names of required credential variables that are unset or blank
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.credentials.mongo_uri) {
            missing.push(MONGO_URI_VAR);
        }
        if is_blank(&self.credentials.email) {
            missing.push(EMAIL_VAR);
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Apply the conventional unprefixed variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(uri) = env::var(MONGO_URI_VAR) {
        builder = builder.set_override("credentials.mongo_uri", uri)?;
    }
    if let Ok(email) = env::var(EMAIL_VAR) {
        builder = builder.set_override("credentials.email", email)?;
    }
    if let Ok(base) = env::var(API_BASE_VAR) {
        builder = builder.set_override("api.base_url", base)?;
    }

    builder.build()
}
