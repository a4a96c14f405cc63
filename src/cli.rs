use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Setup and smoke tests for the candidate search service
#[derive(Debug, Parser)]
#[command(name = "search-harness", version, about)]
pub struct Cli {
    /// Settings file to load instead of config/default + config/local
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `search_harness=debug`
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// `pretty` or `compact`
    #[arg(long, global = true, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the environment and probe the service
    Setup {
        /// Only validate environment variables
        #[arg(long)]
        validate: bool,

        /// Also run an evaluation smoke test on sample profiles
        #[arg(long)]
        test_evaluation: bool,
    },

    /// Search, then evaluate the top candidates for one query
    Evaluate {
        /// Catalog query id
        #[arg(long, default_value = "tax_lawyer")]
        query: String,

        #[arg(long)]
        max_candidates: Option<usize>,

        /// `maxResults` sent with the search
        #[arg(long)]
        max_results: Option<usize>,
    },

    /// Run the pipeline for every catalog query and summarize
    Retrieval {
        #[arg(long)]
        max_candidates: Option<usize>,

        /// Pause between queries
        #[arg(long)]
        delay_secs: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup_flags() {
        let cli = Cli::try_parse_from(["search-harness", "setup", "--validate", "--test-evaluation"]).unwrap();
        match cli.command {
            Command::Setup { validate, test_evaluation } => {
                assert!(validate);
                assert!(test_evaluation);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_retrieval_overrides() {
        let cli = Cli::try_parse_from([
            "search-harness",
            "retrieval",
            "--max-candidates",
            "4",
            "--delay-secs",
            "0",
        ])
        .unwrap();
        match cli.command {
            Command::Retrieval { max_candidates, delay_secs } => {
                assert_eq!(max_candidates, Some(4));
                assert_eq!(delay_secs, Some(0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_defaults_to_tax_lawyer() {
        let cli = Cli::try_parse_from(["search-harness", "evaluate"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Evaluate { ref query, max_candidates: None, max_results: None } if query == "tax_lawyer"
        ));
    }

    #[test]
    fn test_parse_evaluate_max_results() {
        let cli = Cli::try_parse_from(["search-harness", "evaluate", "--max-results", "20"]).unwrap();
        assert!(matches!(cli.command, Command::Evaluate { max_results: Some(20), .. }));
    }
}
