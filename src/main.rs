mod cli;

use clap::Parser;
use cli::{Cli, Command};
use search_harness::config::Settings;
use search_harness::core::{queries, PipelineRunner, SetupRunner};
use search_harness::report;
use search_harness::services::SearchApiClient;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, &cli.log_format);

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match SearchApiClient::new(settings.api.clone(), settings.credentials.email.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Using search service at {}", client.base_url());

    match cli.command {
        Command::Setup { validate, test_evaluation } => {
            let runner = SetupRunner::new(settings, client);
            let setup = runner.run_setup(validate, test_evaluation).await;
            println!("{}", report::render_setup(&setup));
            setup.exit_code()
        }
        Command::Evaluate { query, max_candidates, max_results } => {
            let Some(named) = queries::find(&query) else {
                error!("Unknown query id: {}", query);
                return ExitCode::FAILURE;
            };
            let max = max_candidates.unwrap_or(settings.pipeline.single_query_candidates);
            let search = settings.single_query_search(max_results);
            let runner = PipelineRunner::new(client);

            let summary = runner.run_pipeline(&named.query, &search, max).await;
            println!("{}", report::rule());
            println!(
                "{}",
                report::render_pipeline_summary(&summary, runner.client().email())
            );

            if summary.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Command::Retrieval { max_candidates, delay_secs } => {
            let max = max_candidates.unwrap_or(settings.pipeline.max_candidates);
            let delay = delay_secs
                .map(std::time::Duration::from_secs)
                .unwrap_or_else(|| settings.pipeline.batch_delay());
            let runner = PipelineRunner::new(client);

            let summaries = runner
                .run_batch(&queries::catalog(), &settings.search, max, delay)
                .await;

            for summary in &summaries {
                println!("{}", report::rule());
                println!(
                    "{}",
                    report::render_pipeline_summary(summary, runner.client().email())
                );
            }
            println!("{}", report::render_batch_summary(&summaries));

            if summaries.iter().any(|s| s.is_success()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Logs go to stderr so stdout only carries the report
fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}
