use crate::compare::HttpCompareClient;
use crate::config::{self, Config};
use crate::error::SearchError;
use crate::render::{render_payload, render_state, Rendered};
use crate::search::SearchController;
use crate::{logging, tui};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

/// Compare product prices across Flipkart, Amazon and Reliance Digital.
#[derive(Debug, Parser)]
#[command(name = "compareason", version, about)]
pub struct Cli {
    /// Root URL of the comparison service
    #[arg(long, global = true, env = "COMPAREASON_URL")]
    pub url: Option<String>,

    /// Enable debug logging (to a file in interactive mode, to stderr otherwise)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the service's response
    Search {
        /// Product to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print the service's health payload
    Health,
    /// Print the availability of each supported site
    Status,
}

/// Parse arguments and dispatch
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = config::load_or_create_config()
        .context("Failed to load configuration")?
        .with_base_url(cli.url.clone());
    config.debug |= cli.debug;

    match cli.command {
        None => run_interactive(config).await,
        Some(Command::Search { query }) => {
            logging::init_stderr(config.debug);
            run_search(&config, query.join(" ")).await
        }
        Some(Command::Health) => {
            logging::init_stderr(config.debug);
            let client = HttpCompareClient::new(&config.base_url);
            Ok(print_report(client.health().await))
        }
        Some(Command::Status) => {
            logging::init_stderr(config.debug);
            let client = HttpCompareClient::new(&config.base_url);
            Ok(print_report(client.site_status().await))
        }
    }
}

async fn run_interactive(config: Config) -> Result<ExitCode> {
    let _log_guard = logging::init(&config)?;

    let client = HttpCompareClient::new(&config.base_url);
    let service_url = client.base_url().to_string();
    let controller = SearchController::new(Arc::new(client), config.default_query.clone());

    tracing::info!(base_url = %service_url, "starting interactive search");
    tui::run(tui::App::new(controller, service_url)).await?;

    Ok(ExitCode::SUCCESS)
}

/// Headless rendering layer: same controller, output on stdout/stderr
async fn run_search(config: &Config, query: String) -> Result<ExitCode> {
    let client = HttpCompareClient::new(&config.base_url);
    let controller = SearchController::new(Arc::new(client), query);

    let submission = controller.submit_search().await;
    tracing::debug!(?submission, "headless search finished");

    match render_state(&controller.snapshot()) {
        Rendered::Payload(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Rendered::Error(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        Rendered::Nothing | Rendered::Busy => {
            anyhow::bail!("search did not complete: {submission:?}")
        }
    }
}

/// Print a service report on stdout, or its error on stderr
fn print_report(report: Result<serde_json::Value, SearchError>) -> ExitCode {
    match report {
        Ok(payload) => {
            println!("{}", render_payload(&payload));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["compareason"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::try_parse_from([
            "compareason",
            "search",
            "Samsung",
            "Galaxy",
            "M14",
            "--url",
            "http://127.0.0.1:9000",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://127.0.0.1:9000"));
        match cli.command {
            Some(Command::Search { query }) => assert_eq!(query.join(" "), "Samsung Galaxy M14"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_status_subcommand_with_debug() {
        let cli = Cli::try_parse_from(["compareason", "status", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Some(Command::Status)));
    }

    #[test]
    fn test_search_requires_a_query() {
        assert!(Cli::try_parse_from(["compareason", "search"]).is_err());
    }
}
