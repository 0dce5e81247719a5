//! NBA roster crawler command line
//!
//! Resolves the team directory from basketball-reference.com and prints
//! current or historical rosters as JSON.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nba_rosters_core::client::DEFAULT_BASE_URL;
use nba_rosters_core::{ClientConfig, RosterCrawler};
use tracing_subscriber::EnvFilter;

use crate::commands::OutputOptions;

/// Crawl NBA team rosters from basketball-reference.com.
///
/// Requests are sent one at a time with a 3.1 second pause after each, so a
/// full historical crawl takes well over an hour.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Site base address
    #[clap(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Request timeout in seconds
    #[clap(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// Write JSON to this file instead of stdout
    #[clap(short, long, global = true)]
    output: Option<PathBuf>,
    /// Pretty-print JSON output
    #[clap(long, global = true)]
    pretty: bool,
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the team directory (team code to current roster URL)
    Teams,
    /// Fetch the current roster of every team
    Current {
        /// Only these team codes (repeatable)
        #[clap(short, long = "team", value_name = "CODE")]
        teams: Vec<String>,
    },
    /// Walk every team's season chain back to its earliest season
    History {
        /// Only these team codes (repeatable)
        #[clap(short, long = "team", value_name = "CODE")]
        teams: Vec<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ClientConfig {
        base_url: cli.base_url,
        timeout_secs: cli.timeout,
        ..ClientConfig::default()
    };
    let output = OutputOptions {
        path: cli.output,
        pretty: cli.pretty,
    };

    let crawler = match RosterCrawler::with_config(config) {
        Ok(crawler) => crawler,
        Err(e) => {
            tracing::error!("Failed to initialize crawler: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Command::Teams => commands::run_teams(&crawler, &output).await,
        Command::Current { teams } => commands::run_current(&crawler, &teams, &output).await,
        Command::History { teams } => commands::run_history(&crawler, &teams, &output).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
