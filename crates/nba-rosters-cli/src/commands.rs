//! Subcommand handlers
//!
//! Each handler resolves the team directory, runs one crawl mode, and writes
//! the result as JSON. Only directory resolution and output errors fail a
//! command; per-team failures are logged by the crawler.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use nba_rosters_core::{PageSource, RosterCrawler, TeamDirectory};
use serde::Serialize;

/// Where and how to write JSON output
#[derive(Debug, Default)]
pub struct OutputOptions {
    /// Output file; stdout when `None`
    pub path: Option<PathBuf>,
    pub pretty: bool,
}

/// Print the team directory.
pub async fn run_teams<S: PageSource>(
    crawler: &RosterCrawler<S>,
    output: &OutputOptions,
) -> Result<(), String> {
    let directory = crawler.resolve_directory().await.map_err(|e| e.to_string())?;
    write_json(&directory, output)
}

/// Fetch and print the current roster of the selected teams.
pub async fn run_current<S: PageSource>(
    crawler: &RosterCrawler<S>,
    teams: &[String],
    output: &OutputOptions,
) -> Result<(), String> {
    let directory = crawler.resolve_directory().await.map_err(|e| e.to_string())?;
    let directory = select_teams(directory, teams)?;

    let rosters = crawler.current_rosters(&directory).await;
    if rosters.len() < directory.len() {
        tracing::warn!(
            "Fetched {} of {} rosters",
            rosters.len(),
            directory.len()
        );
    }
    write_json(&rosters, output)
}

/// Walk and print the full history of the selected teams.
pub async fn run_history<S: PageSource>(
    crawler: &RosterCrawler<S>,
    teams: &[String],
    output: &OutputOptions,
) -> Result<(), String> {
    let directory = crawler.resolve_directory().await.map_err(|e| e.to_string())?;
    let directory = select_teams(directory, teams)?;

    let report = crawler.crawl_history(&directory).await;
    tracing::info!(
        "Collected {} seasons for {} teams ({} walks ended early)",
        report.season_count(),
        report.dataset.len(),
        report.failures.len()
    );
    write_json(&report, output)
}

/// Restrict the directory to the requested team codes.
///
/// An empty filter keeps every team. Codes are matched case-insensitively;
/// an unknown code is an error so typos do not silently crawl nothing.
pub fn select_teams(directory: TeamDirectory, teams: &[String]) -> Result<TeamDirectory, String> {
    if teams.is_empty() {
        return Ok(directory);
    }

    let wanted: Vec<String> = teams.iter().map(|t| t.trim().to_uppercase()).collect();
    if let Some(unknown) = wanted.iter().find(|t| !directory.contains_key(t.as_str())) {
        let known: Vec<&str> = directory.keys().map(String::as_str).collect();
        return Err(format!(
            "Unknown team code '{}' (known: {})",
            unknown,
            known.join(", ")
        ));
    }

    Ok(directory
        .into_iter()
        .filter(|(code, _)| wanted.contains(code))
        .collect())
}

/// Serialize `value` to the configured output.
pub fn write_json<T: Serialize>(value: &T, output: &OutputOptions) -> Result<(), String> {
    match &output.path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Cannot create {}: {}", path.display(), e))?;
            let mut writer = BufWriter::new(file);
            serialize_to(&mut writer, value, output.pretty)?;
            tracing::info!("Wrote {}", path.display());
            Ok(())
        }
        None => serialize_to(&mut io::stdout().lock(), value, output.pretty),
    }
}

fn serialize_to<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), String> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    };
    result.map_err(|e| e.to_string())?;
    writeln!(writer).and_then(|_| writer.flush()).map_err(|e| e.to_string())
}
