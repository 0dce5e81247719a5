//! Roster crawler
//!
//! Combines a [`PageSource`] with the parsers: resolves the team directory,
//! fetches single rosters, and walks each team's season chain backwards until a
//! season page no longer links to its predecessor.

use crate::client::{ClientConfig, PageSource, RosterClient};
use crate::error::{Result, RosterError};
use crate::parser::{has_predecessor_link, parse_roster, parse_team_directory};
use crate::types::{
    CrawlReport, CurrentRosters, Roster, SeasonYear, TeamDirectory, TeamHistory, WalkFailure,
};
use crate::urls::{absolute_url, predecessor_path, season_from_url};

/// Where a team's walk currently is
enum WalkState {
    Fetching {
        url: String,
    },
    Extracting {
        url: String,
        year: SeasonYear,
        html: String,
    },
    CheckPredecessor {
        url: String,
        html: String,
    },
    Done,
}

/// Crawler for basketball-reference.com team rosters
///
/// Every request goes through the page source one at a time; there is no
/// parallel fetching.
///
/// # Example
/// ```no_run
/// use nba_rosters_core::RosterCrawler;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let crawler = RosterCrawler::new()?;
///     let directory = crawler.resolve_directory().await?;
///     let report = crawler.crawl_history(&directory).await;
///     println!("{} seasons collected", report.season_count());
///     Ok(())
/// }
/// ```
pub struct RosterCrawler<S = RosterClient> {
    source: S,
}

impl RosterCrawler<RosterClient> {
    /// Create a crawler backed by an HTTP client with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_source(RosterClient::new()?))
    }

    /// Create a crawler backed by an HTTP client with custom configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_source(RosterClient::with_config(config)?))
    }
}

impl<S: PageSource> RosterCrawler<S> {
    /// Create a crawler over any page source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Get a reference to the underlying page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the landing page and build the team directory.
    ///
    /// # Errors
    /// Any error here is fatal for a run: without a directory there is
    /// nothing to crawl.
    pub async fn resolve_directory(&self) -> Result<TeamDirectory> {
        let base_url = self.source.base_url();
        let html = self.source.fetch(base_url).await?;
        let directory = parse_team_directory(&html, base_url)?;
        tracing::info!("Found {} teams on {}", directory.len(), base_url);
        Ok(directory)
    }

    /// Fetch and parse the roster page at `url`.
    pub async fn fetch_roster(&self, url: &str) -> Result<Roster> {
        let html = self.source.fetch(url).await?;
        parse_roster(&html)
    }

    /// Fetch the current-season roster of every team in `directory`.
    ///
    /// Teams whose page fails to fetch or parse are logged and left out.
    pub async fn current_rosters(&self, directory: &TeamDirectory) -> CurrentRosters {
        let mut rosters = CurrentRosters::new();

        for (team, url) in directory {
            match self.fetch_roster(url).await {
                Ok(roster) => {
                    tracing::info!("{}: {} players", team, roster.len());
                    rosters.insert(team.clone(), roster);
                }
                Err(e) => tracing::warn!("Skipping {} ({}): {}", team, url, e),
            }
        }

        rosters
    }

    /// Walk one team's season chain starting at `start_url`.
    ///
    /// Each page is stored under the year in its URL. The walk continues to
    /// the page one year earlier only if the current page links to it by its
    /// exact path. A fetch or extraction failure ends the walk and is recorded
    /// in [`TeamHistory::failure`]; seasons collected before it are kept.
    pub async fn walk_team(&self, team: &str, start_url: &str) -> TeamHistory {
        tracing::info!("Walking season chain for {} from {}", team, start_url);

        let mut history = TeamHistory::default();
        let mut state = WalkState::Fetching {
            url: start_url.to_string(),
        };

        loop {
            state = match state {
                // The URL, not the page, is the source of truth for the season
                WalkState::Fetching { url } => match season_from_url(&url) {
                    None => self.stop(team, &mut history, RosterError::InvalidUrl(url)),
                    Some(year) => match self.source.fetch(&url).await {
                        Ok(html) => WalkState::Extracting { url, year, html },
                        Err(e) => self.stop(team, &mut history, e.into()),
                    },
                },
                WalkState::Extracting { url, year, html } => match parse_roster(&html) {
                    Ok(roster) => {
                        tracing::debug!("{} {}: {} players", team, year, roster.len());
                        history.seasons.insert(year, roster);
                        WalkState::CheckPredecessor { url, html }
                    }
                    Err(e) => {
                        tracing::warn!("Could not extract roster from {}", url);
                        self.stop(team, &mut history, e)
                    }
                },
                WalkState::CheckPredecessor { url, html } => match predecessor_path(&url) {
                    Some(path) if has_predecessor_link(&html, &path) => WalkState::Fetching {
                        url: absolute_url(self.source.base_url(), &path),
                    },
                    _ => WalkState::Done,
                },
                WalkState::Done => break,
            };
        }

        tracing::info!(
            "Finished {}: {} seasons, earliest {:?}",
            team,
            history.seasons.len(),
            history.earliest_season()
        );
        history
    }

    /// Walk every team in `directory`, one after another.
    ///
    /// Never fails as a whole: teams whose walk ended early keep the seasons
    /// collected so far and are listed in [`CrawlReport::failures`].
    pub async fn crawl_history(&self, directory: &TeamDirectory) -> CrawlReport {
        let mut report = CrawlReport::default();

        for (team, url) in directory {
            let history = self.walk_team(team, url).await;

            if let Some(error) = history.failure {
                report.failures.push(WalkFailure {
                    team: team.clone(),
                    seasons_collected: history.seasons.len(),
                    error,
                });
            }
            report.dataset.insert(team.clone(), history.seasons);
        }

        if !report.failures.is_empty() {
            tracing::warn!(
                "{} of {} team walks ended early",
                report.failures.len(),
                directory.len()
            );
        }

        report
    }

    /// Record the error that ends a walk.
    fn stop(&self, team: &str, history: &mut TeamHistory, error: RosterError) -> WalkState {
        tracing::warn!("Walk for {} stopped early: {}", team, error);
        history.failure = Some(error);
        WalkState::Done
    }
}
