//! Data types for the roster crawler
//!
//! Everything the crawler hands to its callers lives here. All types implement
//! Serialize and Deserialize so the CLI can emit them as JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Short franchise identifier, e.g. "BOS"
pub type TeamCode = String;

/// Ending year of a season, e.g. 2024 for 2023-24
pub type SeasonYear = u16;

/// Ordered roster for one team and season, in the site's listing order
pub type Roster = Vec<PlayerRecord>;

/// Team code to current-season roster URL
pub type TeamDirectory = BTreeMap<TeamCode, String>;

/// Team code to current-season roster (non-historical mode)
pub type CurrentRosters = BTreeMap<TeamCode, Roster>;

/// Team code to season year to roster
pub type HistoricalDataset = BTreeMap<TeamCode, BTreeMap<SeasonYear, Roster>>;

/// One player row from a roster table
///
/// Fields are the raw cell texts; nothing is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player name (anchor text of the player cell)
    pub name: String,
    /// Position, e.g. "PG"
    pub position: String,
    /// Height as listed, e.g. "6-3"
    pub height: String,
    /// Weight as listed, e.g. "190"
    pub weight: String,
    /// Birth date as listed, e.g. "March 4, 1998"
    pub birthdate: String,
}

/// Result of walking one team's season chain
#[derive(Debug, Default, Serialize)]
pub struct TeamHistory {
    /// Rosters collected before the walk ended
    pub seasons: BTreeMap<SeasonYear, Roster>,
    /// Error that ended the walk early, if it did not reach the earliest season
    pub failure: Option<RosterError>,
}

impl TeamHistory {
    /// Whether the walk reached a page without a predecessor link
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Oldest season collected
    pub fn earliest_season(&self) -> Option<SeasonYear> {
        self.seasons.keys().next().copied()
    }
}

/// A walk that ended early
#[derive(Debug, Serialize)]
pub struct WalkFailure {
    pub team: TeamCode,
    /// Seasons stored before the failure
    pub seasons_collected: usize,
    pub error: RosterError,
}

/// Everything a historical crawl produced
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    pub dataset: HistoricalDataset,
    pub failures: Vec<WalkFailure>,
}

impl CrawlReport {
    /// Total number of (team, season) rosters collected
    pub fn season_count(&self) -> usize {
        self.dataset.values().map(BTreeMap::len).sum()
    }
}
