//! NBA Rosters Core Library
//!
//! This crate crawls basketball-reference.com for NBA team rosters, both the
//! current season and every earlier season reachable through each team's
//! "previous season" links.
//!
//! # Features
//! - Resolve the team directory from the landing page
//! - Extract ordered player records from a season roster page
//! - Walk a team's season chain backwards until it ends
//! - Fixed-interval rate limiting, one request at a time

pub mod client;
pub mod crawler;
pub mod document;
pub mod error;
pub mod parser;
pub mod types;
pub mod urls;

// Re-export main types for convenience
pub use client::{ClientConfig, PageSource, RateLimiter, RosterClient};
pub use crawler::RosterCrawler;
pub use error::{FetchCause, FetchError, Result, RosterError};
pub use types::{
    CrawlReport, CurrentRosters, HistoricalDataset, PlayerRecord, Roster, SeasonYear, TeamCode,
    TeamDirectory, TeamHistory, WalkFailure,
};
