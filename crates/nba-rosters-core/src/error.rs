//! Error types for the roster crawler
//!
//! Fetch failures and structural extraction failures are distinct variants so
//! callers can tell a dead page from a page whose layout changed.
//! RosterError implements Serialize so crawl reports can carry it as JSON.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a single page fetch failed
#[derive(Error, Debug)]
pub enum FetchCause {
    /// Connection, DNS, TLS, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

/// A failed GET for one page
#[derive(Error, Debug)]
#[error("failed to fetch {url}: {cause}")]
pub struct FetchError {
    /// Address that was requested
    pub url: String,
    /// Classified cause
    #[source]
    pub cause: FetchCause,
}

impl FetchError {
    pub fn transport(url: impl Into<String>, err: reqwest::Error) -> Self {
        Self {
            url: url.into(),
            cause: FetchCause::Transport(err),
        }
    }

    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            cause: FetchCause::HttpStatus(status),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self.cause {
            FetchCause::HttpStatus(code) => Some(code),
            FetchCause::Transport(_) => None,
        }
    }
}

/// Error type for roster crawler operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// A page could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Failed to parse HTML or a selector
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Required HTML container was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A roster row lacks one of the expected cells
    #[error("Roster row {row} is missing the '{column}' cell")]
    MissingCell { row: usize, column: String },

    /// URL does not follow the /teams/{code}/{year}.html convention
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RosterError {
    /// True for errors raised while reading page structure rather than fetching it.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            RosterError::ElementNotFound(_) | RosterError::MissingCell { .. }
        )
    }
}

/// Serialize RosterError as its display string
impl Serialize for RosterError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for roster crawler operations
pub type Result<T> = std::result::Result<T, RosterError>;
