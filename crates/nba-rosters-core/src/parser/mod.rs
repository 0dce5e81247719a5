//! HTML parsers for basketball-reference.com pages
//!
//! - `directory`: landing page to team directory
//! - `roster`: season page to ordered player records
//! - `season`: predecessor-link detection on a season page

pub mod directory;
pub mod roster;
pub mod season;

pub use directory::parse_team_directory;
pub use roster::parse_roster;
pub use season::has_predecessor_link;
