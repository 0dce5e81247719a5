//! Roster URL convention
//!
//! Season pages live at `/teams/{code}/{year}.html`. The walker relies on this
//! pattern to derive predecessor pages, so every piece of URL knowledge is kept
//! in this module.

use crate::types::{SeasonYear, TeamCode};

/// Build the site-relative path of a team's roster page for a season.
///
/// # Examples
/// ```
/// use nba_rosters_core::urls::roster_path;
///
/// assert_eq!(roster_path("BOS", 2024), "/teams/BOS/2024.html");
/// ```
pub fn roster_path(team: &str, year: SeasonYear) -> String {
    format!("/teams/{}/{:04}.html", team, year)
}

/// Split a roster URL (absolute or site-relative) into team code and season year.
///
/// The year is the 4-digit number embedded in the URL, never the page content.
///
/// # Examples
/// ```
/// use nba_rosters_core::urls::parse_roster_url;
///
/// assert_eq!(
///     parse_roster_url("https://www.basketball-reference.com/teams/LAL/1999.html"),
///     Some(("LAL".to_string(), 1999))
/// );
/// assert_eq!(parse_roster_url("/players/j/jamesle01.html"), None);
/// ```
pub fn parse_roster_url(url: &str) -> Option<(TeamCode, SeasonYear)> {
    let re = regex_lite::Regex::new(r"/teams/([A-Za-z0-9]+)/(\d{4})\.html").ok()?;
    let caps = re.captures(url)?;
    let team = caps.get(1)?.as_str().to_string();
    let year = caps.get(2)?.as_str().parse().ok()?;
    Some((team, year))
}

/// Season year embedded in a roster URL.
pub fn season_from_url(url: &str) -> Option<SeasonYear> {
    parse_roster_url(url).map(|(_, year)| year)
}

/// Team code embedded in a roster URL.
pub fn team_from_url(url: &str) -> Option<TeamCode> {
    parse_roster_url(url).map(|(team, _)| team)
}

/// Path of the season page before the one at `url`.
///
/// Returns `None` when `url` is not a roster URL or the year cannot go lower.
///
/// # Examples
/// ```
/// use nba_rosters_core::urls::predecessor_path;
///
/// assert_eq!(
///     predecessor_path("https://www.basketball-reference.com/teams/BOS/2024.html"),
///     Some("/teams/BOS/2023.html".to_string())
/// );
/// ```
pub fn predecessor_path(url: &str) -> Option<String> {
    let (team, year) = parse_roster_url(url)?;
    let previous = year.checked_sub(1)?;
    Some(roster_path(&team, previous))
}

/// Join the site base address and a site-relative href.
///
/// Hrefs that are already absolute are returned unchanged.
pub fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    let base = base.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        format!("{}/{}", base, href)
    }
}
