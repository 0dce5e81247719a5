//! Season chain detection
//!
//! A season page links to the previous season's page when the franchise has
//! one. The link is found by its exact site-relative href, never by its label.

use crate::document::{Document, DocumentQuery};

/// Whether `html` contains a link whose href is exactly `predecessor_path`.
///
/// # Examples
/// ```
/// use nba_rosters_core::parser::has_predecessor_link;
///
/// let html = r#"<a href="/teams/BOS/2023.html">Previous Season</a>"#;
/// assert!(has_predecessor_link(html, "/teams/BOS/2023.html"));
/// assert!(!has_predecessor_link(html, "/teams/BOS/2022.html"));
/// ```
pub fn has_predecessor_link(html: &str, predecessor_path: &str) -> bool {
    !Document::parse(html)
        .find_links_with_href(predecessor_path)
        .is_empty()
}
