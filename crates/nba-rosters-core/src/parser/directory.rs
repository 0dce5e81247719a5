//! Landing page parser
//!
//! The landing page carries a `div#teams` block with one table per conference.
//! Each body header cell of those tables holds one team link whose text is the
//! team code.

use crate::document::{first_within, select_within, text_of, Document, DocumentQuery};
use crate::error::{RosterError, Result};
use crate::types::TeamDirectory;
use crate::urls::absolute_url;

/// Id of the teams block on the landing page
const TEAMS_CONTAINER_ID: &str = "teams";

/// Parse the team directory from landing page HTML.
///
/// # Arguments
/// * `html` - Raw HTML content of the landing page
/// * `base_url` - Site base address prefixed to every team href
///
/// # Returns
/// * `Ok(TeamDirectory)` mapping link text to absolute roster URL
/// * `Err(RosterError::ElementNotFound)` if the teams block, its tables, or any
///   team link is missing
pub fn parse_team_directory(html: &str, base_url: &str) -> Result<TeamDirectory> {
    let document = Document::parse(html);

    let container = document
        .find_container_by_id(TEAMS_CONTAINER_ID)
        .ok_or_else(|| RosterError::ElementNotFound("div#teams".to_string()))?;

    let tables = select_within(container, "table")?;
    if tables.is_empty() {
        return Err(RosterError::ElementNotFound("div#teams table".to_string()));
    }

    let mut directory = TeamDirectory::new();

    for table in tables {
        for header in select_within(table, "tbody th")? {
            let Some(link) = first_within(header, "a[href]")? else {
                tracing::debug!("Skipping team header without link: {:?}", text_of(header));
                continue;
            };

            let code = text_of(link);
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            if code.is_empty() {
                continue;
            }

            let url = absolute_url(base_url, href);
            if let Some(previous) = directory.insert(code.clone(), url) {
                tracing::debug!("Team {} listed more than once, replacing {}", code, previous);
            }
        }
    }

    if directory.is_empty() {
        return Err(RosterError::ElementNotFound(
            "team links in div#teams".to_string(),
        ));
    }

    tracing::debug!("Resolved {} teams from landing page", directory.len());
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.basketball-reference.com";

    fn landing_page(tables: &str) -> String {
        format!(
            r#"<html><body>
                 <div id="header">Sports Reference</div>
                 <div id="teams"><div class="conferences">{}</div></div>
               </body></html>"#,
            tables
        )
    }

    #[test]
    fn test_parse_two_teams() {
        let html = landing_page(
            r#"<table id="confs_standings_E">
                 <thead><tr><th>Eastern</th></tr></thead>
                 <tbody><tr><th><a href="/teams/AAA/2024.html">AAA</a></th><td>50</td></tr></tbody>
               </table>
               <table id="confs_standings_W">
                 <thead><tr><th>Western</th></tr></thead>
                 <tbody><tr><th><a href="/teams/BBB/2024.html">BBB</a></th><td>40</td></tr></tbody>
               </table>"#,
        );

        let directory = parse_team_directory(&html, BASE).unwrap();

        let mut expected = TeamDirectory::new();
        expected.insert(
            "AAA".to_string(),
            format!("{}/teams/AAA/2024.html", BASE),
        );
        expected.insert(
            "BBB".to_string(),
            format!("{}/teams/BBB/2024.html", BASE),
        );
        assert_eq!(directory, expected);
    }

    #[test]
    fn test_parse_multiple_rows_per_conference() {
        let html = landing_page(
            r#"<table><tbody>
                 <tr><th><a href="/teams/BOS/2024.html">BOS</a></th></tr>
                 <tr><th><a href="/teams/NYK/2024.html">NYK</a></th></tr>
                 <tr><th><a href="/teams/MIL/2024.html">MIL</a></th></tr>
               </tbody></table>"#,
        );

        let directory = parse_team_directory(&html, BASE).unwrap();
        assert_eq!(directory.len(), 3);
        assert_eq!(
            directory.get("NYK").map(String::as_str),
            Some("https://www.basketball-reference.com/teams/NYK/2024.html")
        );
    }

    #[test]
    fn test_header_cells_outside_body_are_ignored() {
        let html = landing_page(
            r#"<table>
                 <thead><tr><th><a href="/leagues/NBA_2024.html">East</a></th></tr></thead>
                 <tbody><tr><th><a href="/teams/AAA/2024.html">AAA</a></th></tr></tbody>
               </table>"#,
        );

        let directory = parse_team_directory(&html, BASE).unwrap();
        assert_eq!(directory.keys().collect::<Vec<_>>(), vec!["AAA"]);
    }

    #[test]
    fn test_header_cell_without_link_is_skipped() {
        let html = landing_page(
            r#"<table><tbody>
                 <tr><th>Division</th></tr>
                 <tr><th><a href="/teams/AAA/2024.html">AAA</a></th></tr>
               </tbody></table>"#,
        );

        let directory = parse_team_directory(&html, BASE).unwrap();
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_duplicate_team_keeps_single_entry() {
        let html = landing_page(
            r#"<table><tbody><tr><th><a href="/teams/AAA/2024.html">AAA</a></th></tr></tbody></table>
               <table><tbody><tr><th><a href="/teams/AAA/2024.html">AAA</a></th></tr></tbody></table>"#,
        );

        let directory = parse_team_directory(&html, BASE).unwrap();
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_missing_teams_container_is_error() {
        let html = "<html><body><div id=\"content\"></div></body></html>";
        match parse_team_directory(html, BASE) {
            Err(RosterError::ElementNotFound(what)) => assert_eq!(what, "div#teams"),
            other => panic!("Expected ElementNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_teams_container_without_tables_is_error() {
        let html = landing_page("<p>No standings yet</p>");
        assert!(matches!(
            parse_team_directory(&html, BASE),
            Err(RosterError::ElementNotFound(_))
        ));
    }

    #[test]
    fn test_tables_without_links_is_error() {
        let html = landing_page("<table><tbody><tr><th>Nothing</th></tr></tbody></table>");
        assert!(matches!(
            parse_team_directory(&html, BASE),
            Err(RosterError::ElementNotFound(_))
        ));
    }
}
