//! Roster table parser
//!
//! Season pages carry a `table#roster` whose cells are keyed by a stable
//! `data-stat` attribute. Rows are read in document order.

use scraper::ElementRef;

use crate::document::{first_within, select_within, text_of, Document, DocumentQuery};
use crate::error::{RosterError, Result};
use crate::types::{PlayerRecord, Roster};

/// Id of the roster table on a season page
const ROSTER_TABLE_ID: &str = "roster";

const PLAYER: &str = "player";
const POSITION: &str = "pos";
const HEIGHT: &str = "height";
const WEIGHT: &str = "weight";
const BIRTH_DATE: &str = "birth_date";

/// Parse the roster table from a season page.
///
/// # Arguments
/// * `html` - Raw HTML content of a team season page
///
/// # Returns
/// * `Ok(Roster)` with one record per player row, in row order
/// * `Err(RosterError::ElementNotFound)` if the roster table or its body is missing
/// * `Err(RosterError::MissingCell)` if any player row lacks an expected cell
pub fn parse_roster(html: &str) -> Result<Roster> {
    let document = Document::parse(html);

    let table = document
        .find_container_by_id(ROSTER_TABLE_ID)
        .filter(|el| el.value().name() == "table")
        .ok_or_else(|| RosterError::ElementNotFound("table#roster".to_string()))?;

    let body = first_within(table, "tbody")?
        .ok_or_else(|| RosterError::ElementNotFound("table#roster tbody".to_string()))?;

    let mut roster = Vec::new();
    let mut row_number = 0;

    for row in select_within(body, "tr")? {
        // Repeated header rows inside the body are not players
        if row.value().classes().any(|class| class == "thead") {
            continue;
        }
        row_number += 1;
        roster.push(parse_player_row(row, row_number)?);
    }

    Ok(roster)
}

/// Parse one roster row into a player record.
///
/// `row_number` is 1-based and only used in error messages.
fn parse_player_row(row: ElementRef<'_>, row_number: usize) -> Result<PlayerRecord> {
    let cells = select_within(row, "th[data-stat], td[data-stat]")?;

    let name = first_within(cell(&cells, PLAYER, row_number)?, "a")?
        .map(text_of)
        .ok_or_else(|| missing(row_number, PLAYER))?;

    Ok(PlayerRecord {
        name,
        position: text_of(cell(&cells, POSITION, row_number)?),
        height: text_of(cell(&cells, HEIGHT, row_number)?),
        weight: text_of(cell(&cells, WEIGHT, row_number)?),
        birthdate: text_of(cell(&cells, BIRTH_DATE, row_number)?),
    })
}

/// Cell of a row keyed by its `data-stat` attribute.
fn cell<'a>(cells: &[ElementRef<'a>], key: &str, row_number: usize) -> Result<ElementRef<'a>> {
    cells
        .iter()
        .copied()
        .find(|c| c.value().attr("data-stat") == Some(key))
        .ok_or_else(|| missing(row_number, key))
}

fn missing(row: usize, column: &str) -> RosterError {
    RosterError::MissingCell {
        row,
        column: column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, pos: &str, height: &str, weight: &str, born: &str) -> String {
        format!(
            r#"<tr>
                 <th data-stat="number">0</th>
                 <td data-stat="player" csk="x"><a href="/players/x/x01.html">{}</a></td>
                 <td data-stat="pos">{}</td>
                 <td data-stat="height">{}</td>
                 <td data-stat="weight">{}</td>
                 <td data-stat="birth_date" csk="20000101">{}</td>
                 <td data-stat="birth_country"><span>us</span></td>
                 <td data-stat="years_experience">3</td>
               </tr>"#,
            name, pos, height, weight, born
        )
    }

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body><div id="all_roster">
                 <table id="roster" class="sortable stats_table">
                   <thead><tr><th data-stat="number">No.</th><th data-stat="player">Player</th></tr></thead>
                   <tbody>{}</tbody>
                 </table>
               </div></body></html>"#,
            rows
        )
    }

    #[test]
    fn test_parse_roster_preserves_row_order() {
        let html = page(&format!(
            "{}{}{}",
            row("Zed Zulu", "C", "7-1", "260", "May 5, 1995"),
            row("Al Alpha", "PG", "6-1", "180", "June 1, 2001"),
            row("Mo Mid", "SF", "6-7", "220", "July 9, 1999"),
        ));

        let roster = parse_roster(&html).unwrap();
        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zed Zulu", "Al Alpha", "Mo Mid"]);
    }

    #[test]
    fn test_parse_roster_fields_are_raw_cell_text() {
        let html = page(&row("Jane Doe", "G-F", "6-5", "205", "March 4, 1998"));

        let roster = parse_roster(&html).unwrap();
        assert_eq!(
            roster,
            vec![PlayerRecord {
                name: "Jane Doe".to_string(),
                position: "G-F".to_string(),
                height: "6-5".to_string(),
                weight: "205".to_string(),
                birthdate: "March 4, 1998".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_roster_name_ignores_annotations_outside_anchor() {
        let html = page(
            r#"<tr>
                 <td data-stat="player"><a href="/players/d/doe01.html">John Doe</a> (TW)</td>
                 <td data-stat="pos">PF</td>
                 <td data-stat="height">6-9</td>
                 <td data-stat="weight">230</td>
                 <td data-stat="birth_date">April 2, 2002</td>
               </tr>"#,
        );

        let roster = parse_roster(&html).unwrap();
        assert_eq!(roster[0].name, "John Doe");
    }

    #[test]
    fn test_parse_roster_empty_cells_pass_through() {
        let html = page(&row("Old Timer", "F", "", "", ""));

        let roster = parse_roster(&html).unwrap();
        assert_eq!(roster[0].height, "");
        assert_eq!(roster[0].birthdate, "");
    }

    #[test]
    fn test_parse_roster_skips_repeated_header_rows() {
        let html = page(&format!(
            r#"{}<tr class="thead"><th data-stat="number">No.</th></tr>{}"#,
            row("A", "C", "7-0", "250", "x"),
            row("B", "C", "7-0", "250", "y"),
        ));

        assert_eq!(parse_roster(&html).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_roster_empty_body() {
        assert!(parse_roster(&page("")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_roster_is_deterministic() {
        let html = page(&format!(
            "{}{}",
            row("A", "C", "7-0", "250", "x"),
            row("B", "PG", "6-0", "180", "y"),
        ));

        let first = parse_roster(&html).unwrap();
        let second = parse_roster(&html).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_parse_roster_missing_cell_fails_table() {
        let html = page(&format!(
            r#"{}<tr>
                 <td data-stat="player"><a href="/p">No Height</a></td>
                 <td data-stat="pos">C</td>
                 <td data-stat="weight">250</td>
                 <td data-stat="birth_date">x</td>
               </tr>"#,
            row("Fine", "C", "7-0", "250", "x"),
        ));

        match parse_roster(&html) {
            Err(RosterError::MissingCell { row, column }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "height");
            }
            other => panic!("Expected MissingCell, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_roster_player_without_anchor_fails() {
        let html = page(
            r#"<tr>
                 <td data-stat="player">Unlinked Player</td>
                 <td data-stat="pos">C</td>
                 <td data-stat="height">7-0</td>
                 <td data-stat="weight">250</td>
                 <td data-stat="birth_date">x</td>
               </tr>"#,
        );

        assert!(matches!(
            parse_roster(&html),
            Err(RosterError::MissingCell { row: 1, ref column }) if column == "player"
        ));
    }

    #[test]
    fn test_parse_roster_missing_table() {
        let html = "<html><body><table id=\"per_game\"><tbody></tbody></table></body></html>";
        match parse_roster(html) {
            Err(RosterError::ElementNotFound(what)) => assert_eq!(what, "table#roster"),
            other => panic!("Expected ElementNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_roster_id_on_non_table_is_missing() {
        let html = "<html><body><div id=\"roster\"></div></body></html>";
        assert!(matches!(
            parse_roster(html),
            Err(RosterError::ElementNotFound(_))
        ));
    }
}
