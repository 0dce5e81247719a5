//! Narrow query layer over parsed HTML
//!
//! Parsers only need three lookups: a container by id, elements by tag, and
//! links by exact href. `DocumentQuery` names those, and `Document` implements
//! them on top of `scraper::Html`.

use scraper::{ElementRef, Html, Selector};

use crate::error::{RosterError, Result};

/// Lookups the page parsers depend on
pub trait DocumentQuery {
    /// Element whose `id` attribute equals `id`.
    fn find_container_by_id(&self, id: &str) -> Option<ElementRef<'_>>;

    /// All elements with the given tag name, in document order.
    fn find_all_of_tag(&self, tag: &str) -> Result<Vec<ElementRef<'_>>>;

    /// All anchors whose `href` is exactly `href`.
    fn find_links_with_href(&self, href: &str) -> Vec<ElementRef<'_>>;
}

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }
}

impl DocumentQuery for Document {
    fn find_container_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        // Ids are compared directly so odd characters never reach the CSS parser
        let any = Selector::parse("[id]").ok()?;
        self.html
            .select(&any)
            .find(|el| el.value().attr("id") == Some(id))
    }

    fn find_all_of_tag(&self, tag: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = selector(tag)?;
        Ok(self.html.select(&selector).collect())
    }

    fn find_links_with_href(&self, href: &str) -> Vec<ElementRef<'_>> {
        let Ok(anchors) = Selector::parse("a[href]") else {
            return Vec::new();
        };
        self.html
            .select(&anchors)
            .filter(|el| el.value().attr("href") == Some(href))
            .collect()
    }
}

/// Compile a CSS selector, mapping failures to `ParseError`.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| RosterError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}

/// Descendants of `scope` matching `css`, in document order.
pub fn select_within<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).collect())
}

/// First descendant of `scope` matching `css`.
pub fn first_within<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).next())
}

/// Trimmed text content of an element.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div id="teams">
            <table><tr><th><a href="/teams/AAA/2024.html">AAA</a></th></tr></table>
            <table><tr><th><a href="/teams/BBB/2024.html">BBB</a></th></tr></table>
          </div>
          <p><a href="/teams/AAA/2023.html">Previous Season</a></p>
          <p><a href="/teams/AAA/2023.html#roster">Roster</a></p>
        </body></html>
    "#;

    #[test]
    fn test_find_container_by_id() {
        let doc = Document::parse(PAGE);
        let teams = doc.find_container_by_id("teams").unwrap();
        assert_eq!(teams.value().name(), "div");
        assert!(doc.find_container_by_id("missing").is_none());
    }

    #[test]
    fn test_find_all_of_tag_in_document_order() {
        let doc = Document::parse(PAGE);
        let links: Vec<String> = doc
            .find_all_of_tag("th")
            .unwrap()
            .into_iter()
            .map(text_of)
            .collect();
        assert_eq!(links, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_find_links_with_href_is_exact() {
        let doc = Document::parse(PAGE);
        let links = doc.find_links_with_href("/teams/AAA/2023.html");
        assert_eq!(links.len(), 1);
        assert_eq!(text_of(links[0]), "Previous Season");
        assert!(doc.find_links_with_href("/teams/AAA/2022.html").is_empty());
    }

    #[test]
    fn test_select_within_scope() {
        let doc = Document::parse(PAGE);
        let teams = doc.find_container_by_id("teams").unwrap();
        assert_eq!(select_within(teams, "table").unwrap().len(), 2);
        assert_eq!(select_within(teams, "p").unwrap().len(), 0);
        let first = first_within(teams, "a").unwrap().unwrap();
        assert_eq!(first.value().attr("href"), Some("/teams/AAA/2024.html"));
    }

    #[test]
    fn test_invalid_selector_is_parse_error() {
        let doc = Document::parse(PAGE);
        assert!(matches!(
            doc.find_all_of_tag("[[["),
            Err(RosterError::ParseError(_))
        ));
    }
}
