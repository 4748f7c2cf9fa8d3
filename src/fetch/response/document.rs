//! Queryable HTML document.

use std::fmt;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::utils::{parse_query_selector, parse_static_selector};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_static_selector("title", "TITLE_SELECTOR"));

/// A parsed response body, queried with CSS selectors.
///
/// Parsing never fails: malformed markup and non-HTML bodies yield a
/// best-effort (possibly empty) tree.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses `body` as an HTML document.
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// The underlying `scraper` tree, for queries this type does not cover.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Every element matching `selector`, in document order.
    ///
    /// An invalid selector is logged and matches nothing.
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        let parsed = parse_query_selector(selector);
        self.html.select(&parsed).collect()
    }

    /// Combined text of every element matching `selector`.
    pub fn text(&self, selector: &str) -> String {
        self.select(selector)
            .into_iter()
            .flat_map(|element| element.text())
            .collect()
    }

    /// Value of attribute `name` on the first element matching `selector`.
    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        self.select(selector)
            .into_iter()
            .find_map(|element| element.value().attr(name).map(str::to_string))
    }

    /// Trimmed `<title>` text, if the document has one.
    pub fn title(&self) -> Option<String> {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title> Results </title></head><body>
        <h1>Hello, World!</h1>
        <ul><li class="item">one</li><li class="item">two</li></ul>
        <a id="next" href="/page/2">next</a>
        </body></html>"#;

    #[test]
    fn test_text_concatenates_matches() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.text("h1"), "Hello, World!");
        assert_eq!(doc.text("li.item"), "onetwo");
        assert_eq!(doc.select("li.item").len(), 2);
    }

    #[test]
    fn test_attr_and_title() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.attr("a#next", "href").as_deref(), Some("/page/2"));
        assert_eq!(doc.attr("a#next", "rel"), None);
        assert_eq!(doc.title().as_deref(), Some("Results"));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = Document::parse(PAGE);
        assert!(doc.select("li[").is_empty());
        assert_eq!(doc.text("li["), "");
    }

    #[test]
    fn test_malformed_and_plain_bodies_degrade() {
        let doc = Document::parse("<div><p>unclosed <b>tags");
        assert_eq!(doc.text("b"), "tags");

        let doc = Document::parse("Hello, World!");
        assert_eq!(doc.title(), None);
        assert_eq!(doc.text("body"), "Hello, World!");

        let doc = Document::parse("");
        assert!(doc.select("p").is_empty());
    }
}
