//! CSS selector parsing utilities.

use std::sync::LazyLock;

use log::warn;
use scraper::Selector;

/// Matches no element. Stands in for caller selectors that fail to parse.
static MATCH_NOTHING: LazyLock<Selector> =
    LazyLock::new(|| parse_static_selector("*:not(*)", "MATCH_NOTHING"));

/// Parses a caller-supplied CSS selector.
///
/// An invalid selector is logged and replaced by one that matches nothing, so
/// a bad query yields an empty result instead of an error.
pub fn parse_query_selector(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| {
        warn!("Invalid CSS selector '{selector}', matching nothing: {e}");
        MATCH_NOTHING.clone()
    })
}

/// Parses a selector written into the library itself.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_static_selector(selector: &str, name: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| {
        panic!("Static selector {name} ('{selector}') does not parse: {e}. This is a programming error.")
    })
}
