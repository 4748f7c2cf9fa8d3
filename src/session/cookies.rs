//! Cookie storage and Set-Cookie parsing.

use crate::config::COOKIE_ATTRIBUTES;

/// Insertion-ordered cookie name to value map.
///
/// Overwriting an existing name keeps its original position, so the serialized
/// Cookie header is stable for the same set of names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, overwriting in place when the name is already held.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value held for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of cookies held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Merges every cookie defined by one Set-Cookie header value.
    pub fn merge_set_cookie(&mut self, header: &str) {
        for (name, value) in parse_set_cookie(header) {
            self.set(name, value);
        }
    }

    /// Serializes the jar as a Cookie header value (`a=1; b=2`).
    ///
    /// Returns `None` when the jar is empty.
    pub fn header_value(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|(n, v)| format!("{n}={v}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Parses one Set-Cookie header value into `(name, value)` pairs.
///
/// Every `name=value` segment defines a cookie, except attribute names from
/// `COOKIE_ATTRIBUTES` and valueless flags. Within a single header the first
/// occurrence of a name wins. One pair of surrounding double quotes is stripped
/// from values.
///
/// # Examples
///
/// ```
/// use session_scraper::parse_set_cookie;
///
/// let pairs = parse_set_cookie("hello=world; foo=test; Path=/; HttpOnly");
/// assert_eq!(
///     pairs,
///     vec![
///         ("hello".to_string(), "world".to_string()),
///         ("foo".to_string(), "test".to_string()),
///     ]
/// );
/// ```
pub fn parse_set_cookie(header: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for segment in header.split(';') {
        let Some((name, value)) = segment.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || is_attribute(name) || pairs.iter().any(|(n, _)| n == name) {
            continue;
        }
        pairs.push((name.to_string(), unquote(value.trim()).to_string()));
    }
    pairs
}

fn is_attribute(name: &str) -> bool {
    COOKIE_ATTRIBUTES
        .iter()
        .any(|attr| attr.eq_ignore_ascii_case(name))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
