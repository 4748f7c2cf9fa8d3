//! Session state: identity, cookies and referer.

use log::debug;
use reqwest::header::{HeaderMap, SET_COOKIE};

use super::cookies::CookieJar;
use crate::fetch::RequestHeaders;

/// Accumulated browsing state of one session.
///
/// The User-Agent is fixed at construction. Cookies only grow or get
/// overwritten, and `last_url` tracks the most recent response's request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    user_agent: String,
    cookies: CookieJar,
    last_url: Option<String>,
}

impl SessionState {
    /// Creates a fresh session with the given identity.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            cookies: CookieJar::new(),
            last_url: None,
        }
    }

    /// The session's User-Agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Cookies accumulated so far.
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// Request URL of the most recent response, if any.
    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    /// Synthesizes the per-request headers from the current state.
    ///
    /// User-Agent is always set. Cookie is present when any cookie is held,
    /// Referer when a previous response exists.
    pub fn build_headers(&self) -> RequestHeaders {
        RequestHeaders {
            user_agent: self.user_agent.clone(),
            cookie: self.cookies.header_value(),
            referer: self.last_url.clone(),
        }
    }

    /// Updates the state from a response to `request_url`.
    ///
    /// Every Set-Cookie header is merged in received order, later values
    /// overwriting earlier ones per name. Header values that are not valid
    /// strings are skipped.
    pub fn apply_response(&mut self, request_url: &str, headers: &HeaderMap) {
        for value in headers.get_all(SET_COOKIE) {
            match value.to_str() {
                Ok(raw) => self.cookies.merge_set_cookie(raw),
                Err(e) => debug!("Skipping non-text Set-Cookie header from {request_url}: {e}"),
            }
        }
        self.last_url = Some(request_url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn set_cookie_headers(values: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for value in values {
            headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
        }
        headers
    }

    #[test]
    fn test_fresh_session_headers() {
        let state = SessionState::new("agent/1.0");
        let headers = state.build_headers();
        assert_eq!(headers.user_agent, "agent/1.0");
        assert_eq!(headers.cookie, None);
        assert_eq!(headers.referer, None);
    }

    #[test]
    fn test_apply_response_sets_cookies_and_referer() {
        let mut state = SessionState::new("agent/1.0");
        state.apply_response(
            "http://www.example.com/",
            &set_cookie_headers(&["foo=bar;"]),
        );

        let headers = state.build_headers();
        assert_eq!(headers.cookie.as_deref(), Some("foo=bar"));
        assert_eq!(headers.referer.as_deref(), Some("http://www.example.com/"));
        assert_eq!(headers.user_agent, "agent/1.0");
    }

    #[test]
    fn test_multiple_set_cookie_headers_all_apply() {
        let mut state = SessionState::new("agent/1.0");
        state.apply_response(
            "http://www.example.com/login",
            &set_cookie_headers(&["sid=1; Path=/", "theme=dark; HttpOnly", "sid=2"]),
        );
        assert_eq!(state.cookies().get("sid"), Some("2"));
        assert_eq!(state.cookies().get("theme"), Some("dark"));
        assert_eq!(
            state.build_headers().cookie.as_deref(),
            Some("sid=2; theme=dark")
        );
    }

    #[test]
    fn test_response_without_cookies_keeps_jar() {
        let mut state = SessionState::new("agent/1.0");
        state.apply_response("http://a.test/", &set_cookie_headers(&["k=v"]));
        state.apply_response("http://a.test/next", &HeaderMap::new());
        assert_eq!(state.cookies().get("k"), Some("v"));
        assert_eq!(state.last_url(), Some("http://a.test/next"));
    }

    #[test]
    fn test_user_agent_never_changes() {
        let mut state = SessionState::new("agent/1.0");
        for i in 0..3 {
            state.apply_response(&format!("http://a.test/{i}"), &set_cookie_headers(&["k=v"]));
            assert_eq!(state.build_headers().user_agent, "agent/1.0");
        }
    }
}
