//! Browsing session state.
//!
//! This module provides:
//! - `CookieJar`: insertion-ordered cookie storage
//! - `parse_set_cookie`: Set-Cookie header parsing
//! - `SessionState`: identity, cookies and referer, plus the header synthesis
//!   and response merge rules that tie them to requests

mod cookies;
mod state;

pub use cookies::{parse_set_cookie, CookieJar};
pub use state::SessionState;
