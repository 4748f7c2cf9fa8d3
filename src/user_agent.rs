//! User-Agent selection.
//!
//! A session's identity is either configured explicitly or drawn once from the
//! static `USER_AGENTS` pool when the session is constructed.

use rand::Rng;

use crate::config::USER_AGENTS;

/// Picks a User-Agent uniformly at random from `USER_AGENTS`.
pub fn random_user_agent() -> &'static str {
    let index = rand::rng().random_range(0..USER_AGENTS.len());
    USER_AGENTS[index]
}

/// Returns the configured User-Agent, or a random one from the pool.
///
/// # Arguments
///
/// * `configured` - Fixed User-Agent from the session options, if any
pub fn resolve_user_agent(configured: Option<&str>) -> String {
    match configured {
        Some(ua) => ua.to_string(),
        None => random_user_agent().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_agent_comes_from_pool() {
        for _ in 0..50 {
            let ua = random_user_agent();
            assert!(USER_AGENTS.contains(&ua));
            assert!(ua.starts_with("Mozilla/"));
        }
    }

    #[test]
    fn test_configured_user_agent_wins() {
        assert_eq!(
            resolve_user_agent(Some("foobar-agent 1.0")),
            "foobar-agent 1.0"
        );
    }

    #[test]
    fn test_unconfigured_user_agent_is_from_pool() {
        let ua = resolve_user_agent(None);
        assert!(USER_AGENTS.contains(&ua.as_str()));
    }

    #[test]
    fn test_pool_entries_are_valid_header_values() {
        for ua in USER_AGENTS {
            assert!(reqwest::header::HeaderValue::from_str(ua).is_ok(), "{ua}");
        }
    }
}
