//! session_scraper library: stateful fetch-and-parse HTTP client
//!
//! This library fetches web pages the way a single browser tab would: it keeps
//! one User-Agent for the whole session, carries cookies from one response to
//! the next request, and sends the previous URL as the referer. Every response
//! body is parsed into a `Document` that can be queried with CSS selectors.
//!
//! Optional collaborators:
//! - an output directory that receives one JSON record per exchange
//! - an input directory of such records that replaces the network
//! - a `CacheStore` behind `CachedFetcher` that answers repeated GETs
//!
//! # Example
//!
//! ```no_run
//! use session_scraper::{form, Fetcher, Scraper, ScraperOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scraper = Scraper::with_options(ScraperOptions {
//!     user_agent: Some("my-agent/1.0".to_string()),
//!     ..Default::default()
//! })?;
//!
//! let home = scraper.get("http://www.example.com/").await?;
//! println!("{}", home.document.title().unwrap_or_default());
//!
//! // Cookies set by the home page are sent with the form submission
//! let results = scraper
//!     .post("http://www.example.com/results.php", form(&[("q", "rust")]))
//!     .await?;
//! println!("{}", results.document.text("h1"));
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod session;
mod user_agent;
mod utils;

// Re-export public API
pub use app::validate_and_normalize_url;
pub use cache::{CacheEntry, CacheLookup, CacheStore, CachedFetcher, DirectoryCache, MemoryCache};
pub use config::{
    BodyDecoder, DiagnosticSink, LogFilter, LogFormat, LogLevel, PersistPolicy, ScraperOptions,
    USER_AGENTS,
};
pub use diagnostics::Diagnostics;
pub use error_handling::{
    InitializationError, PersistenceError, ScraperError, TransportError, TransportErrorKind,
};
pub use export::{ExchangeRecord, FixtureTransport, RecordWriter};
pub use fetch::{
    form, Document, FetchResult, Fetcher, FormBody, HttpTransport, Method, RawResponse, Request,
    RequestDescriptor, RequestHeaders, ResponseMeta, Scraper, Transport,
};
pub use initialization::{init_client, init_logger_with};
pub use session::{parse_set_cookie, CookieJar, SessionState};
pub use user_agent::random_user_agent;
