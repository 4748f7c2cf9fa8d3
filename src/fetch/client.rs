//! The session-aware base fetcher.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use log::{debug, warn};

use super::request::RequestDescriptor;
use super::response::{FetchResult, ResponseMeta};
use super::transport::{HttpTransport, Transport};
use super::{Fetcher, Request};
use crate::config::{BodyDecoder, PersistPolicy, ScraperOptions};
use crate::diagnostics::Diagnostics;
use crate::error_handling::{InitializationError, ScraperError};
use crate::export::{ExchangeRecord, FixtureTransport, RecordWriter};
use crate::initialization::init_client;
use crate::session::SessionState;
use crate::user_agent::resolve_user_agent;

/// A browsing session: fetches pages while carrying cookies, referer and a
/// fixed User-Agent from one request to the next.
///
/// Calls may run concurrently on one `Scraper`. The session lock is only held
/// while building headers and while merging a response, never across the
/// network round trip, so concurrent responses merge their cookies in
/// completion order.
///
/// # Example
///
/// ```no_run
/// use session_scraper::{Fetcher, Scraper};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let scraper = Scraper::new()?;
/// let page = scraper.get("http://www.example.com/").await?;
/// println!("{} {}", page.response.status, page.document.text("h1"));
/// # Ok(())
/// # }
/// ```
pub struct Scraper {
    state: Mutex<SessionState>,
    transport: Arc<dyn Transport>,
    diagnostics: Diagnostics,
    recorder: Option<RecordWriter>,
    body_decoder: Option<BodyDecoder>,
    persist_policy: PersistPolicy,
}

impl Scraper {
    /// Creates a session with default options and a random User-Agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, InitializationError> {
        Self::with_options(ScraperOptions::default())
    }

    /// Creates a session from `options`.
    ///
    /// Requests go to the network, or to the fixture records of
    /// `options.input` when it is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, the output
    /// directory cannot be created, or the fixture directory cannot be loaded.
    pub fn with_options(options: ScraperOptions) -> Result<Self, InitializationError> {
        let transport: Arc<dyn Transport> = match &options.input {
            Some(dir) => Arc::new(FixtureTransport::load(dir)?),
            None => Arc::new(HttpTransport::new(init_client(options.timeout_seconds)?)),
        };
        Self::with_transport(options, transport)
    }

    /// Creates a session that executes requests through `transport`.
    ///
    /// `options.input` and `options.timeout_seconds` are ignored; the
    /// transport decides where responses come from.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created.
    pub fn with_transport(
        options: ScraperOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, InitializationError> {
        let user_agent = resolve_user_agent(options.user_agent.as_deref());
        let diagnostics = Diagnostics::new(options.log_level, options.logger.clone());
        diagnostics.emit(&format!("Using User-Agent: {user_agent}"));

        let recorder = options
            .output
            .as_ref()
            .map(|dir| RecordWriter::create(dir.clone()))
            .transpose()?;

        Ok(Self {
            state: Mutex::new(SessionState::new(user_agent)),
            transport,
            diagnostics,
            recorder,
            body_decoder: options.body_decoder,
            persist_policy: options.persist_policy,
        })
    }

    /// The User-Agent sent on every request of this session.
    pub fn user_agent(&self) -> String {
        self.lock_state().user_agent().to_string()
    }

    /// A snapshot of the current session state.
    pub fn session(&self) -> SessionState {
        self.lock_state().clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn decode_body(&self, bytes: &[u8]) -> String {
        match &self.body_decoder {
            Some(decode) => decode(bytes),
            None => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

#[async_trait]
impl Fetcher for Scraper {
    async fn fetch(&self, request: Request) -> Result<FetchResult, ScraperError> {
        let headers = self.lock_state().build_headers();
        let descriptor = RequestDescriptor {
            url: request.url,
            method: request.method,
            form: request.form,
            headers,
        };

        self.diagnostics.emit(&format!(
            "{} {} cookie: {}",
            descriptor.method,
            descriptor.url,
            descriptor.headers.cookie.as_deref().unwrap_or_default()
        ));

        let raw = match self.transport.execute(&descriptor).await {
            Ok(raw) => raw,
            Err(e) => {
                self.diagnostics.emit(&format!(
                    "Response error for {} {} ({}): {e}",
                    descriptor.method,
                    descriptor.url,
                    e.kind()
                ));
                return Err(e.into());
            }
        };

        self.lock_state().apply_response(&descriptor.url, &raw.headers);
        self.diagnostics.emit(&format!(
            "{} {} -> {}",
            descriptor.method, descriptor.url, raw.status
        ));

        if let Some(recorder) = &self.recorder {
            let record = ExchangeRecord::from_exchange(&descriptor, &raw);
            match recorder.write(&record).await {
                Ok(path) => debug!("Saved exchange for {} to {}", descriptor.url, path.display()),
                Err(e) => {
                    self.diagnostics.emit(&format!("Error saving output: {e}"));
                    match self.persist_policy {
                        PersistPolicy::FailStrict => return Err(e.into()),
                        PersistPolicy::FailSafe => {
                            warn!("Exchange record for {} not saved: {e}", descriptor.url)
                        }
                    }
                }
            }
        }

        let body = self.decode_body(&raw.body);
        let response = ResponseMeta {
            status: raw.status,
            headers: raw.headers,
        };
        Ok(FetchResult::new(response, body))
    }

    fn persist_policy(&self) -> PersistPolicy {
        self.persist_policy
    }
}
