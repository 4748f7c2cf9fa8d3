//! Per-session diagnostic output.
//!
//! Diagnostics are gated by the session's `LogLevel`. In `Quiet` mode they go
//! to the `log` facade at debug level only; in `Verbose` mode they go to the
//! configured sink, or to `log::info!` when none is configured.

use std::fmt;

use log::{debug, info};

use crate::config::{DiagnosticSink, LogLevel};

/// Diagnostic gate of one session.
#[derive(Clone, Default)]
pub struct Diagnostics {
    level: LogLevel,
    sink: Option<DiagnosticSink>,
}

impl Diagnostics {
    /// Creates a gate with the given level and optional sink.
    pub fn new(level: LogLevel, sink: Option<DiagnosticSink>) -> Self {
        Self { level, sink }
    }

    /// The configured level.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Emits one diagnostic message.
    pub fn emit(&self, message: &str) {
        match (self.level, &self.sink) {
            (LogLevel::Quiet, _) => debug!("{message}"),
            (LogLevel::Verbose, Some(sink)) => sink(message),
            (LogLevel::Verbose, None) => info!("{message}"),
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("level", &self.level)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
