//! Tracing subscriber setup and timing helpers.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! messages the driver prints for the user.

use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "AMBERLINK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs the global `tracing` subscriber.
///
/// The filter is read from `AMBERLINK_LOG` (e.g. `amberlink=debug`) and
/// defaults to `warn`. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Simple span timing helper.
#[derive(Debug)]
pub struct SpanTimer {
    start: Instant,
    name: String,
}

impl SpanTimer {
    /// Starts a new span timer.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the span name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finishes the span and returns the duration.
    #[must_use]
    pub fn finish(self) -> f64 {
        tracing::debug!(span_name = %self.name, duration_ms = self.elapsed_ms(), "Span finished");
        self.elapsed_ms()
    }
}
