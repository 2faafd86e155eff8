//! Event sink trait and implementations.

use super::BuildEvent;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, Level};

/// Receives build lifecycle events.
///
/// Sinks never fail the build; a sink that cannot deliver an event logs
/// and drops it.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits `event` with an optional payload.
    async fn emit(&self, event: BuildEvent, data: Option<Value>);
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: BuildEvent, _data: Option<Value>) {}
}

/// Logs events through `tracing`.
#[derive(Debug, Clone)]
pub struct LoggingEventSink {
    level: Level,
}

impl Default for LoggingEventSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingEventSink {
    /// Creates a sink logging at `level`. Only `DEBUG` and `INFO` are
    /// distinguished; anything else logs at `INFO`.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub const fn debug() -> Self {
        Self::new(Level::DEBUG)
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn emit(&self, event: BuildEvent, data: Option<Value>) {
        if self.level == Level::DEBUG {
            debug!(event = %event, data = ?data, "Build event");
        } else {
            info!(event = %event, data = ?data, "Build event");
        }
    }
}

/// Records every event in memory, for tests.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: RwLock<Vec<(BuildEvent, Option<Value>)>>,
}

impl CollectingEventSink {
    /// Creates an empty collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events in order.
    #[must_use]
    pub fn events(&self) -> Vec<(BuildEvent, Option<Value>)> {
        self.events.read().clone()
    }

    /// Returns the collected event names in order.
    #[must_use]
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.read().iter().map(|(event, _)| event.as_str()).collect()
    }

    /// Returns the payloads of every occurrence of `event`.
    #[must_use]
    pub fn payloads(&self, event: BuildEvent) -> Vec<Option<Value>> {
        self.events
            .read()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, data)| data.clone())
            .collect()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

#[async_trait]
impl EventSink for CollectingEventSink {
    async fn emit(&self, event: BuildEvent, data: Option<Value>) {
        self.events.write().push((event, data));
    }
}
