//! Port for structured response logging.
//!
//! Defines the [`ResponseLogger`] trait for recording every prompt and raw
//! model reply to a machine-readable log (JSONL), separate from the
//! human-readable `tracing` output.

use serde_json::Value;

/// A structured simulation event for logging.
pub struct ResponseEvent {
    /// Event type identifier (e.g. "model_response", "model_error").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ResponseEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging simulation events.
///
/// `log` is synchronous and infallible; write failures are swallowed by
/// the implementation.
pub trait ResponseLogger: Send + Sync {
    fn log(&self, event: ResponseEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoResponseLogger;

impl ResponseLogger for NoResponseLogger {
    fn log(&self, _event: ResponseEvent) {}
}
