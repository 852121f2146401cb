//! Logging infrastructure: structured response logging.
//!
//! Provides [`JsonlResponseLogger`], a JSONL file writer that implements
//! the [`ResponseLogger`](survey_application::ResponseLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlResponseLogger;
