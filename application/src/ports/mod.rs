//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod progress;
pub mod provider_client;
pub mod response_logger;
pub mod result_sink;
