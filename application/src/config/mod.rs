//! Application-level configuration.
//!
//! - [`SimulationParams`]: generation settings and the inter-call delay
//! - [`RetryPolicy`]: bounded backoff for rate-limited provider calls

pub mod retry_policy;
pub mod simulation_params;

pub use retry_policy::RetryPolicy;
pub use simulation_params::SimulationParams;
