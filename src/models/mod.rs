//! Data models and structures for searx-ping

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{Measurement, EndpointResult};
