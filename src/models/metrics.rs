//! Measurement and per-instance result data models

use crate::types::Latency;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use chrono::{DateTime, Utc};

/// Timed outcome of one search query against one instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Measurement {
    /// Full response body received after `elapsed`
    Success {
        elapsed: Duration,
    },
    /// The request failed at any stage; the error text is kept for logs
    Unreachable {
        error: String,
    },
}

impl Measurement {
    /// Create a successful measurement
    pub fn success(elapsed: Duration) -> Self {
        Self::Success { elapsed }
    }

    /// Create a failed measurement
    pub fn unreachable<S: Into<String>>(error: S) -> Self {
        Self::Unreachable { error: error.into() }
    }

    /// Check if this measurement succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Elapsed time for successful measurements
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Success { elapsed } => Some(*elapsed),
            Self::Unreachable { .. } => None,
        }
    }

    /// Error text for failed measurements
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Unreachable { error } => Some(error),
        }
    }

    /// Elapsed seconds, infinite when unreachable
    pub fn as_secs_or_infinity(&self) -> f64 {
        self.elapsed().map_or(f64::INFINITY, |d| d.as_secs_f64())
    }
}

/// Result of probing one instance with every query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointResult {
    /// Instance base URL
    pub endpoint: String,

    /// One measurement per query, in query order
    pub measurements: Vec<Measurement>,

    /// Mean latency across all measurements
    pub mean: Latency,

    /// When the probe was admitted through the gate
    pub started_at: DateTime<Utc>,

    /// When the last query finished
    pub completed_at: DateTime<Utc>,
}

impl EndpointResult {
    /// Build a result, deriving the mean from the measurements
    pub fn new(
        endpoint: String,
        measurements: Vec<Measurement>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let mean = crate::stats::mean_latency(&measurements);
        Self {
            endpoint,
            measurements,
            mean,
            started_at,
            completed_at,
        }
    }

    /// Check if every query succeeded
    pub fn is_reachable(&self) -> bool {
        self.mean.is_reachable()
    }

    /// Number of successful measurements
    pub fn success_count(&self) -> usize {
        self.measurements.iter().filter(|m| m.is_success()).count()
    }

    /// Number of failed measurements
    pub fn failure_count(&self) -> usize {
        self.measurements.len() - self.success_count()
    }

    /// First recorded error, if any
    pub fn first_error(&self) -> Option<&str> {
        self.measurements.iter().find_map(|m| m.error())
    }
}
