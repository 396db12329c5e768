//! Type definitions and aliases

use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Aggregate latency of one instance.
///
/// `Unreachable` orders after every finite value, so a plain ascending sort
/// puts instances that failed at least once at the bottom of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Latency {
    /// Mean of all measurements; every query succeeded
    Finite(Duration),
    /// At least one query failed
    Unreachable,
}

impl Latency {
    /// Check whether the instance answered every query
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Latency as fractional seconds, `None` when unreachable
    pub fn as_secs_f64(&self) -> Option<f64> {
        match self {
            Self::Finite(duration) => Some(duration.as_secs_f64()),
            Self::Unreachable => None,
        }
    }

    /// Latency as seconds with unreachable mapped to positive infinity
    pub fn as_secs_or_infinity(&self) -> f64 {
        self.as_secs_f64().unwrap_or(f64::INFINITY)
    }

    /// Performance band, `None` when unreachable
    pub fn performance_level(&self) -> Option<PerformanceLevel> {
        match self {
            Self::Finite(duration) => Some(PerformanceLevel::from_duration(*duration)),
            Self::Unreachable => None,
        }
    }
}

impl Ord for Latency {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.cmp(b),
            (Self::Finite(_), Self::Unreachable) => Ordering::Less,
            (Self::Unreachable, Self::Finite(_)) => Ordering::Greater,
            (Self::Unreachable, Self::Unreachable) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Latency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(duration) => write!(f, "{:.2} seconds", duration.as_secs_f64()),
            Self::Unreachable => write!(f, "Could not be reached"),
        }
    }
}

/// Performance classification based on mean search latency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    /// Under 300 ms
    Fast,
    /// 300 ms to 1 s
    Good,
    /// 1 s to 3 s
    Moderate,
    /// Over 3 s
    Slow,
}

impl PerformanceLevel {
    /// Classify performance based on mean duration
    pub fn from_duration(duration: Duration) -> Self {
        let secs = duration.as_secs_f64();
        if secs < 0.3 {
            Self::Fast
        } else if secs < 1.0 {
            Self::Good
        } else if secs < 3.0 {
            Self::Moderate
        } else {
            Self::Slow
        }
    }
}
