//! Latency aggregation and ranking
//!
//! An instance's score is the arithmetic mean of its per-query timings. A
//! single failed query makes the whole instance unreachable rather than
//! averaging over the queries that happened to succeed.

use crate::{
    models::metrics::{Measurement, EndpointResult},
    types::Latency,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Mean latency over a set of measurements.
///
/// Returns [`Latency::Unreachable`] when any measurement failed or when there
/// are no measurements at all.
pub fn mean_latency(measurements: &[Measurement]) -> Latency {
    if measurements.is_empty() {
        return Latency::Unreachable;
    }

    let mut total = Duration::ZERO;
    for measurement in measurements {
        match measurement.elapsed() {
            Some(elapsed) => total += elapsed,
            None => return Latency::Unreachable,
        }
    }

    Latency::Finite(total / measurements.len() as u32)
}

/// Sort results fastest first, unreachable instances last.
///
/// The sort is stable: unreachable instances keep their completion order.
pub fn rank_results(mut results: Vec<EndpointResult>) -> Vec<EndpointResult> {
    results.sort_by(|a, b| a.mean.cmp(&b.mean));
    results
}

/// Aggregate figures for a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of instances probed
    pub total_instances: usize,
    /// Instances that answered every query
    pub reachable: usize,
    /// Instances with at least one failed query
    pub unreachable: usize,
    /// Fastest reachable instance and its mean latency
    pub fastest: Option<(String, Duration)>,
    /// Wall-clock duration of the whole run
    pub total_duration: Duration,
}

impl RunSummary {
    /// Summarize a set of results
    pub fn from_results(results: &[EndpointResult], total_duration: Duration) -> Self {
        let reachable = results.iter().filter(|r| r.is_reachable()).count();

        let fastest = results
            .iter()
            .filter_map(|r| match r.mean {
                Latency::Finite(d) => Some((r.endpoint.clone(), d)),
                Latency::Unreachable => None,
            })
            .min_by_key(|(_, d)| *d);

        Self {
            total_instances: results.len(),
            reachable,
            unreachable: results.len() - reachable,
            fastest,
            total_duration,
        }
    }

    /// Share of reachable instances, in percent
    pub fn reachable_rate(&self) -> f64 {
        if self.total_instances == 0 {
            0.0
        } else {
            (self.reachable as f64 / self.total_instances as f64) * 100.0
        }
    }
}
