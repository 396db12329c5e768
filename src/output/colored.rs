//! Colored formatter implementation with terminal color support
//!
//! Emits the same text as [`PlainFormatter`](super::PlainFormatter), with the
//! latency colored by performance band.

use crate::{
    models::EndpointResult,
    stats::RunSummary,
    types::{Latency, PerformanceLevel},
};
use super::formatter::{ReportFormatter, REPORT_TITLE};
use colored::*;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// Color for a performance band
pub fn level_color(level: PerformanceLevel) -> Color {
    match level {
        PerformanceLevel::Fast => Color::Green,
        PerformanceLevel::Good => Color::Cyan,
        PerformanceLevel::Moderate => Color::Yellow,
        PerformanceLevel::Slow => Color::Red,
    }
}

/// Colored formatter implementation
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with the default scheme
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportFormatter for ColoredFormatter {
    fn format_header(&self) -> String {
        format!("\n{}", REPORT_TITLE.color(self.color_scheme.header).bold())
    }

    fn format_result_line(&self, result: &EndpointResult) -> String {
        let latency = result.mean.to_string();
        let colored_latency = match result.mean {
            Latency::Finite(duration) => latency.color(level_color(PerformanceLevel::from_duration(duration))),
            Latency::Unreachable => latency.color(self.color_scheme.error),
        };

        format!("{}: {}", result.endpoint, colored_latency)
    }

    fn format_error_line(&self, endpoint: &str, error: &str) -> String {
        format!("Error fetching {}: {}", endpoint, error)
            .color(self.color_scheme.error)
            .to_string()
    }

    fn format_summary(&self, summary: &RunSummary) -> String {
        let counts = format!(
            "{}/{} reachable ({:.1}%), {} unreachable, finished in {:.1}s",
            summary.reachable,
            summary.total_instances,
            summary.reachable_rate(),
            summary.unreachable,
            summary.total_duration.as_secs_f64(),
        );

        let fastest = match &summary.fastest {
            Some((endpoint, mean)) => format!(
                "{} ({})",
                endpoint,
                format!("{:.2} seconds", mean.as_secs_f64()).color(self.color_scheme.success)
            ),
            None => "none reachable".color(self.color_scheme.muted).to_string(),
        };

        format!("{} {}\n{} {}", "Summary:".bold(), counts, "Fastest:".bold(), fastest)
    }
}
