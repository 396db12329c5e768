//! Core formatting trait and the plain text implementation
//!
//! The plain formatter produces the exact report text; other formatters must
//! render the same characters once terminal styling is removed.

use crate::{
    models::EndpointResult,
    stats::RunSummary,
};
use std::fmt::Write as _;

/// Title line of the final report
pub const REPORT_TITLE: &str = "Fastest Searx Instances:";

/// Main trait for report formatting
pub trait ReportFormatter: Send + Sync {
    /// Blank line followed by the report title
    fn format_header(&self) -> String;

    /// One ranked line: `{endpoint}: {mean:.2} seconds` or `{endpoint}: Could not be reached`
    fn format_result_line(&self, result: &EndpointResult) -> String;

    /// Line printed when a single request fails
    fn format_error_line(&self, endpoint: &str, error: &str) -> String;

    /// Human-readable run summary
    fn format_summary(&self, summary: &RunSummary) -> String;

    /// Header plus one line per result, in the given order
    fn format_report(&self, results: &[EndpointResult]) -> String {
        let mut output = self.format_header();
        for result in results {
            output.push('\n');
            output.push_str(&self.format_result_line(result));
        }
        output
    }
}

/// Plain text formatter implementation
#[derive(Debug, Default, Clone)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for PlainFormatter {
    fn format_header(&self) -> String {
        format!("\n{}", REPORT_TITLE)
    }

    fn format_result_line(&self, result: &EndpointResult) -> String {
        format!("{}: {}", result.endpoint, result.mean)
    }

    fn format_error_line(&self, endpoint: &str, error: &str) -> String {
        format!("Error fetching {}: {}", endpoint, error)
    }

    fn format_summary(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        let _ = write!(
            output,
            "Summary: {}/{} reachable ({:.1}%), {} unreachable, finished in {:.1}s",
            summary.reachable,
            summary.total_instances,
            summary.reachable_rate(),
            summary.unreachable,
            summary.total_duration.as_secs_f64(),
        );

        match &summary.fastest {
            Some((endpoint, mean)) => {
                let _ = write!(output, "\nFastest: {} ({:.2} seconds)", endpoint, mean.as_secs_f64());
            }
            None => output.push_str("\nFastest: none reachable"),
        }

        output
    }
}
