//! Output formatting and display system
//!
//! The ranked report and per-request error lines go to stdout; the progress
//! indicator goes to stderr.

mod formatter;
mod colored;
mod progress;

pub use formatter::{ReportFormatter, PlainFormatter, REPORT_TITLE};
pub use colored::{ColoredFormatter, ColorScheme, level_color};
pub use progress::{ProgressBar, DEFAULT_BAR_WIDTH};

use crate::{
    error::AppError,
    executor::ProbeObserver,
    models::EndpointResult,
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color preference
    pub fn create_formatter(enable_color: bool) -> Box<dyn ReportFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}

/// Observer printing failures as they happen and advancing the progress bar
pub struct ConsoleObserver {
    formatter: Box<dyn ReportFormatter>,
    progress: Option<ProgressBar>,
}

impl ConsoleObserver {
    pub fn new(formatter: Box<dyn ReportFormatter>, progress: Option<ProgressBar>) -> Self {
        Self { formatter, progress }
    }

    /// Draw the empty progress bar before the first completion
    pub fn start(&self) {
        if let Some(progress) = &self.progress {
            if progress.total() > 0 {
                progress.start();
            }
        }
    }

    pub fn formatter(&self) -> &dyn ReportFormatter {
        self.formatter.as_ref()
    }
}

impl ProbeObserver for ConsoleObserver {
    fn on_failure(&self, endpoint: &str, error: &AppError) {
        println!("{}", self.formatter.format_error_line(endpoint, &error.to_string()));
    }

    fn on_endpoint_complete(&self, _result: &EndpointResult, completed: usize, _total: usize) {
        if let Some(progress) = &self.progress {
            progress.draw(completed);
        }
    }
}
