//! Textual progress indicator drawn on standard error

use std::io::{self, Write};

/// Default bar width in cells
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Completion bar in the form ` 40%|████████          | 2/5`
#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: usize,
    width: usize,
}

impl ProgressBar {
    /// Create a bar for `total` items
    pub fn new(total: usize) -> Self {
        Self::with_width(total, DEFAULT_BAR_WIDTH)
    }

    pub fn with_width(total: usize, width: usize) -> Self {
        Self { total, width: width.max(1) }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Render the bar for `done` completed items
    pub fn render(&self, done: usize) -> String {
        let done = done.min(self.total);
        let fraction = if self.total == 0 {
            1.0
        } else {
            done as f64 / self.total as f64
        };

        let filled = (fraction * self.width as f64).floor() as usize;
        let bar = format!("{}{}", "█".repeat(filled), " ".repeat(self.width - filled));
        let pct = (fraction * 100.0).floor() as usize;

        format!("{:>3}%|{}| {}/{}", pct, bar, done, self.total)
    }

    /// Draw the initial empty bar
    pub fn start(&self) {
        self.draw(0);
    }

    /// Redraw the bar in place; the final update ends the line
    pub fn draw(&self, done: usize) {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{}", self.render(done));
        if done >= self.total {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        let bar = ProgressBar::with_width(5, 10);
        assert_eq!(bar.render(0), "  0%|          | 0/5");
    }

    #[test]
    fn test_render_partial() {
        let bar = ProgressBar::with_width(5, 10);
        assert_eq!(bar.render(2), " 40%|████      | 2/5");
    }

    #[test]
    fn test_render_complete() {
        let bar = ProgressBar::with_width(4, 8);
        assert_eq!(bar.render(4), "100%|████████| 4/4");
    }

    #[test]
    fn test_render_clamps_overflow() {
        let bar = ProgressBar::with_width(3, 6);
        assert_eq!(bar.render(7), bar.render(3));
    }

    #[test]
    fn test_render_zero_total() {
        let bar = ProgressBar::with_width(0, 4);
        assert_eq!(bar.render(0), "100%|████| 0/0");
    }

    #[test]
    fn test_default_width() {
        let bar = ProgressBar::new(84);
        assert_eq!(bar.total(), 84);
        assert_eq!(bar.render(0), format!("  0%|{}| 0/84", " ".repeat(DEFAULT_BAR_WIDTH)));
    }
}
