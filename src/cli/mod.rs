//! Command-line interface
//!
//! Every flag is optional; with no arguments the compiled-in instance list is
//! benchmarked with the default timeout and politeness delay.

use clap::{ArgAction, Parser};
use crate::models::config::{MAX_POLITENESS_DELAY_MS, MAX_TIMEOUT_SECONDS};

/// searx-ping - rank public Searx/SearXNG instances by search latency
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "searx-ping")]
#[command(version, about, long_about = None)]
#[command(after_help = "Environment: SEARX_INSTANCES, TIMEOUT_SECONDS, POLITENESS_DELAY_MS, ENABLE_COLOR (also read from .env)")]
pub struct Cli {
    /// Instance base URL to benchmark (can be used multiple times, replaces the default list)
    #[arg(long = "url", value_name = "URL", action = ArgAction::Append)]
    pub urls: Vec<String>,

    /// Per-request timeout in seconds [default: 30]
    #[arg(short, long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Pause between consecutive queries to one instance, in milliseconds [default: 2000]
    #[arg(long = "delay-ms", value_name = "MS", value_parser = parse_delay_ms)]
    pub delay_ms: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && supports_color()
    }
}

fn parse_plain_u64(s: &str, what: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid {}: {}", what, s));
    }

    s.parse::<u64>().map_err(|_| format!("Invalid {}: {}", what, s))
}

/// Parse timeout seconds, 1 to 300
fn parse_timeout(s: &str) -> Result<u64, String> {
    parse_plain_u64(s, "timeout").and_then(|secs| {
        if secs == 0 {
            Err("Timeout must be greater than 0".to_string())
        } else if secs > MAX_TIMEOUT_SECONDS {
            Err(format!("Timeout cannot exceed {} seconds", MAX_TIMEOUT_SECONDS))
        } else {
            Ok(secs)
        }
    })
}

/// Parse politeness delay milliseconds, 0 to 60000
fn parse_delay_ms(s: &str) -> Result<u64, String> {
    parse_plain_u64(s, "delay").and_then(|ms| {
        if ms > MAX_POLITENESS_DELAY_MS {
            Err(format!("Delay cannot exceed {} ms", MAX_POLITENESS_DELAY_MS))
        } else {
            Ok(ms)
        }
    })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
