//! Configuration data model and validation

use crate::client::HttpUtils;
use crate::defaults;
use crate::types::{Result, AppError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for the per-request timeout
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// Upper bound for the politeness delay
pub const MAX_POLITENESS_DELAY_MS: u64 = 60_000;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Instance base URLs to benchmark
    #[serde(default = "default_instances")]
    pub instances: Vec<String>,

    /// Search terms sent to every instance.
    /// Not exposed on the command line or in the environment.
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    /// Maximum number of instances probed at once.
    /// Not exposed on the command line or in the environment.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Pause between consecutive queries to the same instance
    #[serde(default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Render the progress indicator on stderr
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instances: default_instances(),
            queries: default_queries(),
            max_concurrency: default_max_concurrency(),
            politeness_delay_ms: default_politeness_delay_ms(),
            timeout_seconds: default_timeout_secs(),
            enable_color: default_enable_color(),
            show_progress: default_show_progress(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Get politeness delay as Duration
    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        // An empty instance list is allowed and yields an empty report
        for instance in &self.instances {
            if instance.is_empty() {
                return Err(AppError::config("Instance URL cannot be empty"));
            }

            HttpUtils::validate_url(instance)
                .map_err(|e| AppError::config(format!("Invalid instance URL '{}': {}", instance, e)))?;
        }

        if self.queries.is_empty() {
            return Err(AppError::config("At least one search query is required"));
        }

        if self.queries.iter().any(|q| q.trim().is_empty()) {
            return Err(AppError::config("Search queries cannot be empty"));
        }

        if self.max_concurrency == 0 {
            return Err(AppError::config("Concurrency limit must be greater than 0"));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(AppError::config(format!("Timeout cannot exceed {} seconds", MAX_TIMEOUT_SECONDS)));
        }

        if self.politeness_delay_ms > MAX_POLITENESS_DELAY_MS {
            return Err(AppError::config(format!(
                "Politeness delay cannot exceed {} ms",
                MAX_POLITENESS_DELAY_MS
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(instances) = std::env::var("SEARX_INSTANCES") {
            self.instances = split_list(&instances);
        }

        if let Ok(timeout) = std::env::var("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Ok(delay) = std::env::var("POLITENESS_DELAY_MS") {
            self.politeness_delay_ms = delay.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid POLITENESS_DELAY_MS value '{}': {}", delay, e)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

/// Split a comma-separated list, dropping blanks
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn default_instances() -> Vec<String> {
    defaults::DEFAULT_INSTANCES.iter().map(|s| s.to_string()).collect()
}

fn default_queries() -> Vec<String> {
    defaults::DEFAULT_QUERIES.iter().map(|s| s.to_string()).collect()
}

fn default_max_concurrency() -> usize {
    defaults::MAX_CONCURRENT_PROBES
}

fn default_politeness_delay_ms() -> u64 {
    defaults::POLITENESS_DELAY.as_millis() as u64
}

fn default_timeout_secs() -> u64 {
    defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_enable_color() -> bool {
    defaults::DEFAULT_ENABLE_COLOR
}

fn default_show_progress() -> bool {
    true
}
