//! Structured logging for searx-ping
//!
//! Log records always go to stderr so the ranking on stdout can be piped
//! or captured untouched. Records are human readable by default and one JSON
//! object per line in debug mode.

use crate::client::HttpUtils;
use crate::error::AppError;
use crate::models::{Config, Measurement, EndpointResult};
use crate::stats::RunSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }

    /// ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Warn => "\x1b[33m",
        }
    }

    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    pub fields: HashMap<String, serde_json::Value>,
    pub location: Option<LogLocation>,
}

/// Source code location, filled in by the `log_*` macros
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Console,
    Json,
}

/// Named logger writing records at or above its level to stderr
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    session_id: Arc<RwLock<Option<String>>>,
}

impl Logger {
    /// Level and format follow the run flags: `--debug` logs everything as
    /// JSON, `--verbose` adds progress records, otherwise only warnings.
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name,
            session_id: Arc::new(RwLock::new(None)),
        }
    }

    /// Set session correlation ID
    pub async fn set_session_id(&self, session_id: String) {
        *self.session_id.write().await = Some(session_id);
    }

    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    async fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        if let Some(session_id) = self.session_id.read().await.as_ref() {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }

        let _ = writeln!(io::stderr(), "{}", self.render(&entry));
    }

    fn render(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => self.format_json(entry),
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}", timestamp, formatted_level, entry.logger, entry.message);

        // Session id is only useful to correlate JSON records
        let mut fields: Vec<String> = entry.fields.iter()
            .filter(|(k, _)| k.as_str() != "session_id")
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        if !fields.is_empty() {
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                fields: HashMap::new(),
                location: None,
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    pub fn measurement(self, measurement: &Measurement) -> Self {
        match measurement {
            Measurement::Success { elapsed } => self
                .field("success", true)
                .field("elapsed_ms", elapsed.as_secs_f64() * 1000.0),
            Measurement::Unreachable { error } => self
                .field("success", false)
                .field("error", error),
        }
    }

    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Logger for per-request and per-instance probe events
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("PROBE".to_string(), config),
        }
    }

    /// Log the outcome of one search request
    pub async fn log_measurement(&self, endpoint: &str, query: &str, measurement: &Measurement) {
        let message = match measurement {
            Measurement::Success { elapsed } => {
                format!("GET {} q={:?} -> {:.1}ms", endpoint, query, elapsed.as_secs_f64() * 1000.0)
            }
            Measurement::Unreachable { .. } => format!("GET {} q={:?} -> FAILED", endpoint, query),
        };

        self.logger.debug(&message)
            .field("endpoint", endpoint)
            .field("query", query)
            .measurement(measurement)
            .log()
            .await;
    }

    /// Log a failed request.
    ///
    /// Instance and network failures already print an `Error fetching` line,
    /// so they are recorded at DEBUG. Anything else points at local setup,
    /// such as a malformed instance URL, and is a warning.
    pub async fn log_failure(&self, endpoint: &str, error: &AppError) {
        self.failure_entry(endpoint, error).log().await;
    }

    fn failure_entry(&self, endpoint: &str, error: &AppError) -> LogEntryBuilder<'_> {
        let level = if error.is_endpoint_failure() { LogLevel::Debug } else { LogLevel::Warn };
        let builder = self.logger.log(level, &format!("Request to {} failed: {}", endpoint, error))
            .field("endpoint", endpoint)
            .error_info(error);

        if HttpUtils::is_onion(endpoint) {
            builder.field("hint", "onion instances need a Tor SOCKS proxy in ALL_PROXY")
        } else {
            builder
        }
    }

    /// Log a completed instance probe
    pub async fn log_endpoint_complete(&self, result: &EndpointResult, completed: usize, total: usize) {
        let message = format!("[{}/{}] {}: {}", completed, total, result.endpoint, result.mean);
        let elapsed_ms = (result.completed_at - result.started_at).num_milliseconds();

        self.logger.info(&message)
            .field("endpoint", &result.endpoint)
            .field("mean_seconds", result.mean.as_secs_f64())
            .field("successes", result.success_count())
            .field("failures", result.failure_count())
            .field("probe_ms", elapsed_ms)
            .log()
            .await;
    }

    /// Log the end of a run
    pub async fn log_run_complete(&self, summary: &RunSummary) {
        let message = format!(
            "Probed {} instances in {:.1}s ({} reachable, {} unreachable)",
            summary.total_instances,
            summary.total_duration.as_secs_f64(),
            summary.reachable,
            summary.unreachable,
        );

        self.logger.info(&message)
            .field("total_instances", summary.total_instances)
            .field("reachable", summary.reachable)
            .field("unreachable", summary.unreachable)
            .field("duration_seconds", summary.total_duration.as_secs_f64())
            .log()
            .await;
    }
}

/// Creates loggers sharing one session id
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    pub async fn create_probe_logger(&self) -> ProbeLogger {
        let probe_logger = ProbeLogger::new(&self.config);
        probe_logger.logger.set_session_id(self.session_id.clone()).await;
        probe_logger
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Convenience macros for logging with location information
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}
