//! Error handling for searx-ping

use thiserror::Error;

/// Custom error types for searx-ping
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network connectivity errors (connect, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP request errors (status codes, body reads)
    #[error("HTTP request error: {0}")]
    HttpRequest(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors (URLs, numbers, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new HTTP request error
    pub fn http_request<S: Into<String>>(message: S) -> Self {
        Self::HttpRequest(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Network(_) => "NETWORK",
            Self::HttpRequest(_) => "HTTP",
            Self::Timeout(_) => "TIMEOUT",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether this error came from the instance or the network path to it,
    /// as opposed to a local problem such as a malformed instance URL
    pub fn is_endpoint_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpRequest(_) | Self::Timeout(_))
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Network(_) | Self::HttpRequest(_) => 2,
            Self::Timeout(_) => 3,
            Self::Internal(_) => 99,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) | Self::HttpRequest(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

/// Render an error followed by every cause in its source chain.
///
/// reqwest's own message only names the URL; the cause (refused connection,
/// DNS lookup, TLS handshake) sits further down the chain. Causes already
/// contained in the text so far are skipped.
pub fn describe_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    message
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = describe_chain(&error);
        if error.is_timeout() {
            Self::timeout(message)
        } else if error.is_connect() || error.is_request() {
            Self::network(message)
        } else {
            Self::http_request(message)
        }
    }
}

impl From<tokio::sync::AcquireError> for AppError {
    fn from(error: tokio::sync::AcquireError) -> Self {
        Self::internal(format!("Admission gate closed: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_error = AppError::config("Invalid config");
        assert!(matches!(config_error, AppError::Config(_)));
        assert_eq!(config_error.to_string(), "Configuration error: Invalid config");

        let network_error = AppError::network("Connection refused");
        assert!(matches!(network_error, AppError::Network(_)));
        assert_eq!(network_error.category(), "NETWORK");
    }

    #[test]
    fn test_endpoint_failure_classification() {
        assert!(AppError::network("refused").is_endpoint_failure());
        assert!(AppError::http_request("HTTP 502").is_endpoint_failure());
        assert!(AppError::timeout("30s").is_endpoint_failure());

        assert!(!AppError::config("bad").is_endpoint_failure());
        assert!(!AppError::validation("bad").is_endpoint_failure());
        assert!(!AppError::internal("bug").is_endpoint_failure());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("test").exit_code(), 1);
        assert_eq!(AppError::validation("test").exit_code(), 1);
        assert_eq!(AppError::parse("test").exit_code(), 1);
        assert_eq!(AppError::network("test").exit_code(), 2);
        assert_eq!(AppError::http_request("test").exit_code(), 2);
        assert_eq!(AppError::timeout("test").exit_code(), 3);
        assert_eq!(AppError::internal("test").exit_code(), 99);
    }

    #[test]
    fn test_console_formatting() {
        let error = AppError::network("Connection failed");

        let plain = error.format_for_console(false);
        assert_eq!(plain, "[NETWORK] Network error: Connection failed");

        let colored = error.format_for_console(true);
        assert!(colored.contains("NETWORK"));
        assert!(colored.contains("Connection failed"));
    }

    #[derive(Debug)]
    struct Layer {
        text: &'static str,
        source: Option<Box<Layer>>,
    }

    impl std::fmt::Display for Layer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.text)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.source.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_describe_chain_appends_causes() {
        let error = Layer {
            text: "error sending request for url (http://127.0.0.1:1/search?q=a)",
            source: Some(Box::new(Layer {
                text: "client error (Connect)",
                source: Some(Box::new(Layer {
                    text: "Connection refused (os error 111)",
                    source: None,
                })),
            })),
        };

        assert_eq!(
            describe_chain(&error),
            "error sending request for url (http://127.0.0.1:1/search?q=a): client error (Connect): Connection refused (os error 111)"
        );
    }

    #[test]
    fn test_describe_chain_skips_repeated_causes() {
        let error = Layer {
            text: "tcp connect error: Connection refused",
            source: Some(Box::new(Layer { text: "Connection refused", source: None })),
        };

        assert_eq!(describe_chain(&error), "tcp connect error: Connection refused");
    }
}
