//! Environment variable handling and .env file management

use crate::client::HttpUtils;
use crate::error::{AppError, Result};
use crate::models::config::{split_list, MAX_POLITENESS_DELAY_MS, MAX_TIMEOUT_SECONDS};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the current directory if it exists.
    ///
    /// Variables already set in the process environment are not overwritten.
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new(".env"))
    }

    /// Load a specific env file if it exists; returns whether it was loaded
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        Ok(true)
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "SEARX_INSTANCES" => {
                for instance in split_list(value) {
                    HttpUtils::validate_url(&instance)
                        .map_err(|e| AppError::config(format!("Invalid SEARX_INSTANCES entry '{}': {}", instance, e)))?;
                }
            }
            "TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout == 0 || timeout > MAX_TIMEOUT_SECONDS {
                    return Err(AppError::config(format!(
                        "TIMEOUT_SECONDS must be between 1 and {}, got: {}",
                        MAX_TIMEOUT_SECONDS, timeout
                    )));
                }
            }
            "POLITENESS_DELAY_MS" => {
                let delay: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid POLITENESS_DELAY_MS value '{}': {}", value, e)))?;
                if delay > MAX_POLITENESS_DELAY_MS {
                    return Err(AppError::config(format!(
                        "POLITENESS_DELAY_MS must be at most {}, got: {}",
                        MAX_POLITENESS_DELAY_MS, delay
                    )));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("SEARX_INSTANCES", "Comma-separated list of instance URLs", "https://searx.be,https://priv.au"),
            ("TIMEOUT_SECONDS", "Per-request timeout in seconds (1-300)", "30"),
            ("POLITENESS_DELAY_MS", "Delay between queries to one instance (0-60000)", "2000"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<20} {}\n", var, description));
            help.push_str(&format!("  {:<20} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Vec<String> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_var_validation() {
        assert!(EnvManager::validate_env_var("SEARX_INSTANCES", "https://searx.be,https://priv.au").is_ok());
        assert!(EnvManager::validate_env_var("SEARX_INSTANCES", "").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "30").is_ok());
        assert!(EnvManager::validate_env_var("POLITENESS_DELAY_MS", "0").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "false").is_ok());
        assert!(EnvManager::validate_env_var("UNRELATED", "whatever").is_ok());

        assert!(EnvManager::validate_env_var("SEARX_INSTANCES", "not-a-url").is_err());
        assert!(EnvManager::validate_env_var("SEARX_INSTANCES", "ftp://searx.be").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "0").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "301").is_err());
        assert!(EnvManager::validate_env_var("POLITENESS_DELAY_MS", "60001").is_err());
        assert!(EnvManager::validate_env_var("POLITENESS_DELAY_MS", "-1").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "maybe").is_err());
    }

    #[test]
    fn test_load_missing_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = EnvManager::load_env_file_from(&dir.path().join(".env")).unwrap();
        assert!(!loaded);
    }

    #[test]
    fn test_load_env_file_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "SEARX_PING_TEST_ONLY_VAR=loaded").unwrap();

        let loaded = EnvManager::load_env_file_from(file.path()).unwrap();
        assert!(loaded);
        assert_eq!(std::env::var("SEARX_PING_TEST_ONLY_VAR").unwrap(), "loaded");
        std::env::remove_var("SEARX_PING_TEST_ONLY_VAR");
    }

    #[test]
    fn test_env_help() {
        let help = EnvManager::display_env_help();
        assert!(help.contains("SEARX_INSTANCES"));
        assert!(help.contains("POLITENESS_DELAY_MS"));
        assert!(help.contains("1. Command-line arguments"));
    }
}
