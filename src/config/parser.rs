//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the configuration: defaults, then .env, then environment, then CLI
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        // .env never overrides variables already present in the environment
        let loaded = EnvManager::load_env_file()?;
        if loaded && self.cli.debug {
            eprintln!("Loaded configuration from .env file");
        }

        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if !self.cli.urls.is_empty() {
            config.instances = self.cli.urls.clone();
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(delay_ms) = self.cli.delay_ms {
            config.politeness_delay_ms = delay_ms;
        }

        if !self.cli.use_colors() {
            config.enable_color = false;
        }

        if self.cli.no_progress {
            config.show_progress = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Instances: {}", config.instances.len()));
    summary.push(format!("Queries: {}", config.queries.join(", ")));
    summary.push(format!("Concurrency limit: {}", config.max_concurrency));
    summary.push(format!("Politeness delay: {}ms", config.politeness_delay_ms));
    summary.push(format!("Timeout: {}s", config.timeout_seconds));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Progress: {}", config.show_progress));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
