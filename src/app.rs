//! Main application orchestration and execution

use crate::{
    cli::Cli,
    client::{HttpUtils, SearchClient},
    config::{display_config_summary, load_config, EnvManager},
    error::Result,
    executor::Prober,
    logging::LoggerFactory,
    log_debug, log_info, log_warn,
    output::{ConsoleObserver, OutputFormatterFactory, ProgressBar},
    stats::RunSummary,
};
use std::sync::Arc;
use std::time::Instant;

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Probe every configured instance and print the ranking to stdout
    pub async fn run(self) -> Result<RunSummary> {
        let config = load_config(self.cli)?;

        let loggers = LoggerFactory::new(config.clone());
        let logger = loggers.create_logger("APP").await;
        let probe_logger = Arc::new(loggers.create_probe_logger().await);

        log_debug!(logger, "{} v{} built {} for {} ({})",
            crate::PKG_NAME,
            crate::VERSION,
            env!("BUILD_TIME"),
            env!("TARGET_TRIPLE"),
            option_env!("GIT_COMMIT").unwrap_or("unknown commit"));
        log_debug!(logger, "Configuration:\n{}", display_config_summary(&config));

        for warning in EnvManager::validate_current_env() {
            log_warn!(logger, "{}", warning);
        }

        if !onion_proxy_configured() && config.instances.iter().any(|i| HttpUtils::is_onion(i)) {
            log_info!(logger, "Onion instances are only reachable through a SOCKS proxy, e.g. ALL_PROXY=socks5h://127.0.0.1:9050");
        }

        let client = Arc::new(SearchClient::new(config.timeout())?);

        let formatter = OutputFormatterFactory::create_formatter(config.enable_color);
        let progress = config.show_progress.then(|| ProgressBar::new(config.instances.len()));
        let observer = Arc::new(ConsoleObserver::new(formatter, progress));

        let prober = Prober::from_config(&config, client)?
            .with_observer(observer.clone())
            .with_logger(probe_logger.clone());

        log_info!(logger, "Probing {} instances with {} queries each",
            config.instances.len(), config.queries.len());

        let started = Instant::now();
        observer.start();
        let results = prober.run_all(&config.instances).await?;

        println!("{}", observer.formatter().format_report(&results));

        let summary = RunSummary::from_results(&results, started.elapsed());
        probe_logger.log_run_complete(&summary).await;

        if config.verbose {
            eprintln!("\n{}", observer.formatter().format_summary(&summary));
        }

        log_debug!(logger, "Peak concurrent probes: {}", prober.gate().peak());

        Ok(summary)
    }
}

/// Proxy variables reqwest honours for a plain `http://` onion address
const ONION_PROXY_VARS: [&str; 4] = ["ALL_PROXY", "all_proxy", "HTTP_PROXY", "http_proxy"];

fn onion_proxy_configured() -> bool {
    onion_proxy_configured_with(|name| std::env::var(name).ok())
}

fn onion_proxy_configured_with<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    ONION_PROXY_VARS
        .iter()
        .any(|name| lookup(name).is_some_and(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| vars.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn test_onion_proxy_detection() {
        assert!(!onion_proxy_configured_with(lookup_from(&[])));
        assert!(onion_proxy_configured_with(lookup_from(&[("ALL_PROXY", "socks5h://127.0.0.1:9050")])));
        assert!(onion_proxy_configured_with(lookup_from(&[("all_proxy", "socks5h://127.0.0.1:9050")])));
        assert!(onion_proxy_configured_with(lookup_from(&[("HTTP_PROXY", "socks5h://127.0.0.1:9050")])));
        assert!(onion_proxy_configured_with(lookup_from(&[("http_proxy", "socks5h://127.0.0.1:9050")])));
    }

    #[test]
    fn test_https_or_empty_proxy_does_not_count() {
        assert!(!onion_proxy_configured_with(lookup_from(&[("HTTPS_PROXY", "socks5h://127.0.0.1:9050")])));
        assert!(!onion_proxy_configured_with(lookup_from(&[("ALL_PROXY", "  ")])));
    }
}
