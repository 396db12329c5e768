//! searx-ping - rank public Searx/SearXNG instances by search latency

use clap::Parser;
use searx_ping::{
    app::App,
    cli::Cli,
    config::EnvManager,
    error::AppError,
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A panicking probe task is reported as unreachable, so the hook only prints
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();

    // Unreachable instances are part of the report, not an error
    if let Err(e) = App::new(cli).run().await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Instance URLs must start with http:// or https://");
            eprintln!("  - Check your .env file format");
            eprintln!();
            eprint!("{}", EnvManager::display_env_help());
        }
        AppError::Network(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection and proxy variables");
        }
        _ => {}
    }
}
