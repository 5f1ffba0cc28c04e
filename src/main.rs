//! Ponto client - Application entry point
//!
//! CLI-based entry point that dispatches to the terminal commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ponto_client::{
    cli::{Cli, Commands},
    commands,
    config::Config,
    services::Services,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration
    let mut config = Config::from_env();
    if let Some(path) = cli.config {
        config = config.with_config_file(path);
    }
    tracing::debug!(?config, "Configuration loaded");

    // Wire the backend
    let services = match Services::from_config(&config) {
        Ok((services, load_error)) => {
            if let Some(e) = load_error {
                eprintln!("{}", e.user_message());
            }
            services
        }
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Some(Commands::Register) => commands::register::execute(&services).await,
        Some(Commands::Configure(args)) => commands::configure::execute(args, &services).await,
        Some(Commands::Status) => commands::status::execute(&services).await,
        None if cli.auto => commands::register::execute_auto(&services).await,
        None => commands::status::execute(&services).await,
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
