//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ponto client - Clock in against the attendance service from the terminal
#[derive(Parser, Debug)]
#[command(name = "ponto-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Vault file path (defaults to ~/.config/ponto_app/config.json)
    #[arg(short, long, global = true, env = "PONTO_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Register time automatically shortly after startup
    #[arg(long)]
    pub auto: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a clock event now
    Register,

    /// Set the stored username and password
    Configure(ConfigureArgs),

    /// Show whether credentials are stored
    Status,
}

/// Arguments for the configure command
#[derive(Parser, Debug)]
pub struct ConfigureArgs {
    /// Login username
    #[arg(short, long)]
    pub username: String,

    /// Read the new password from the first line of stdin.
    /// Without it the stored password is kept.
    #[arg(long)]
    pub password_stdin: bool,
}
