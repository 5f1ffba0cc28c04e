//! Configure command - Store the username and, optionally, a new password.

use std::io::BufRead;

use crate::cli::args::ConfigureArgs;
use crate::errors::{AppError, AppResult};
use crate::services::ServiceContainer;

/// Execute the configure command
pub async fn execute(args: ConfigureArgs, services: &dyn ServiceContainer) -> AppResult<()> {
    let password = if args.password_stdin {
        Some(read_password_line(std::io::stdin().lock())?)
    } else {
        None
    };

    let outcome = services
        .credentials()
        .update_credentials(&args.username, password.as_deref())
        .await;

    println!("{}", outcome.message);
    if outcome.success {
        Ok(())
    } else {
        Err(AppError::validation(outcome.message))
    }
}

/// First line of `reader`, without the line terminator.
fn read_password_line(mut reader: impl BufRead) -> AppResult<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| AppError::validation(format!("Failed to read password: {}", e)))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
