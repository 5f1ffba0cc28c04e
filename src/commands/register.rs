//! Register command - One clock event, printed as `[HH:MM:SS] message`.

use std::time::Duration;

use crate::config::AUTO_TRIGGER_DELAY_MS;
use crate::errors::{AppError, AppResult};
use crate::services::ServiceContainer;
use crate::types::RegistrationOutcome;

/// Execute the register command
pub async fn execute(services: &dyn ServiceContainer) -> AppResult<()> {
    let outcome = services.registration().register_time().await;
    report(outcome)
}

/// Auto trigger: wait the startup delay, then register once.
///
/// Does nothing beyond a notice when no credentials are stored.
pub async fn execute_auto(services: &dyn ServiceContainer) -> AppResult<()> {
    let status = services.credentials().status().await;
    if !status.configured {
        tracing::warn!("Auto registration skipped, vault not configured");
        println!("Credenciais não configuradas. Use `ponto-client configure`.");
        return Ok(());
    }

    tokio::time::sleep(Duration::from_millis(AUTO_TRIGGER_DELAY_MS)).await;
    tracing::info!(username = %status.username, "Auto registration triggered");
    execute(services).await
}

fn report(outcome: RegistrationOutcome) -> AppResult<()> {
    println!("[{}] {}", outcome.timestamp, outcome.message);
    if outcome.success {
        Ok(())
    } else {
        Err(AppError::registration(outcome.message))
    }
}
