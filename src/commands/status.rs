//! Status command - Report whether a login is stored.

use crate::errors::AppResult;
use crate::services::ServiceContainer;

/// Execute the status command
pub async fn execute(services: &dyn ServiceContainer) -> AppResult<()> {
    let status = services.credentials().status().await;

    if status.configured {
        println!("Usuário: {}", status.username);
    } else {
        println!("Credenciais não configuradas. Use `ponto-client configure`.");
    }

    Ok(())
}
