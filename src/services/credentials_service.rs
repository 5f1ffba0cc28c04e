//! Credentials service - Updates and reports on the stored login.

use async_trait::async_trait;
use serde::Serialize;

use super::vault::Vault;
use crate::config::MSG_CONFIG_SAVED;
use crate::domain::{CredentialCipher, Credentials};
use crate::errors::{AppError, AppResult};
use crate::types::UpdateOutcome;

/// What a view needs to know about the vault. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultStatus {
    pub configured: bool,
    pub username: String,
}

/// Credentials service trait for dependency injection.
#[async_trait]
pub trait CredentialsService: Send + Sync {
    /// Replace the username and, when `password` is non-empty, the stored
    /// password. An empty or absent password keeps the current token.
    async fn update_credentials(&self, username: &str, password: Option<&str>) -> UpdateOutcome;

    /// Current vault state
    async fn status(&self) -> VaultStatus;
}

/// Concrete implementation of CredentialsService.
pub struct CredentialsManager {
    vault: Vault,
}

impl CredentialsManager {
    pub fn new(vault: Vault) -> Self {
        Self { vault }
    }

    async fn apply_update(&self, username: &str, password: Option<&str>) -> AppResult<()> {
        let mut current = self.vault.write().await;

        let mut next = Credentials {
            username: username.to_string(),
            encrypted_password: current.encrypted_password.clone(),
        };

        if let Some(password) = password.filter(|p| !p.is_empty()) {
            let password = password.to_string();
            next.encrypted_password =
                tokio::task::spawn_blocking(move || CredentialCipher::encrypt(&password))
                    .await
                    .map_err(|e| AppError::internal(format!("Encryption task failed: {}", e)))??;
        }

        if next.is_partial() {
            return Err(AppError::validation(
                "Username and password are both required",
            ));
        }

        // Memory only follows a successful save
        self.vault.store().save(&next)?;
        *current = next;
        Ok(())
    }
}

#[async_trait]
impl CredentialsService for CredentialsManager {
    async fn update_credentials(&self, username: &str, password: Option<&str>) -> UpdateOutcome {
        match self.apply_update(username, password).await {
            Ok(()) => {
                tracing::info!(username, "Credentials updated");
                UpdateOutcome::success(MSG_CONFIG_SAVED)
            }
            Err(e) => {
                tracing::warn!(code = e.code(), "Credentials update failed: {}", e);
                UpdateOutcome::from_error(&e)
            }
        }
    }

    async fn status(&self) -> VaultStatus {
        let credentials = self.vault.snapshot().await;
        VaultStatus {
            configured: credentials.is_configured(),
            username: credentials.username,
        }
    }
}
