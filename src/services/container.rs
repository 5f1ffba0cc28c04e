//! Service Container - The single backend interface views consume.
//!
//! Wires the vault, the attendance client and the locator once, and hands
//! out the two services. Presentation adapters (terminal, desktop) only
//! talk to this container.

use std::sync::Arc;

use super::{
    CredentialsManager, CredentialsService, RegistrationOrchestrator, RegistrationService, Vault,
};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{
    build_client, AttendanceApi, FileConfigStore, HttpAttendanceClient, IpGeolocator,
    LocationProvider,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get credentials service
    fn credentials(&self) -> Arc<dyn CredentialsService>;

    /// Get registration service
    fn registration(&self) -> Arc<dyn RegistrationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    credentials_service: Arc<dyn CredentialsService>,
    registration_service: Arc<dyn RegistrationService>,
}

impl Services {
    /// Create a container around one vault and its collaborators.
    pub fn new(
        vault: Vault,
        api: Arc<dyn AttendanceApi>,
        locator: Arc<dyn LocationProvider>,
    ) -> Self {
        let credentials_service = Arc::new(CredentialsManager::new(vault.clone()));
        let registration_service = Arc::new(RegistrationOrchestrator::new(vault, api, locator));

        Self {
            credentials_service,
            registration_service,
        }
    }

    /// Create the production container from configuration.
    ///
    /// A vault that fails to load is treated as unconfigured; the load error
    /// is returned next to the container for display.
    pub fn from_config(config: &Config) -> AppResult<(Self, Option<AppError>)> {
        let client = build_client(config)?;

        let store = Arc::new(FileConfigStore::new(&config.config_file));
        let (vault, load_error) = Vault::open(store);

        let api = Arc::new(HttpAttendanceClient::new(client.clone(), config));
        let locator = Arc::new(IpGeolocator::new(client, &config.geolocation_url));

        tracing::debug!(path = %config.config_file.display(), "Backend initialized");
        Ok((Self::new(vault, api, locator), load_error))
    }
}

impl ServiceContainer for Services {
    fn credentials(&self) -> Arc<dyn CredentialsService> {
        self.credentials_service.clone()
    }

    fn registration(&self) -> Arc<dyn RegistrationService> {
        self.registration_service.clone()
    }
}
