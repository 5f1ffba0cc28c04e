//! Registration service - Authenticate, locate, submit one clock event.
//!
//! The sequence is single-flight: while one attempt is running, further
//! calls are rejected without touching the network. Nothing is retried;
//! the first failing step ends the attempt.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use super::vault::Vault;
use crate::config::TIMESTAMP_FORMAT;
use crate::domain::{ClockEvent, CredentialCipher};
use crate::errors::{AppError, AppResult};
use crate::infra::{resolve_or_fallback, AttendanceApi, LocationProvider};
use crate::types::RegistrationOutcome;

/// Where the current (or last) attempt is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPhase {
    Idle,
    Authenticating,
    Locating,
    Submitting,
    Completed,
    Failed,
}

/// Registration service trait for dependency injection.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Run one registration attempt.
    async fn register_time(&self) -> RegistrationOutcome;

    /// Observe phase changes.
    fn subscribe(&self) -> watch::Receiver<RegistrationPhase>;
}

/// Run a registration on a background task and hand the outcome to
/// `on_complete`, so the caller's thread never blocks on the network.
pub fn spawn_registration<F>(service: Arc<dyn RegistrationService>, on_complete: F) -> JoinHandle<()>
where
    F: FnOnce(RegistrationOutcome) + Send + 'static,
{
    tokio::spawn(async move {
        let outcome = service.register_time().await;
        on_complete(outcome);
    })
}

/// Local clock time in the outcome format.
pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Concrete implementation of RegistrationService.
pub struct RegistrationOrchestrator {
    vault: Vault,
    api: Arc<dyn AttendanceApi>,
    locator: Arc<dyn LocationProvider>,
    in_flight: Mutex<()>,
    phase: watch::Sender<RegistrationPhase>,
}

impl RegistrationOrchestrator {
    pub fn new(
        vault: Vault,
        api: Arc<dyn AttendanceApi>,
        locator: Arc<dyn LocationProvider>,
    ) -> Self {
        let (phase, _) = watch::channel(RegistrationPhase::Idle);
        Self {
            vault,
            api,
            locator,
            in_flight: Mutex::new(()),
            phase,
        }
    }

    /// Phase of the current or most recent attempt.
    pub fn phase(&self) -> RegistrationPhase {
        *self.phase.borrow()
    }

    fn enter(&self, phase: RegistrationPhase) {
        tracing::debug!(?phase, "Registration phase");
        self.phase.send_replace(phase);
    }

    async fn run(&self) -> AppResult<String> {
        let credentials = self.vault.snapshot().await;
        if !credentials.has_password() {
            return Err(AppError::NoPasswordStored);
        }

        let token = credentials.encrypted_password;
        let password = tokio::task::spawn_blocking(move || CredentialCipher::decrypt(&token))
            .await
            .map_err(|e| AppError::internal(format!("Decryption task failed: {}", e)))??;

        self.enter(RegistrationPhase::Authenticating);
        let session = self.api.authenticate(&credentials.username, &password).await?;

        self.enter(RegistrationPhase::Locating);
        let coordinates = resolve_or_fallback(self.locator.as_ref()).await;

        self.enter(RegistrationPhase::Submitting);
        let event = ClockEvent::new(&session, coordinates);
        self.api.submit_clock_event(&session, &event).await
    }
}

#[async_trait]
impl RegistrationService for RegistrationOrchestrator {
    async fn register_time(&self) -> RegistrationOutcome {
        let timestamp = current_timestamp();

        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::warn!("Registration requested while another is running");
                return RegistrationOutcome::from_error(&AppError::Busy, timestamp);
            }
        };

        tracing::info!("Registering time");
        match self.run().await {
            Ok(message) => {
                self.enter(RegistrationPhase::Completed);
                tracing::info!(%message, "Time registered");
                RegistrationOutcome::success(message, timestamp)
            }
            Err(e) => {
                self.enter(RegistrationPhase::Failed);
                tracing::warn!(code = e.code(), "Registration failed: {}", e);
                RegistrationOutcome::from_error(&e, timestamp)
            }
        }
    }

    fn subscribe(&self) -> watch::Receiver<RegistrationPhase> {
        self.phase.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::{MSG_REGISTERED, MSG_REGISTER_FAILED};
    use crate::domain::{Coordinates, Credentials, EmployeeId, Session};
    use crate::infra::{MockAttendanceApi, MockConfigStore, MockLocationProvider};

    fn configured_vault() -> Vault {
        let token = CredentialCipher::encrypt("secret").unwrap();
        Vault::new(
            Credentials::new("alice", token),
            Arc::new(MockConfigStore::new()),
        )
    }

    fn session() -> Session {
        Session::new("bearer-1", EmployeeId::from_value(json!(77)).unwrap())
    }

    fn fixed_locator(coordinates: Coordinates) -> MockLocationProvider {
        let mut locator = MockLocationProvider::new();
        locator.expect_locate().returning(move || Ok(coordinates));
        locator
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let mut api = MockAttendanceApi::new();
        api.expect_authenticate()
            .withf(|user, pass| user == "alice" && pass == "secret")
            .times(1)
            .returning(|_, _| Ok(session()));
        api.expect_submit_clock_event()
            .withf(|session, event| {
                session.token == "bearer-1"
                    && event.employee_id.as_value() == &json!(77)
                    && event.coordinates() == Coordinates::new(1.5, 2.5)
                    && event.precision == 42.5
                    && event.method == "NAVEGADOR"
            })
            .times(1)
            .returning(|_, _| Ok(MSG_REGISTERED.to_string()));

        let orchestrator = RegistrationOrchestrator::new(
            configured_vault(),
            Arc::new(api),
            Arc::new(fixed_locator(Coordinates::new(1.5, 2.5))),
        );

        let outcome = orchestrator.register_time().await;

        assert!(outcome.success);
        assert_eq!(outcome.message, MSG_REGISTERED);
        assert_eq!(outcome.timestamp.len(), 8);
        assert_eq!(orchestrator.phase(), RegistrationPhase::Completed);
    }

    #[tokio::test]
    async fn test_unconfigured_vault_makes_no_calls() {
        let orchestrator = RegistrationOrchestrator::new(
            Vault::new(Credentials::default(), Arc::new(MockConfigStore::new())),
            Arc::new(MockAttendanceApi::new()),
            Arc::new(MockLocationProvider::new()),
        );

        let (success, message, timestamp) = orchestrator.register_time().await.into_parts();

        assert!(!success);
        assert_eq!(message, "No password stored");
        assert!(!timestamp.is_empty());
        assert_eq!(orchestrator.phase(), RegistrationPhase::Failed);
    }

    #[tokio::test]
    async fn test_corrupt_token_fails_before_network() {
        let vault = Vault::new(
            Credentials::new("alice", "gAAAAAgarbage"),
            Arc::new(MockConfigStore::new()),
        );
        let orchestrator = RegistrationOrchestrator::new(
            vault,
            Arc::new(MockAttendanceApi::new()),
            Arc::new(MockLocationProvider::new()),
        );

        let outcome = orchestrator.register_time().await;

        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Failed to decrypt password"));
    }

    #[tokio::test]
    async fn test_auth_failure_short_circuits() {
        let mut api = MockAttendanceApi::new();
        api.expect_authenticate()
            .times(1)
            .returning(|_, _| Err(AppError::auth_protocol("Falha na autenticação: 401")));
        api.expect_submit_clock_event().times(0);

        let mut locator = MockLocationProvider::new();
        locator.expect_locate().times(0);

        let orchestrator =
            RegistrationOrchestrator::new(configured_vault(), Arc::new(api), Arc::new(locator));

        let outcome = orchestrator.register_time().await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Falha na autenticação: 401");
    }

    #[tokio::test]
    async fn test_location_failure_uses_fallback() {
        let mut api = MockAttendanceApi::new();
        api.expect_authenticate().returning(|_, _| Ok(session()));
        api.expect_submit_clock_event()
            .withf(|_, event| event.coordinates() == Coordinates::new(-27.572293, -48.5095271))
            .times(1)
            .returning(|_, _| Ok("Ponto já registrado".to_string()));

        let mut locator = MockLocationProvider::new();
        locator
            .expect_locate()
            .returning(|| Err(AppError::Location("timeout".to_string())));

        let orchestrator =
            RegistrationOrchestrator::new(configured_vault(), Arc::new(api), Arc::new(locator));

        let outcome = orchestrator.register_time().await;

        assert!(outcome.success);
        assert_eq!(outcome.message, "Ponto já registrado");
    }

    #[tokio::test]
    async fn test_rejected_submission() {
        let mut api = MockAttendanceApi::new();
        api.expect_authenticate().returning(|_, _| Ok(session()));
        api.expect_submit_clock_event()
            .returning(|_, _| Err(AppError::registration(MSG_REGISTER_FAILED)));

        let orchestrator = RegistrationOrchestrator::new(
            configured_vault(),
            Arc::new(api),
            Arc::new(fixed_locator(Coordinates::fallback())),
        );

        let outcome = orchestrator.register_time().await;

        assert!(!outcome.success);
        assert_eq!(outcome.message, MSG_REGISTER_FAILED);
    }

    #[tokio::test]
    async fn test_spawned_registration_reports_through_callback() {
        let mut api = MockAttendanceApi::new();
        api.expect_authenticate().returning(|_, _| Ok(session()));
        api.expect_submit_clock_event()
            .returning(|_, _| Ok(MSG_REGISTERED.to_string()));

        let service: Arc<dyn RegistrationService> = Arc::new(RegistrationOrchestrator::new(
            configured_vault(),
            Arc::new(api),
            Arc::new(fixed_locator(Coordinates::fallback())),
        ));

        let (tx, rx) = tokio::sync::oneshot::channel();
        spawn_registration(service, move |outcome| {
            let _ = tx.send(outcome);
        })
        .await
        .unwrap();

        assert!(rx.await.unwrap().success);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = current_timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(&ts[2..3], ":");
        assert_eq!(&ts[5..6], ":");
    }
}
