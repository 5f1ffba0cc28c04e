//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill the two
//! use cases: updating the stored login and registering a clock event.
//! They depend on the infra traits, so every collaborator can be swapped.

pub mod container;
mod credentials_service;
mod registration_service;
mod vault;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use credentials_service::{CredentialsManager, CredentialsService, VaultStatus};
pub use registration_service::{
    current_timestamp, spawn_registration, RegistrationOrchestrator, RegistrationPhase,
    RegistrationService,
};
pub use vault::Vault;

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
