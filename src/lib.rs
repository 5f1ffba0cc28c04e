//! Ponto client - Credential vault and clock-in client
//!
//! Stores the user's attendance login encrypted at rest and, on demand,
//! authenticates against the attendance service and submits one clock
//! event, normalizing the service's loosely specified answers into a
//! single `(success, message, timestamp)` outcome.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: Terminal presentation adapter
//! - **config**: Application configuration and constants
//! - **domain**: Credentials, storage key and cipher, attendance types
//! - **services**: Credentials update and registration use cases
//! - **infra**: Vault file, attendance API, geolocation
//! - **types**: Outcome types returned to views
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Store the login (password read from stdin)
//! echo 'secret' | cargo run -- configure --username alice --password-stdin
//!
//! # Register time now
//! cargo run -- register
//!
//! # Register time shortly after startup
//! cargo run -- --auto
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{CredentialCipher, Credentials, DerivedKey};
pub use errors::{AppError, AppResult};
pub use services::{ServiceContainer, Services};
pub use types::{RegistrationOutcome, UpdateOutcome};
