//! Shared result types handed to presentation adapters.

pub mod outcome;

pub use outcome::{RegistrationOutcome, UpdateOutcome};
