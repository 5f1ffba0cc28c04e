//! Commands module - CLI command implementations.
//!
//! The terminal presentation adapter: each command only calls the backend
//! services and prints what they return.

pub mod configure;
pub mod register;
pub mod status;
