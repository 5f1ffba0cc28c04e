//! Domain layer - Core entities and value objects
//!
//! The vault record, the storage key and cipher, and the attendance
//! types exchanged with the remote service. No I/O happens here.

pub mod attendance;
pub mod cipher;
pub mod credentials;
pub mod key;

pub use attendance::{ClockEvent, Coordinates, EmployeeId, Session};
pub use cipher::CredentialCipher;
pub use credentials::Credentials;
pub use key::DerivedKey;
