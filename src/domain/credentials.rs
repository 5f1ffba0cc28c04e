//! Credentials - the vault record mirrored to `config.json`.

use serde::{Deserialize, Serialize};

/// Stored login: plain username plus the encrypted password token.
///
/// A record is either fully unconfigured (both fields empty) or fully
/// usable (both set). Only those two shapes are ever written to disk.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub encrypted_password: String,
}

// Don't expose the token in debug output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("encrypted_password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, encrypted_password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            encrypted_password: encrypted_password.into(),
        }
    }

    /// Both username and password token present.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.encrypted_password.is_empty()
    }

    /// Neither field set.
    pub fn is_unconfigured(&self) -> bool {
        self.username.is_empty() && self.encrypted_password.is_empty()
    }

    /// Exactly one of the two fields set.
    pub fn is_partial(&self) -> bool {
        !self.is_configured() && !self.is_unconfigured()
    }

    pub fn has_password(&self) -> bool {
        !self.encrypted_password.is_empty()
    }
}
