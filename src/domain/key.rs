//! Storage key derivation.
//!
//! PBKDF2-HMAC-SHA256 over a passphrase and salt that are compiled into the
//! binary. The key is recomputed on every cipher call and never persisted.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::config::{VAULT_KDF_ITERATIONS, VAULT_PASSPHRASE, VAULT_SALT};

/// Length of the derived key in bytes
pub const DERIVED_KEY_LEN: usize = 32;

/// 32-byte symmetric key derived from the vault passphrase.
///
/// The first half signs tokens (HMAC-SHA256), the second half encrypts
/// them (AES-128-CBC).
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; DERIVED_KEY_LEN]);

// Don't expose key material in debug output
impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DerivedKey").field(&"[REDACTED]").finish()
    }
}

impl DerivedKey {
    /// Derive a key from `passphrase` and `salt` with the vault iteration count.
    pub fn derive(passphrase: &str, salt: &[u8]) -> Self {
        Self::derive_with_iterations(passphrase, salt, VAULT_KDF_ITERATIONS)
    }

    /// The key every vault token is sealed with.
    pub fn vault() -> Self {
        Self::derive(VAULT_PASSPHRASE, VAULT_SALT)
    }

    pub(crate) fn derive_with_iterations(passphrase: &str, salt: &[u8], iterations: u32) -> Self {
        let mut key = [0u8; DERIVED_KEY_LEN];
        pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, &mut key);
        Self(key)
    }

    /// HMAC signing half.
    pub fn signing_key(&self) -> &[u8] {
        &self.0[..16]
    }

    /// AES encryption half.
    pub fn encryption_key(&self) -> &[u8] {
        &self.0[16..]
    }

    pub fn as_bytes(&self) -> &[u8; DERIVED_KEY_LEN] {
        &self.0
    }
}
