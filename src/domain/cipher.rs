//! Credential cipher - Authenticated encryption of the stored password.
//!
//! Tokens use the Fernet layout so vaults written by the desktop
//! application stay readable:
//!
//! ```text
//! base64url( 0x80 | timestamp u64 BE | iv[16] | AES-128-CBC ciphertext | HMAC-SHA256[32] )
//! ```
//!
//! The key comes from [`DerivedKey::vault`], a constant of the program. This is
//! obfuscation against casual inspection of the config file, not a secrets
//! boundary.

use aes::Aes128;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::key::DerivedKey;
use crate::errors::{AppError, AppResult};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

const VERSION: u8 = 0x80;
const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const TAG_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;
const MIN_TOKEN_LEN: usize = HEADER_LEN + BLOCK_LEN + TAG_LEN;

/// Encrypts and decrypts the vault password.
pub struct CredentialCipher;

impl CredentialCipher {
    /// Encrypt `plaintext` under the vault key.
    ///
    /// Every call draws a fresh IV, so two encryptions of the same
    /// password never produce the same token.
    pub fn encrypt(plaintext: &str) -> AppResult<String> {
        Self::seal(&DerivedKey::vault(), plaintext)
    }

    /// Decrypt a stored token under the vault key.
    ///
    /// # Errors
    /// `NoPasswordStored` for an empty token, `Cipher` for anything that is
    /// malformed or fails verification.
    pub fn decrypt(token: &str) -> AppResult<String> {
        if token.is_empty() {
            return Err(AppError::NoPasswordStored);
        }
        Self::open(&DerivedKey::vault(), token)
    }

    /// Encrypt with an explicit key.
    pub fn seal(key: &DerivedKey, plaintext: &str) -> AppResult<String> {
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let timestamp = chrono::Utc::now().timestamp().max(0) as u64;

        let ciphertext = Aes128CbcEnc::new_from_slices(key.encryption_key(), &iv)
            .map_err(|e| AppError::cipher(format!("invalid key length: {}", e)))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut token = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
        token.push(VERSION);
        token.extend_from_slice(&timestamp.to_be_bytes());
        token.extend_from_slice(&iv);
        token.extend_from_slice(&ciphertext);

        let tag = signer(key)?.chain_update(&token).finalize().into_bytes();
        token.extend_from_slice(&tag);

        Ok(URL_SAFE.encode(token))
    }

    /// Decrypt with an explicit key.
    ///
    /// The tag is checked before any decryption happens. No TTL is applied to
    /// the embedded timestamp.
    pub fn open(key: &DerivedKey, token: &str) -> AppResult<String> {
        let data = URL_SAFE_NO_PAD
            .decode(token.trim().trim_end_matches('='))
            .map_err(|_| AppError::cipher("token is not valid base64"))?;

        if data.len() < MIN_TOKEN_LEN || (data.len() - HEADER_LEN - TAG_LEN) % BLOCK_LEN != 0 {
            return Err(AppError::cipher("token has an invalid length"));
        }
        if data[0] != VERSION {
            return Err(AppError::cipher("unsupported token version"));
        }

        let (signed, tag) = data.split_at(data.len() - TAG_LEN);
        signer(key)?
            .chain_update(signed)
            .verify_slice(tag)
            .map_err(|_| AppError::cipher("integrity check failed"))?;

        let iv = &signed[1 + TIMESTAMP_LEN..HEADER_LEN];
        let ciphertext = &signed[HEADER_LEN..];

        let plaintext = Aes128CbcDec::new_from_slices(key.encryption_key(), iv)
            .map_err(|e| AppError::cipher(format!("invalid key length: {}", e)))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| AppError::cipher("invalid padding"))?;

        String::from_utf8(plaintext).map_err(|_| AppError::cipher("plaintext is not UTF-8"))
    }
}

fn signer(key: &DerivedKey) -> AppResult<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(key.signing_key())
        .map_err(|e| AppError::cipher(format!("invalid signing key: {}", e)))
}
