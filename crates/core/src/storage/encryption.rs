use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::CoreError;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;

/// Argon2id cost parameters. Written into every file header so older
/// files stay readable if the defaults change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Number of passes
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 19_456, // 19 MiB, OWASP baseline for Argon2id
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Reject parameters outside safe bounds (crafted headers could
    /// otherwise demand gigabytes of memory).
    pub fn check_bounds(&self) -> Result<(), CoreError> {
        if !(8..=1_048_576).contains(&self.memory_cost) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF memory_cost out of range: {} KiB (expected 8..=1048576)",
                self.memory_cost
            )));
        }
        if !(1..=20).contains(&self.time_cost) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF time_cost out of range: {} (expected 1..=20)",
                self.time_cost
            )));
        }
        if !(1..=16).contains(&self.parallelism) {
            return Err(CoreError::InvalidFileFormat(format!(
                "KDF parallelism out of range: {} (expected 1..=16)",
                self.parallelism
            )));
        }
        Ok(())
    }
}

/// AES-256-GCM cipher keyed from a password via Argon2id.
pub struct LedgerCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for LedgerCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LedgerCipher(<redacted>)")
    }
}

impl LedgerCipher {
    /// Derive the key for `password` and `salt`.
    pub fn derive(password: &str, salt: &[u8; SALT_LEN], params: &KdfParams) -> Result<Self, CoreError> {
        let argon2_params = Params::new(
            params.memory_cost,
            params.time_cost,
            params.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| CoreError::Encryption(format!("Invalid Argon2 params: {e}")))?;

        let mut key = [0u8; KEY_LEN];
        Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params)
            .hash_password_into(password.as_bytes(), salt, &mut key)
            .map_err(|e| CoreError::Encryption(format!("Key derivation failed: {e}")))?;

        let cipher = Aes256Gcm::new_from_slice(&key)
            .map_err(|e| CoreError::Encryption(format!("Failed to create cipher: {e}")))?;
        Ok(Self { cipher })
    }

    /// Encrypt; the returned ciphertext carries the 16-byte GCM tag.
    pub fn seal(&self, plaintext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        self.cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|e| CoreError::Encryption(format!("Encryption failed: {e}")))
    }

    /// Decrypt and authenticate. A wrong password and a tampered file are
    /// indistinguishable and both yield `CoreError::Decryption`.
    pub fn open(&self, ciphertext: &[u8], nonce: &[u8; NONCE_LEN]) -> Result<Vec<u8>, CoreError> {
        Ok(self.cipher.decrypt(Nonce::from_slice(nonce), ciphertext)?)
    }
}

/// Fill an array with OS randomness (salts and nonces).
pub fn random_bytes<const N: usize>() -> Result<[u8; N], CoreError> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Encryption(format!("Failed to gather randomness: {e}")))?;
    Ok(buf)
}
