use tracing::debug;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::encryption::{self, KdfParams, LedgerCipher};
use super::format::{self, Envelope};

/// Seal and unseal ledgers as portable encrypted byte blobs.
pub struct StorageManager;

impl StorageManager {
    /// Ledger → bincode → AES-256-GCM(Argon2id(password)) → ZFLO container.
    pub fn save_to_bytes(ledger: &Ledger, password: &str) -> Result<Vec<u8>, CoreError> {
        Self::save_with_params(ledger, password, KdfParams::default())
    }

    /// Same as `save_to_bytes` with explicit KDF costs (cheap ones in tests).
    pub fn save_with_params(
        ledger: &Ledger,
        password: &str,
        kdf_params: KdfParams,
    ) -> Result<Vec<u8>, CoreError> {
        kdf_params
            .check_bounds()
            .map_err(|e| CoreError::Encryption(e.to_string()))?;

        let plaintext = bincode::serialize(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;

        let envelope = Envelope {
            version: format::CURRENT_VERSION,
            kdf_params,
            salt: encryption::random_bytes()?,
            nonce: encryption::random_bytes()?,
        };
        let cipher = LedgerCipher::derive(password, &envelope.salt, &envelope.kdf_params)?;
        let ciphertext = cipher.seal(&plaintext, &envelope.nonce)?;

        debug!(user_id = %ledger.user_id, bytes = ciphertext.len(), "ledger sealed");
        Ok(format::encode(&envelope, &ciphertext))
    }

    /// ZFLO bytes → header → Argon2id(password, salt) → decrypt → bincode → Ledger.
    ///
    /// The decoded ledger is validated before it is returned.
    pub fn load_from_bytes(data: &[u8], password: &str) -> Result<Ledger, CoreError> {
        let (envelope, ciphertext) = format::decode(data)?;
        let cipher = LedgerCipher::derive(password, &envelope.salt, &envelope.kdf_params)?;
        let plaintext = cipher.open(ciphertext, &envelope.nonce)?;

        let ledger: Ledger = bincode::deserialize(&plaintext)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))?;
        ledger.validate()?;

        debug!(user_id = %ledger.user_id, holdings = ledger.holdings.len(), "ledger opened");
        Ok(ledger)
    }
}
