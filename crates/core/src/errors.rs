use thiserror::Error;

/// Unified error type for the entire zifolio-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// The numeric core (projection and aggregation) never fails; these
/// variants cover validation, storage and encryption.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted file")]
    Decryption,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Repository ──────────────────────────────────────────────────
    #[error("No ledger stored for user '{0}'")]
    LedgerNotFound(String),

    #[error("Corrupt ledger record for user '{user_id}': {reason}")]
    CorruptRecord { user_id: String, reason: String },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
