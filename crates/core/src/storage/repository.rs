use crate::errors::CoreError;
use crate::models::ledger::Ledger;

/// Outcome of reading a stored record.
///
/// Stored bytes are never trusted: anything that fails to decode or
/// validate comes back as `Corrupt` instead of an error, so callers can
/// decide whether to reset, repair or report it.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordRead<T> {
    Valid(T),
    Corrupt { reason: String },
    Missing,
}

impl<T> RecordRead<T> {
    /// Collapse into a `Result`, treating both `Corrupt` and `Missing` as errors.
    pub fn require(self, user_id: &str) -> Result<T, CoreError> {
        match self {
            RecordRead::Valid(v) => Ok(v),
            RecordRead::Corrupt { reason } => Err(CoreError::CorruptRecord {
                user_id: user_id.to_string(),
                reason,
            }),
            RecordRead::Missing => Err(CoreError::LedgerNotFound(user_id.to_string())),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RecordRead::Valid(_))
    }
}

/// Per-user ledger persistence.
///
/// A ledger is written as one record, so a holding change and its
/// transaction-log entry can never be persisted separately.
pub trait LedgerRepository {
    /// Read and validate the ledger stored for `user_id`.
    fn get(&self, user_id: &str) -> Result<RecordRead<Ledger>, CoreError>;

    /// Insert or overwrite the ledger keyed by `ledger.user_id`.
    fn put(&mut self, ledger: &Ledger) -> Result<(), CoreError>;

    /// Remove the record; returns whether one existed.
    fn delete(&mut self, user_id: &str) -> Result<bool, CoreError>;

    /// Every user id with a stored record, sorted.
    fn user_ids(&self) -> Result<Vec<String>, CoreError>;
}
