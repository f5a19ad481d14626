use std::collections::BTreeMap;

use tracing::warn;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::repository::{LedgerRepository, RecordRead};

/// Key-value store holding each ledger as JSON bytes, like a browser's
/// local storage would. Useful for WASM frontends and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: BTreeMap<String, Vec<u8>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under a key without any checks (imports, fixtures).
    pub fn put_raw(&mut self, user_id: impl Into<String>, bytes: Vec<u8>) {
        self.records.insert(user_id.into(), bytes);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LedgerRepository for InMemoryRepository {
    fn get(&self, user_id: &str) -> Result<RecordRead<Ledger>, CoreError> {
        let Some(bytes) = self.records.get(user_id) else {
            return Ok(RecordRead::Missing);
        };

        let ledger: Ledger = match serde_json::from_slice(bytes) {
            Ok(l) => l,
            Err(e) => {
                warn!(user_id, error = %e, "stored ledger is not valid JSON");
                return Ok(RecordRead::Corrupt { reason: e.to_string() });
            }
        };
        if ledger.user_id != user_id {
            warn!(user_id, stored = %ledger.user_id, "stored ledger belongs to another user");
            return Ok(RecordRead::Corrupt {
                reason: format!("record keyed '{user_id}' belongs to '{}'", ledger.user_id),
            });
        }
        if let Err(e) = ledger.validate() {
            warn!(user_id, error = %e, "stored ledger failed validation");
            return Ok(RecordRead::Corrupt { reason: e.to_string() });
        }
        Ok(RecordRead::Valid(ledger))
    }

    fn put(&mut self, ledger: &Ledger) -> Result<(), CoreError> {
        ledger.validate()?;
        let bytes = serde_json::to_vec(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        self.records.insert(ledger.user_id.clone(), bytes);
        Ok(())
    }

    fn delete(&mut self, user_id: &str) -> Result<bool, CoreError> {
        Ok(self.records.remove(user_id).is_some())
    }

    fn user_ids(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.records.keys().cloned().collect())
    }
}
