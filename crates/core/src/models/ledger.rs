use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::holding::Holding;
use super::settings::Settings;
use super::transaction::Transaction;

/// The main data container for one user. Everything in here is serialized
/// as a single record, so holdings and their transaction log always travel
/// together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Owner of this record (the repository key)
    pub user_id: String,

    /// Open positions, in insertion order
    pub holdings: Vec<Holding>,

    /// Append-only history, oldest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub settings: Settings,
}

impl Ledger {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            holdings: Vec::new(),
            transactions: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Structural checks applied whenever a ledger is read back from storage.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.user_id.trim().is_empty() {
            return Err(CoreError::ValidationError("Ledger has an empty user id".into()));
        }
        for holding in &self.holdings {
            holding.validate()?;
        }
        let mut ids = std::collections::HashSet::new();
        if let Some(dup) = self.holdings.iter().find(|h| !ids.insert(h.id)) {
            return Err(CoreError::ValidationError(format!(
                "Duplicate holding id {}",
                dup.id
            )));
        }
        self.settings.validate()
    }
}
