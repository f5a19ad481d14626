use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened to a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A holding was opened (cost basis paid)
    Buy,
    /// A holding was closed (position value realised)
    Sell,
    /// Quantity, cost basis or mark price of a holding changed
    Revaluation,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Buy => write!(f, "Buy"),
            TransactionKind::Sell => write!(f, "Sell"),
            TransactionKind::Revaluation => write!(f, "Revaluation"),
        }
    }
}

/// One entry in a user's transaction log.
///
/// Entries are append-only and always written in the same commit as the
/// holding mutation they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,

    pub kind: TransactionKind,

    /// The holding this entry refers to (may no longer exist after a Sell)
    pub holding_id: Uuid,

    /// Holding name at the time of the entry, kept for display after removal
    pub holding_name: String,

    /// Monetary amount involved, in the display currency
    pub amount: f64,

    pub date: NaiveDate,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        holding_id: Uuid,
        holding_name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            holding_id,
            holding_name: holding_name.into(),
            amount,
            date,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
