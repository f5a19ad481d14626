use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::ledger::Ledger;
use crate::models::transaction::{Transaction, TransactionKind};

/// Manages a ledger's holdings and keeps the transaction log in step.
///
/// Every mutation touches two collections (holdings and transactions).
/// Both changes are staged on a scratch copy of the ledger and swapped in
/// only when the whole step succeeds, so a failed mutation leaves the
/// ledger exactly as it was.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldingService;

impl HoldingService {
    pub fn new() -> Self {
        Self
    }

    /// Open a new position and log a `Buy` for its cost basis.
    pub fn add_holding(
        &self,
        ledger: &mut Ledger,
        holding: Holding,
        date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let id = holding.id;
        Self::commit(ledger, "add", |scratch| {
            holding.validate()?;
            if scratch.holdings.iter().any(|h| h.id == id) {
                return Err(CoreError::ValidationError(format!(
                    "Holding {id} already exists"
                )));
            }
            let entry = Transaction::new(
                TransactionKind::Buy,
                id,
                holding.name.clone(),
                holding.invested_amount,
                date,
            );
            scratch.holdings.push(holding);
            scratch.transactions.push(entry);
            Ok(())
        })?;
        info!(holding_id = %id, user_id = %ledger.user_id, "holding added");
        Ok(id)
    }

    /// Replace an existing holding (matched by `updated.id`) and log a
    /// `Revaluation` carrying its new mark value.
    pub fn update_holding(
        &self,
        ledger: &mut Ledger,
        updated: Holding,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        let id = updated.id;
        Self::commit(ledger, "update", |scratch| {
            updated.validate()?;
            let slot = scratch
                .holdings
                .iter_mut()
                .find(|h| h.id == id)
                .ok_or_else(|| CoreError::HoldingNotFound(id.to_string()))?;
            let entry = Transaction::new(
                TransactionKind::Revaluation,
                id,
                updated.name.clone(),
                updated.current_value(),
                date,
            );
            *slot = updated;
            scratch.transactions.push(entry);
            Ok(())
        })?;
        info!(holding_id = %id, user_id = %ledger.user_id, "holding updated");
        Ok(())
    }

    /// Mark a holding to a new unit price.
    pub fn record_revaluation(
        &self,
        ledger: &mut Ledger,
        holding_id: Uuid,
        current_price_unit: f64,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        let mut updated = Self::find(ledger, holding_id)?.clone();
        updated.current_price_unit = current_price_unit;
        self.update_holding(ledger, updated, date)
    }

    /// Close a position and log a `Sell` for its current value.
    /// Returns the removed holding.
    pub fn remove_holding(
        &self,
        ledger: &mut Ledger,
        holding_id: Uuid,
        date: NaiveDate,
    ) -> Result<Holding, CoreError> {
        let mut removed = None;
        Self::commit(ledger, "remove", |scratch| {
            let idx = scratch
                .holdings
                .iter()
                .position(|h| h.id == holding_id)
                .ok_or_else(|| CoreError::HoldingNotFound(holding_id.to_string()))?;
            let holding = scratch.holdings.remove(idx);
            scratch.transactions.push(Transaction::new(
                TransactionKind::Sell,
                holding.id,
                holding.name.clone(),
                holding.current_value(),
                date,
            ));
            removed = Some(holding);
            Ok(())
        })?;
        info!(holding_id = %holding_id, user_id = %ledger.user_id, "holding removed");
        removed.ok_or_else(|| CoreError::HoldingNotFound(holding_id.to_string()))
    }

    /// Look up a holding by id.
    pub fn find(ledger: &Ledger, holding_id: Uuid) -> Result<&Holding, CoreError> {
        ledger
            .holdings
            .iter()
            .find(|h| h.id == holding_id)
            .ok_or_else(|| CoreError::HoldingNotFound(holding_id.to_string()))
    }

    /// Transaction log, newest first (stable for same-day entries).
    pub fn get_transactions<'a>(&self, ledger: &'a Ledger) -> Vec<&'a Transaction> {
        let mut entries: Vec<&Transaction> = ledger.transactions.iter().rev().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Transactions that refer to one holding, newest first.
    pub fn get_transactions_for<'a>(
        &self,
        ledger: &'a Ledger,
        holding_id: Uuid,
    ) -> Vec<&'a Transaction> {
        self.get_transactions(ledger)
            .into_iter()
            .filter(|t| t.holding_id == holding_id)
            .collect()
    }

    /// Stage `mutation` on a copy of the ledger and swap it in on success.
    fn commit<F>(ledger: &mut Ledger, op: &str, mutation: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Ledger) -> Result<(), CoreError>,
    {
        let mut scratch = ledger.clone();
        match mutation(&mut scratch) {
            Ok(()) => {
                *ledger = scratch;
                Ok(())
            }
            Err(e) => {
                warn!(op, user_id = %ledger.user_id, error = %e, "ledger mutation rolled back");
                Err(e)
            }
        }
    }
}
