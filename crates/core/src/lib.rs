pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use models::{
    analytics::{AllocationSlice, HoldingPerformance, PortfolioTotals},
    holding::{AssetClass, Holding},
    ledger::Ledger,
    projection::{ProjectionResult, SimulationParams},
    settings::{validate_currency_code, Settings, SimulatorSettings},
    transaction::Transaction,
};
use services::{
    aggregation_service::AggregationService, holding_service::HoldingService,
    projection_service::ProjectionService,
};
use storage::repository::LedgerRepository;
use tracing::info;
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the ZiFÓLIO core library.
/// Holds one user's ledger and the services that operate on it.
#[must_use]
pub struct Zifolio {
    ledger: Ledger,
    holding_service: HoldingService,
    aggregation_service: AggregationService,
    projection_service: ProjectionService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for Zifolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zifolio")
            .field("user_id", &self.ledger.user_id)
            .field("holdings", &self.ledger.holdings.len())
            .field("transactions", &self.ledger.transactions.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Zifolio {
    /// Start an empty ledger for `user_id` with default settings.
    pub fn create_new(user_id: impl Into<String>) -> Result<Self, CoreError> {
        let ledger = Ledger::new(user_id);
        ledger.validate()?;
        Ok(Self::build(ledger))
    }

    /// Load the ledger stored for `user_id`. Missing and corrupt records
    /// are reported as errors.
    pub fn open<R: LedgerRepository + ?Sized>(repo: &R, user_id: &str) -> Result<Self, CoreError> {
        let ledger = repo.get(user_id)?.require(user_id)?;
        info!(user_id, holdings = ledger.holdings.len(), "ledger loaded");
        Ok(Self::build(ledger))
    }

    /// Load the stored ledger, or start a fresh one if none exists yet.
    /// A corrupt record is still an error; it is never silently replaced.
    pub fn open_or_create<R: LedgerRepository + ?Sized>(
        repo: &R,
        user_id: &str,
    ) -> Result<Self, CoreError> {
        match repo.get(user_id)? {
            storage::repository::RecordRead::Missing => Self::create_new(user_id),
            other => Ok(Self::build(other.require(user_id)?)),
        }
    }

    /// Persist the ledger. Clears the unsaved-changes flag on success.
    pub fn save<R: LedgerRepository + ?Sized>(&mut self, repo: &mut R) -> Result<(), CoreError> {
        repo.put(&self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.ledger.user_id
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Add a holding; its `Buy` entry is logged in the same step.
    pub fn add_holding(&mut self, holding: Holding, date: NaiveDate) -> Result<Uuid, CoreError> {
        let id = self
            .holding_service
            .add_holding(&mut self.ledger, holding, date)?;
        self.dirty = true;
        Ok(id)
    }

    /// Replace a holding's fields (matched by id) and log a `Revaluation`.
    pub fn update_holding(&mut self, updated: Holding, date: NaiveDate) -> Result<(), CoreError> {
        self.holding_service
            .update_holding(&mut self.ledger, updated, date)?;
        self.dirty = true;
        Ok(())
    }

    /// Mark a holding to a new unit price.
    pub fn set_price(
        &mut self,
        holding_id: Uuid,
        current_price_unit: f64,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        self.holding_service
            .record_revaluation(&mut self.ledger, holding_id, current_price_unit, date)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a holding and log a `Sell` for its current value.
    pub fn remove_holding(&mut self, holding_id: Uuid, date: NaiveDate) -> Result<Holding, CoreError> {
        let removed = self
            .holding_service
            .remove_holding(&mut self.ledger, holding_id, date)?;
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn get_holding(&self, holding_id: Uuid) -> Option<&Holding> {
        HoldingService::find(&self.ledger, holding_id).ok()
    }

    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.ledger.holdings
    }

    #[must_use]
    pub fn holdings_by_class(&self, asset_class: AssetClass) -> Vec<&Holding> {
        self.ledger
            .holdings
            .iter()
            .filter(|h| h.asset_class == asset_class)
            .collect()
    }

    /// Search holdings by name (case-insensitive substring).
    #[must_use]
    pub fn search_holdings(&self, query: &str) -> Vec<&Holding> {
        let q = query.to_lowercase();
        self.ledger
            .holdings
            .iter()
            .filter(|h| h.name.to_lowercase().contains(&q))
            .collect()
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Transaction log, newest first.
    #[must_use]
    pub fn transactions(&self) -> Vec<&Transaction> {
        self.holding_service.get_transactions(&self.ledger)
    }

    #[must_use]
    pub fn transactions_for(&self, holding_id: Uuid) -> Vec<&Transaction> {
        self.holding_service
            .get_transactions_for(&self.ledger, holding_id)
    }

    // ── Analytics ───────────────────────────────────────────────────

    /// Dashboard totals over all current holdings.
    #[must_use]
    pub fn totals(&self) -> PortfolioTotals {
        self.aggregation_service.aggregate(&self.ledger.holdings)
    }

    /// Asset-list rows, largest position first.
    #[must_use]
    pub fn performances(&self) -> Vec<HoldingPerformance> {
        self.aggregation_service
            .performances(&self.ledger.holdings)
    }

    #[must_use]
    pub fn allocation(&self) -> Vec<AllocationSlice> {
        self.aggregation_service.allocation(&self.ledger.holdings)
    }

    // ── Simulator ───────────────────────────────────────────────────

    /// Run the simulator after clamping the inputs to the slider bounds.
    #[must_use]
    pub fn simulate(&self, params: &SimulationParams) -> ProjectionResult {
        let clamped = params.clamped(&self.ledger.settings.simulator);
        self.projection_service.simulate(&clamped)
    }

    /// Run the simulator with its initial slider positions.
    #[must_use]
    pub fn simulate_defaults(&self) -> ProjectionResult {
        let params = SimulationParams::defaults(&self.ledger.settings.simulator);
        self.projection_service.simulate(&params)
    }

    /// Project a fixed-income holding's current value at its own rate.
    /// The holding's rate is used unclamped.
    pub fn simulate_holding(&self, holding_id: Uuid, years: u32) -> Result<ProjectionResult, CoreError> {
        let holding = HoldingService::find(&self.ledger, holding_id)?;
        let rate = holding.annual_rate_pct.ok_or_else(|| {
            CoreError::ValidationError(format!(
                "Holding '{}' has no annual rate to project",
                holding.name
            ))
        })?;
        Ok(self
            .projection_service
            .project(holding.current_value(), rate, years))
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set the display currency (3 ASCII letters, stored uppercased).
    pub fn set_display_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        self.ledger.settings.display_currency = validate_currency_code(currency)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace the simulator bounds and defaults after validating them.
    pub fn set_simulator_settings(&mut self, simulator: SimulatorSettings) -> Result<(), CoreError> {
        simulator.validate()?;
        self.ledger.settings.simulator = simulator;
        self.dirty = true;
        Ok(())
    }

    /// Returns `true` if the ledger has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Unencrypted JSON snapshot of the whole ledger.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Export the transaction log as CSV.
    /// Columns: id, kind, holding_id, holding_name, amount, date, notes
    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        let mut csv = String::from("id,kind,holding_id,holding_name,amount,date,notes\n");
        for t in &self.ledger.transactions {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                t.id,
                t.kind,
                t.holding_id,
                csv_field(&t.holding_name),
                t.amount,
                t.date,
                csv_field(t.notes.as_deref().unwrap_or("")),
            ));
        }
        csv
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            holding_service: HoldingService::new(),
            aggregation_service: AggregationService::new(),
            projection_service: ProjectionService::new(),
            dirty: false,
        }
    }
}

/// Quote a CSV field if it contains a comma, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
