use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::holding::AssetClass;

/// Dashboard totals across all of a user's holdings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of every holding's cost basis
    pub total_invested: f64,

    /// Sum of every holding's mark value (quantity × unit price)
    pub total_value: f64,

    /// total_value - total_invested
    pub profit: f64,

    /// (profit / total_invested) * 100, or 0 when nothing is invested
    pub profit_pct: f64,
}

/// One row of the asset list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingPerformance {
    pub holding_id: Uuid,
    pub name: String,
    pub asset_class: AssetClass,
    pub invested_amount: f64,
    pub current_value: f64,
    pub profit: f64,

    /// Percentage return; `None` when the cost basis is zero
    pub profit_pct: Option<f64>,
}

/// Share of the portfolio held in one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub asset_class: AssetClass,
    pub value: f64,

    /// Allocation percentage (class value / total value × 100)
    pub allocation_pct: f64,
}
