use std::collections::BTreeMap;

use tracing::debug;

use crate::models::analytics::{AllocationSlice, HoldingPerformance, PortfolioTotals};
use crate::models::holding::{AssetClass, Holding};

/// Computes portfolio totals, per-holding returns and allocation.
///
/// Folds over a snapshot slice and never mutates it. Every percentage is
/// guarded against a zero denominator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    /// Sum invested and current values and derive profit.
    ///
    /// An empty slice yields all-zero totals.
    pub fn aggregate(&self, holdings: &[Holding]) -> PortfolioTotals {
        let (total_invested, total_value) = holdings.iter().fold((0.0, 0.0), |(inv, val), h| {
            (inv + h.invested_amount, val + h.current_value())
        });

        let profit = total_value - total_invested;
        let profit_pct = if total_invested == 0.0 {
            0.0
        } else {
            (profit / total_invested) * 100.0
        };

        debug!(
            holdings = holdings.len(),
            total_invested, total_value, profit_pct, "aggregated portfolio"
        );

        PortfolioTotals {
            total_invested,
            total_value,
            profit,
            profit_pct,
        }
    }

    /// Return and profit of a single holding.
    pub fn performance(&self, holding: &Holding) -> HoldingPerformance {
        let current_value = holding.current_value();
        let profit = current_value - holding.invested_amount;
        HoldingPerformance {
            holding_id: holding.id,
            name: holding.name.clone(),
            asset_class: holding.asset_class,
            invested_amount: holding.invested_amount,
            current_value,
            profit,
            profit_pct: Self::profit_pct(holding.invested_amount, current_value),
        }
    }

    /// Per-holding rows for the asset list, largest current value first.
    pub fn performances(&self, holdings: &[Holding]) -> Vec<HoldingPerformance> {
        let mut rows: Vec<HoldingPerformance> =
            holdings.iter().map(|h| self.performance(h)).collect();
        rows.sort_by(|a, b| {
            b.current_value
                .partial_cmp(&a.current_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }

    /// Breakdown of current value by asset class, largest share first.
    pub fn allocation(&self, holdings: &[Holding]) -> Vec<AllocationSlice> {
        let mut by_class: BTreeMap<AssetClass, f64> = BTreeMap::new();
        for h in holdings {
            *by_class.entry(h.asset_class).or_insert(0.0) += h.current_value();
        }
        let total: f64 = by_class.values().sum();

        let mut slices: Vec<AllocationSlice> = by_class
            .into_iter()
            .map(|(asset_class, value)| AllocationSlice {
                asset_class,
                value,
                allocation_pct: if total > 0.0 {
                    (value / total) * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        slices.sort_by(|a, b| {
            b.allocation_pct
                .partial_cmp(&a.allocation_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        slices
    }

    /// `(current - invested) / invested * 100`, or `None` for a zero cost basis.
    pub fn profit_pct(invested_amount: f64, current_value: f64) -> Option<f64> {
        if invested_amount == 0.0 {
            None
        } else {
            Some((current_value - invested_amount) / invested_amount * 100.0)
        }
    }
}
