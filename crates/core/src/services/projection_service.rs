use tracing::debug;

use crate::models::projection::{ProjectionPoint, ProjectionResult, SimulationParams};

/// Compound-interest simulator.
///
/// Pure computation with no I/O and no shared state. Inputs are accepted as-is:
/// range checks belong to the caller (see `SimulationParams::clamped`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionService;

impl ProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Project `principal` month by month over `years` at a nominal annual rate.
    ///
    /// The monthly rate is `annual_rate_pct / 100 / 12` (no effective-rate
    /// conversion). Every emitted value is rounded to the whole currency unit
    /// and the *rounded* value is what compounds into the next month, so the
    /// series drifts slightly from `principal * (1 + m)^n`.
    ///
    /// Returns `years * 12 + 1` points; month 0 is the principal itself.
    /// The series is allocated in one go, so memory grows linearly with
    /// `years` (16 bytes per month).
    pub fn project(&self, principal: f64, annual_rate_pct: f64, years: u32) -> ProjectionResult {
        let months = u64::from(years) * 12;
        let monthly_rate = annual_rate_pct / 100.0 / 12.0;
        let growth = 1.0 + monthly_rate;

        debug!(principal, annual_rate_pct, years, months, "running projection");

        let mut series = Vec::with_capacity(usize::try_from(months + 1).unwrap_or(0));
        let mut value = principal.round();
        let start = value;

        for month in 0..=months {
            series.push(ProjectionPoint {
                month_index: month,
                value,
            });
            value = (value * growth).round();
        }

        let final_value = series.last().map(|p| p.value).unwrap_or(start);

        ProjectionResult {
            series,
            total_return: final_value - start,
        }
    }

    /// Convenience wrapper taking the simulator's parameter struct.
    pub fn simulate(&self, params: &SimulationParams) -> ProjectionResult {
        self.project(params.principal, params.annual_rate_pct, params.years)
    }
}
