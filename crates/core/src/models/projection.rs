use serde::{Deserialize, Serialize};

use super::settings::SimulatorSettings;

/// One month of a compounding projection.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Elapsed months since the start (0 = the principal itself)
    pub month_index: u64,

    /// Accumulated value, rounded to the whole currency unit
    pub value: f64,
}

/// Full output of a projection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// `years * 12 + 1` points, month 0 first
    pub series: Vec<ProjectionPoint>,

    /// Interest accrued: final value minus the starting value
    pub total_return: f64,
}

impl ProjectionResult {
    /// Value at the last month of the projection.
    pub fn final_value(&self) -> f64 {
        self.series.last().map(|p| p.value).unwrap_or(0.0)
    }
}

/// Simulator inputs as they come from the range controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub years: u32,
}

impl SimulationParams {
    pub fn new(principal: f64, annual_rate_pct: f64, years: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            years,
        }
    }

    /// The simulator's initial state.
    pub fn defaults(settings: &SimulatorSettings) -> Self {
        Self {
            principal: settings.default_principal,
            annual_rate_pct: settings.default_rate_pct,
            years: settings.default_years,
        }
    }

    /// Restrict rate and duration to the slider bounds and the principal
    /// to non-negative values. The engine itself never clamps.
    pub fn clamped(&self, settings: &SimulatorSettings) -> Self {
        let principal = if self.principal.is_finite() {
            self.principal.max(0.0)
        } else {
            settings.default_principal
        };
        let annual_rate_pct = if self.annual_rate_pct.is_nan() {
            settings.default_rate_pct
        } else {
            self.annual_rate_pct
                .max(settings.min_rate_pct)
                .min(settings.max_rate_pct)
        };
        Self {
            principal,
            annual_rate_pct,
            years: self.years.max(settings.min_years).min(settings.max_years),
        }
    }
}
