use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// User-configurable settings, stored inside each user's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency all amounts are displayed in (ISO code, e.g. "AOA").
    pub display_currency: String,

    /// Bounds and defaults for the compound-interest simulator.
    #[serde(default)]
    pub simulator: SimulatorSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_currency: "AOA".to_string(),
            simulator: SimulatorSettings::default(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_currency_code(&self.display_currency)?;
        self.simulator.validate()
    }
}

/// Slider bounds and initial values for the simulator page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    pub min_rate_pct: f64,
    pub max_rate_pct: f64,
    pub min_years: u32,
    pub max_years: u32,
    pub default_principal: f64,
    pub default_rate_pct: f64,
    pub default_years: u32,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            min_rate_pct: 5.0,
            max_rate_pct: 30.0,
            min_years: 1,
            max_years: 10,
            default_principal: 1_000_000.0,
            default_rate_pct: 16.5,
            default_years: 3,
        }
    }
}

impl SimulatorSettings {
    /// Bounds must be finite and ordered, and defaults must sit inside them.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.min_rate_pct.is_finite()
            || !self.max_rate_pct.is_finite()
            || self.min_rate_pct > self.max_rate_pct
        {
            return Err(CoreError::ValidationError(format!(
                "Simulator rate bounds are invalid: [{}, {}]",
                self.min_rate_pct, self.max_rate_pct
            )));
        }
        if self.min_years > self.max_years {
            return Err(CoreError::ValidationError(format!(
                "Simulator year bounds are invalid: [{}, {}]",
                self.min_years, self.max_years
            )));
        }
        if !(self.min_rate_pct..=self.max_rate_pct).contains(&self.default_rate_pct)
            || !(self.min_years..=self.max_years).contains(&self.default_years)
        {
            return Err(CoreError::ValidationError(
                "Simulator defaults must lie within the configured bounds".into(),
            ));
        }
        if !self.default_principal.is_finite() || self.default_principal < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Simulator default principal must be a non-negative amount, got {}",
                self.default_principal
            )));
        }
        Ok(())
    }
}

/// Normalize and check a currency code: exactly 3 ASCII letters.
pub fn validate_currency_code(code: &str) -> Result<String, CoreError> {
    let trimmed = code.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{code}': must be exactly 3 ASCII letters (e.g., AOA, USD, EUR)"
        )));
    }
    Ok(trimmed)
}
