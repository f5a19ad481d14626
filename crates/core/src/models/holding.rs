use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// The instrument category of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetClass {
    /// Corporate or sovereign bonds (Obrigações)
    Bond,
    /// Short-dated treasury bills (Bilhetes do Tesouro)
    TreasuryBill,
    /// Treasury bonds (Obrigações do Tesouro)
    TreasuryBond,
    /// Listed shares
    Equity,
    /// Investment fund units
    Fund,
}

impl AssetClass {
    /// Fixed-income classes carry a coupon/yield rate the simulator can project.
    pub fn is_fixed_income(&self) -> bool {
        matches!(
            self,
            AssetClass::Bond | AssetClass::TreasuryBill | AssetClass::TreasuryBond
        )
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Bond => write!(f, "Bond"),
            AssetClass::TreasuryBill => write!(f, "TreasuryBill"),
            AssetClass::TreasuryBond => write!(f, "TreasuryBond"),
            AssetClass::Equity => write!(f, "Equity"),
            AssetClass::Fund => write!(f, "Fund"),
        }
    }
}

/// A user's position in a single instrument.
///
/// `invested_amount` is the cost basis; the mark value is always derived
/// from `quantity * current_price_unit` and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: Uuid,

    /// Display name (e.g. "OT 2027 16.5%", "BAI")
    pub name: String,

    pub asset_class: AssetClass,

    /// Total amount paid for the position, in the display currency
    pub invested_amount: f64,

    /// Number of units held (at least 1)
    pub quantity: u32,

    /// Latest mark price per unit
    pub current_price_unit: f64,

    /// Nominal annual rate in percent for fixed-income instruments (e.g. 16.5)
    #[serde(default)]
    pub annual_rate_pct: Option<f64>,

    pub purchase_date: NaiveDate,
}

impl Holding {
    pub fn new(
        name: impl Into<String>,
        asset_class: AssetClass,
        invested_amount: f64,
        quantity: u32,
        current_price_unit: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            asset_class,
            invested_amount,
            quantity,
            current_price_unit,
            annual_rate_pct: None,
            purchase_date,
        }
    }

    /// Attach a nominal annual rate (builder style).
    pub fn with_rate(mut self, annual_rate_pct: f64) -> Self {
        self.annual_rate_pct = Some(annual_rate_pct);
        self
    }

    /// Mark-to-market value of the position.
    pub fn current_value(&self) -> f64 {
        f64::from(self.quantity) * self.current_price_unit
    }

    /// Rules:
    /// - Name must not be blank
    /// - Quantity must be at least 1
    /// - Amounts must be finite and non-negative
    /// - A rate, if given, must be finite
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Holding name must not be empty".into()));
        }
        if self.quantity == 0 {
            return Err(CoreError::ValidationError(format!(
                "Holding '{}' must have a quantity of at least 1",
                self.name
            )));
        }
        if !self.invested_amount.is_finite() || self.invested_amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Invested amount for '{}' must be a non-negative number, got {}",
                self.name, self.invested_amount
            )));
        }
        if !self.current_price_unit.is_finite() || self.current_price_unit < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Unit price for '{}' must be a non-negative number, got {}",
                self.name, self.current_price_unit
            )));
        }
        if let Some(rate) = self.annual_rate_pct {
            if !rate.is_finite() {
                return Err(CoreError::ValidationError(format!(
                    "Annual rate for '{}' must be a finite number",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
