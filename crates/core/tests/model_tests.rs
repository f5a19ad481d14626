use chrono::NaiveDate;
use zifolio_core::models::holding::{AssetClass, Holding};
use zifolio_core::models::ledger::Ledger;
use zifolio_core::models::projection::{ProjectionPoint, ProjectionResult};
use zifolio_core::models::settings::{validate_currency_code, Settings, SimulatorSettings};
use zifolio_core::models::transaction::{Transaction, TransactionKind};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  AssetClass
// ═══════════════════════════════════════════════════════════════════

mod asset_class {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(AssetClass::TreasuryBill.to_string(), "TreasuryBill");
        assert_eq!(AssetClass::Equity.to_string(), "Equity");
    }

    #[test]
    fn fixed_income_classes() {
        assert!(AssetClass::Bond.is_fixed_income());
        assert!(AssetClass::TreasuryBill.is_fixed_income());
        assert!(AssetClass::TreasuryBond.is_fixed_income());
        assert!(!AssetClass::Equity.is_fixed_income());
        assert!(!AssetClass::Fund.is_fixed_income());
    }

    #[test]
    fn serde_json_names() {
        let json = serde_json::to_string(&AssetClass::TreasuryBond).unwrap();
        assert_eq!(json, "\"TreasuryBond\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holding
// ═══════════════════════════════════════════════════════════════════

mod holding {
    use super::*;

    #[test]
    fn current_value_is_quantity_times_price() {
        let h = Holding::new("BAI", AssetClass::Equity, 800_000.0, 80, 10_500.0, d(2025, 5, 20));
        assert_eq!(h.current_value(), 840_000.0);
        assert_eq!(h.annual_rate_pct, None);
    }

    #[test]
    fn with_rate() {
        let h = Holding::new("OT", AssetClass::TreasuryBond, 1.0, 1, 1.0, d(2025, 1, 1)).with_rate(16.5);
        assert_eq!(h.annual_rate_pct, Some(16.5));
    }

    #[test]
    fn ids_are_unique() {
        let a = Holding::new("X", AssetClass::Fund, 1.0, 1, 1.0, d(2025, 1, 1));
        let b = Holding::new("X", AssetClass::Fund, 1.0, 1, 1.0, d(2025, 1, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let ok = Holding::new("BAI", AssetClass::Equity, 1.0, 1, 1.0, d(2025, 1, 1));
        ok.validate().unwrap();
        let mut h = ok.clone();
        h.name = " ".into();
        assert!(h.validate().is_err());
        let mut h = ok.clone();
        h.invested_amount = -100.0;
        assert!(h.validate().is_err());
        let mut h = ok.clone();
        h.current_price_unit = -5.0;
        assert!(h.validate().is_err());
        let h = ok.clone().with_rate(f64::NAN);
        assert!(h.validate().is_err());
    }

    #[test]
    fn ledger_validate_applies_holding_rules() {
        let mut l = Ledger::new("ana");
        l.holdings.push(Holding::new("BAI", AssetClass::Equity, -100.0, 1, 1.0, d(2025, 1, 1)));
        assert!(l.validate().is_err());
    }

    #[test]
    fn missing_rate_field_defaults_to_none() {
        let h = Holding::new("BAI", AssetClass::Equity, 1.0, 1, 1.0, d(2025, 1, 1));
        let mut value = serde_json::to_value(&h).unwrap();
        value.as_object_mut().unwrap().remove("annual_rate_pct");
        let back: Holding = serde_json::from_value(value).unwrap();
        assert_eq!(back, h);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_and_notes() {
        let h = uuid::Uuid::new_v4();
        let t = Transaction::new(TransactionKind::Sell, h, "BAI", 840_000.0, d(2025, 9, 1));
        assert_eq!(t.notes, None);
        let t = t.with_notes("closed position");
        assert_eq!(t.notes.as_deref(), Some("closed position"));
        assert_eq!(t.holding_id, h);
        assert_eq!(TransactionKind::Revaluation.to_string(), "Revaluation");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Projection
// ═══════════════════════════════════════════════════════════════════

mod projection {
    use super::*;

    #[test]
    fn final_value_of_empty_series_is_zero() {
        let r = ProjectionResult {
            series: Vec::new(),
            total_return: 0.0,
        };
        assert_eq!(r.final_value(), 0.0);
    }

    #[test]
    fn final_value_is_last_point() {
        let r = ProjectionResult {
            series: vec![
                ProjectionPoint { month_index: 0, value: 100.0 },
                ProjectionPoint { month_index: 1, value: 101.0 },
            ],
            total_return: 1.0,
        };
        assert_eq!(r.final_value(), 101.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.display_currency, "AOA");
        assert_eq!(s.simulator.min_rate_pct, 5.0);
        assert_eq!(s.simulator.max_rate_pct, 30.0);
        assert_eq!(s.simulator.min_years, 1);
        assert_eq!(s.simulator.max_years, 10);
        s.validate().unwrap();
    }

    #[test]
    fn currency_codes() {
        assert_eq!(validate_currency_code("aoa").unwrap(), "AOA");
        assert_eq!(validate_currency_code(" eur ").unwrap(), "EUR");
        assert!(validate_currency_code("KZ").is_err());
        assert!(validate_currency_code("US$").is_err());
    }

    #[test]
    fn default_outside_bounds_rejected() {
        let s = SimulatorSettings {
            default_rate_pct: 40.0,
            ..SimulatorSettings::default()
        };
        assert!(s.validate().is_err());
        let s = SimulatorSettings {
            min_years: 5,
            max_years: 2,
            ..SimulatorSettings::default()
        };
        assert!(s.validate().is_err());
        let s = SimulatorSettings {
            default_principal: -1.0,
            ..SimulatorSettings::default()
        };
        assert!(s.validate().is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    #[test]
    fn new_ledger_is_valid() {
        Ledger::new("ana").validate().unwrap();
    }

    #[test]
    fn duplicate_holding_ids_invalid() {
        let mut l = Ledger::new("ana");
        let h = Holding::new("BAI", AssetClass::Equity, 1.0, 1, 1.0, d(2025, 1, 1));
        l.holdings.push(h.clone());
        l.holdings.push(h);
        assert!(l.validate().is_err());
    }

    #[test]
    fn non_finite_amount_invalid() {
        let mut l = Ledger::new("ana");
        l.holdings.push(Holding::new("BAI", AssetClass::Equity, f64::INFINITY, 1, 1.0, d(2025, 1, 1)));
        assert!(l.validate().is_err());
    }

    #[test]
    fn bad_settings_invalid() {
        let mut l = Ledger::new("ana");
        l.settings.display_currency = "kwanza".into();
        assert!(l.validate().is_err());
    }
}
