pub mod analytics;
pub mod holding;
pub mod ledger;
pub mod projection;
pub mod settings;
pub mod transaction;
