pub mod aggregation_service;
pub mod holding_service;
pub mod projection_service;
