//! Domain services

pub mod bid_gate;
pub mod fee_calculator;
pub mod settlement_report;

pub use bid_gate::{check_submission, SubmissionCheck};
pub use fee_calculator::{compute_fee_breakdown, minimum_quantity, MINIMUM_QUANTITY_KG};
pub use settlement_report::{generate_settlement_report, settle_bids, SettlementResult};
