//! Constants for bid fee policy

pub mod fee_rates;

pub use fee_rates::{bps_to_percent, policy_table, PolicyRow};
