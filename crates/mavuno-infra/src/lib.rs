//! Infrastructure layer - bid batch loading and persistence adapters

pub mod bids_csv;
pub mod persistence;

pub use bids_csv::{load_bids_from_csv, BidCsvError};
