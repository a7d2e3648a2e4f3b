//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod csv_bid_repo;

pub use csv_bid_repo::CsvBidRepository;
