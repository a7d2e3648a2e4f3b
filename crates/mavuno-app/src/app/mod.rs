//! Application use cases

mod quote_service;

pub use quote_service::{BidSelection, QuoteService};
