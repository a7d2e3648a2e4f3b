//! Domain model types

pub mod bid_record;
pub mod fee_breakdown;
pub mod money;
pub mod policy;
pub mod quote;
pub mod truck_size;

pub use bid_record::BidRecord;
pub use fee_breakdown::FeeBreakdown;
pub use money::{BidAmount, Quantity};
pub use policy::{FeePolicy, TransportQcRates};
pub use quote::BidQuote;
pub use truck_size::TruckSize;
