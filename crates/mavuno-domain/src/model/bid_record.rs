use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bid row from a batch submitted for settlement.
///
/// Values are kept as loaded; validation happens when the bid is settled so
/// that one bad row does not reject the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub bid_id: String,
    pub farmer_group: String,
    pub gross_amount: Decimal,
    pub quantity_kg: Decimal,
    /// Raw truck size tag (e.g., "3-ton", "medium")
    pub truck_size: String,
    pub date: Option<chrono::NaiveDate>,
    /// Produce name (maize, beans, ...)
    pub produce: Option<String>,
}
