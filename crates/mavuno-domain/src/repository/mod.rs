//! Repository trait definitions for bid batches

use crate::model::BidRecord;
use mavuno_types::Error;

/// Source of bid records awaiting settlement
pub trait BidRecordRepository {
    /// Load all bid records
    fn find_all(&self) -> Result<Vec<BidRecord>, Error>;

    /// Find a bid by its identifier
    fn find_by_id(&self, bid_id: &str) -> Result<Option<BidRecord>, Error>;

    /// Find all bids submitted by a farmer group
    fn find_by_group(&self, farmer_group: &str) -> Result<Vec<BidRecord>, Error>;
}
