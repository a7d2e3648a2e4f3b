//! CSV-backed implementation of BidRecordRepository

use std::path::Path;

use mavuno_domain::model::BidRecord;
use mavuno_domain::repository::BidRecordRepository;
use mavuno_types::Error;

use crate::bids_csv::load_bids_from_csv;

/// Bid batch loaded once from a CSV file
pub struct CsvBidRepository {
    bids: Vec<BidRecord>,
}

impl CsvBidRepository {
    pub fn open(csv_path: impl AsRef<Path>) -> Result<Self, Error> {
        let csv_path = csv_path.as_ref();
        if !csv_path.exists() {
            return Err(Error::FileNotFound(csv_path.display().to_string()));
        }
        let bids = load_bids_from_csv(csv_path)?;
        Ok(Self { bids })
    }
}

impl BidRecordRepository for CsvBidRepository {
    fn find_all(&self) -> Result<Vec<BidRecord>, Error> {
        Ok(self.bids.clone())
    }

    fn find_by_id(&self, bid_id: &str) -> Result<Option<BidRecord>, Error> {
        Ok(self.bids.iter().find(|b| b.bid_id == bid_id).cloned())
    }

    fn find_by_group(&self, farmer_group: &str) -> Result<Vec<BidRecord>, Error> {
        Ok(self
            .bids
            .iter()
            .filter(|b| b.farmer_group.eq_ignore_ascii_case(farmer_group))
            .cloned()
            .collect())
    }
}
