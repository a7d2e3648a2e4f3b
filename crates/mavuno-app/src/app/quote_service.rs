//! Quote Service - bid quoting and batch settlement use cases
//!
//! Wraps the pure fee calculator with a configured policy and the
//! logging the presentation layer relies on:
//! 1. Quote a single bid for the read-only summary view
//! 2. Gate submissions below the minimum quantity
//! 3. Settle a CSV batch of bids, optionally narrowed to one group or bid

use std::path::Path;

use mavuno_domain::model::{BidAmount, BidQuote, BidRecord, FeePolicy, Quantity, TruckSize};
use mavuno_domain::repository::BidRecordRepository;
use mavuno_domain::service::{check_submission, settle_bids, SettlementResult, SubmissionCheck};
use mavuno_infra::persistence::CsvBidRepository;
use mavuno_types::{Error, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::Config;

/// Which rows of a bid batch to settle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidSelection {
    All,
    /// Every bid of one farmer group (case-insensitive)
    Group(String),
    /// A single bid by id
    Bid(String),
}

pub struct QuoteService {
    policy: FeePolicy,
}

impl QuoteService {
    pub fn new(policy: FeePolicy) -> Self {
        Self { policy }
    }

    /// Build the service from the validated policy in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.policy()?))
    }

    pub fn policy(&self) -> &FeePolicy {
        &self.policy
    }

    /// Quote one bid.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` for a non-positive amount or quantity.
    pub fn quote(&self, gross: Decimal, quantity_kg: Decimal, truck: TruckSize) -> Result<BidQuote> {
        let quote = BidQuote::new(
            &self.policy,
            BidAmount::new(gross)?,
            Quantity::new(quantity_kg)?,
            truck,
        )?;
        debug!(
            gross = %quote.breakdown.gross_amount(),
            quantity_kg = %quote.quantity_kg,
            truck = truck.label(),
            net = %quote.breakdown.net_amount(),
            "computed bid quote"
        );
        Ok(quote)
    }

    pub fn check_submission(&self, quantity_kg: Decimal) -> SubmissionCheck {
        let check = check_submission(quantity_kg);
        if !check.allowed {
            debug!(quantity_kg = %quantity_kg, minimum_kg = %check.minimum_kg, "submission blocked");
        }
        check
    }

    pub fn settle_records(&self, records: &[BidRecord]) -> Vec<SettlementResult> {
        let results = settle_bids(&self.policy, records);
        for rejected in results.iter().filter(|r| !r.is_settled()) {
            warn!(
                bid_id = %rejected.record.bid_id,
                error = rejected.error.as_deref().unwrap_or_default(),
                "bid rejected"
            );
        }
        info!(
            total = results.len(),
            settled = results.iter().filter(|r| r.is_settled()).count(),
            "settled bid batch"
        );
        results
    }

    /// Load a bid CSV and settle the selected rows.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` when a single bid is requested and the file
    /// does not contain it.
    pub fn settle_file(&self, csv_path: &Path, selection: &BidSelection) -> Result<Vec<SettlementResult>> {
        let repo = CsvBidRepository::open(csv_path)?;
        let records = match selection {
            BidSelection::All => repo.find_all()?,
            BidSelection::Group(group) => {
                let records = repo.find_by_group(group)?;
                if records.is_empty() {
                    warn!(group = %group, "no bids found for farmer group");
                }
                records
            }
            BidSelection::Bid(bid_id) => {
                let record = repo.find_by_id(bid_id)?.ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "bid {} not found in {}",
                        bid_id,
                        csv_path.display()
                    ))
                })?;
                vec![record]
            }
        };
        info!(path = %csv_path.display(), count = records.len(), "loaded bid batch");
        Ok(self.settle_records(&records))
    }
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new(FeePolicy::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_quote_with_default_policy() {
        let service = QuoteService::default();
        let quote = service.quote(dec!(180000), dec!(3000), TruckSize::ThreeTon).unwrap();
        assert_eq!(quote.breakdown.net_amount(), dec!(162000));
    }

    #[test]
    fn test_quote_uses_configured_policy() {
        let mut config = Config::default();
        config.policy.platform_commission_bps = 1_000;
        let service = QuoteService::from_config(&config).unwrap();
        assert_eq!(service.policy().platform_commission_bps(), 1_000);
        let quote = service.quote(dec!(100000), dec!(1000), TruckSize::OneTon).unwrap();
        assert_eq!(quote.breakdown.platform_fee(), dec!(10000));
        assert_eq!(quote.breakdown.net_amount(), dec!(84000));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.policy.finance_markup_bps = 10_000;
        assert!(QuoteService::from_config(&config).is_err());
    }

    #[test]
    fn test_quote_rejects_zero_amount() {
        let err = QuoteService::default()
            .quote(Decimal::ZERO, dec!(100), TruckSize::OneTon)
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_check_submission_boundary() {
        let service = QuoteService::default();
        assert!(service.check_submission(dec!(1000)).allowed);
        assert!(!service.check_submission(dec!(999)).allowed);
    }

    #[test]
    fn test_settle_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bid_id,farmer_group,gross_kes,quantity_kg,truck_size").unwrap();
        writeln!(file, "B-001,Kitale Maize Growers,180000,3000,3-ton").unwrap();
        writeln!(file, "B-002,Nyeri Coffee Coop,0,1200,1-ton").unwrap();

        let results = QuoteService::default()
            .settle_file(file.path(), &BidSelection::All)
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_settled());
        assert!(!results[1].is_settled());
    }

    fn batch_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bid_id,farmer_group,gross_kes,quantity_kg,truck_size").unwrap();
        writeln!(file, "B-001,Kitale Maize Growers,180000,3000,3-ton").unwrap();
        writeln!(file, "B-002,Nyeri Coffee Coop,52000,1200,1-ton").unwrap();
        writeln!(file, "B-003,Kitale Maize Growers,90000,1500,3-ton").unwrap();
        file
    }

    #[test]
    fn test_settle_file_for_one_group() {
        let file = batch_file();
        let selection = BidSelection::Group("KITALE maize growers".to_string());
        let results = QuoteService::default().settle_file(file.path(), &selection).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.record.farmer_group == "Kitale Maize Growers"));
    }

    #[test]
    fn test_settle_file_for_one_bid() {
        let file = batch_file();
        let service = QuoteService::default();

        let results = service
            .settle_file(file.path(), &BidSelection::Bid("B-002".to_string()))
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record.bid_id, "B-002");

        let err = service
            .settle_file(file.path(), &BidSelection::Bid("B-404".to_string()))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
