//! Batch settlement of bid records

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{BidAmount, BidQuote, BidRecord, FeePolicy, Quantity, TruckSize};

/// Result of settling a single bid record
#[derive(Debug, Clone, Serialize)]
pub struct SettlementResult {
    pub record: BidRecord,
    pub quote: Option<BidQuote>,
    /// Validation message when the record was rejected
    pub error: Option<String>,
}

impl SettlementResult {
    pub fn is_settled(&self) -> bool {
        self.quote.is_some()
    }

    pub fn is_below_minimum(&self) -> bool {
        self.quote.map(|q| !q.meets_minimum).unwrap_or(false)
    }
}

fn quote_record(policy: &FeePolicy, record: &BidRecord) -> mavuno_types::Result<BidQuote> {
    let truck: TruckSize = record.truck_size.parse()?;
    let gross = BidAmount::new(record.gross_amount)?;
    let quantity = Quantity::new(record.quantity_kg)?;
    BidQuote::new(policy, gross, quantity, truck)
}

/// Quote every record; invalid rows are carried with their error message.
pub fn settle_bids(policy: &FeePolicy, records: &[BidRecord]) -> Vec<SettlementResult> {
    records
        .iter()
        .map(|record| match quote_record(policy, record) {
            Ok(quote) => SettlementResult {
                record: record.clone(),
                quote: Some(quote),
                error: None,
            },
            Err(e) => SettlementResult {
                record: record.clone(),
                quote: None,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Totals across settled bids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettlementTotals {
    pub gross_amount: Decimal,
    pub platform_fee: Decimal,
    pub finance_markup: Decimal,
    pub transport_and_qc_fee: Decimal,
    pub net_amount: Decimal,
}

impl SettlementTotals {
    pub fn from_results(results: &[SettlementResult]) -> Self {
        results
            .iter()
            .filter_map(|r| r.quote)
            .fold(Self::default(), |mut acc, q| {
                acc.gross_amount += q.breakdown.gross_amount();
                acc.platform_fee += q.breakdown.platform_fee();
                acc.finance_markup += q.breakdown.finance_markup();
                acc.transport_and_qc_fee += q.breakdown.transport_and_qc_fee();
                acc.net_amount += q.breakdown.net_amount();
                acc
            })
    }

    /// Everything the platform keeps across the batch
    pub fn platform_revenue(&self) -> Decimal {
        self.platform_fee + self.finance_markup + self.transport_and_qc_fee
    }
}

pub fn generate_settlement_report(results: &[SettlementResult]) -> String {
    let total = results.len();
    let settled_count = results.iter().filter(|r| r.is_settled()).count();
    let rejected_count = total - settled_count;
    let below_minimum_count = results.iter().filter(|r| r.is_below_minimum()).count();
    let totals = SettlementTotals::from_results(results);

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Bid Settlement Report               \n");
    report.push_str("==================================================\n\n");
    report.push_str("[Summary]\n");
    report.push_str(&format!("  Total bids:             {}\n", total));
    report.push_str(&format!("  Settled:                {}\n", settled_count));
    report.push_str(&format!("  Rejected:               {}\n", rejected_count));
    report.push_str(&format!("  Below minimum:          {}\n", below_minimum_count));
    report.push_str(&format!("  Gross total (KES):      {}\n", totals.gross_amount));
    report.push_str(&format!("  Net to groups (KES):    {}\n", totals.net_amount));
    report.push_str(&format!("  Platform revenue (KES): {}\n", totals.platform_revenue()));
    report.push('\n');

    if settled_count > 0 {
        report.push_str("[Settled Bids]\n");
        report.push_str("-".repeat(92).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<10} {:<18} {:>8} {:>7} {:>13} {:>11} {:>13} {:>5}\n",
            "Bid", "Group", "Qty kg", "Truck", "Gross", "Fees", "Net", "Min"
        ));
        report.push_str("-".repeat(92).as_str());
        report.push('\n');
        for result in results.iter() {
            let Some(quote) = result.quote else {
                continue;
            };
            report.push_str(&format!(
                "{:<10} {:<18} {:>8} {:>7} {:>13} {:>11} {:>13} {:>5}\n",
                truncate_str(&result.record.bid_id, 9),
                truncate_str(&result.record.farmer_group, 17),
                quote.quantity_kg.to_string(),
                quote.truck_size.label(),
                quote.breakdown.gross_amount().to_string(),
                quote.breakdown.total_deductions().to_string(),
                quote.breakdown.net_amount().to_string(),
                if quote.meets_minimum { "ok" } else { "LOW" }
            ));
        }
        report.push('\n');
    } else {
        report.push_str("[No Settled Bids]\n\n");
    }

    if rejected_count > 0 {
        report.push_str("[Rejected Bids]\n");
        report.push_str("-".repeat(70).as_str());
        report.push('\n');
        for result in results.iter().filter(|r| !r.is_settled()) {
            report.push_str(&format!(
                "{:<10} {:<18} {}\n",
                truncate_str(&result.record.bid_id, 9),
                truncate_str(&result.record.farmer_group, 17),
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
