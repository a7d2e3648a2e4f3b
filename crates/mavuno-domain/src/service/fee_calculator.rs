//! Fee calculation for group bids on buyer produce requests
//!
//! Pure functions only: no state is kept between calls and nothing is logged,
//! so any number of callers can use these concurrently.

use mavuno_types::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::money::KES_MINOR_UNIT_DP;
use crate::model::policy::BPS_DENOMINATOR;
use crate::model::{BidAmount, FeeBreakdown, FeePolicy, Quantity, TruckSize};

/// Smallest tradeable quantity for a single bid/request (1 ton)
pub const MINIMUM_QUANTITY_KG: u32 = 1_000;

const MINIMUM_QUANTITY: Quantity = Quantity::whole_kg(MINIMUM_QUANTITY_KG);

/// Minimum order quantity policy
pub fn minimum_quantity() -> Quantity {
    MINIMUM_QUANTITY
}

/// Compute the fee breakdown with the marketplace default policy.
///
/// # Errors
///
/// `Error::InvalidArgument` if `gross <= 0` or `quantity <= 0`.
pub fn compute_fee_breakdown(gross: Decimal, quantity: Decimal, truck: TruckSize) -> Result<FeeBreakdown> {
    FeePolicy::DEFAULT.compute_breakdown(BidAmount::new(gross)?, Quantity::new(quantity)?, truck)
}

/// `rate_bps` of `gross`, truncated to cents so the sum of deductions can
/// never exceed the gross amount.
fn deduction(gross: Decimal, rate_bps: u32) -> Result<Decimal> {
    let scaled = gross
        .checked_mul(Decimal::from(rate_bps))
        .ok_or_else(|| Error::invalid_argument(format!("gross amount {} is too large", gross)))?;
    let mut fee = (scaled / Decimal::from(BPS_DENOMINATOR))
        .round_dp_with_strategy(KES_MINOR_UNIT_DP, RoundingStrategy::ToZero);
    fee.rescale(KES_MINOR_UNIT_DP);
    Ok(fee)
}

impl FeePolicy {
    /// Compute platform commission, finance markup, and transport/QC fee for
    /// a bid. Rates are a share of the gross value; the quantity only takes
    /// part in validation.
    pub fn compute_breakdown(
        &self,
        gross: BidAmount,
        _quantity: Quantity,
        truck: TruckSize,
    ) -> Result<FeeBreakdown> {
        let gross = gross.get();
        let platform_fee = deduction(gross, self.platform_commission_bps())?;
        let finance_markup = deduction(gross, self.finance_markup_bps())?;
        let transport_and_qc_fee = deduction(gross, self.transport_qc_bps(truck))?;

        let breakdown =
            FeeBreakdown::from_deductions(gross, platform_fee, finance_markup, transport_and_qc_fee);
        debug_assert!(
            breakdown.net_amount() >= Decimal::ZERO,
            "policy deductions exceed gross amount"
        );
        Ok(breakdown)
    }
}
