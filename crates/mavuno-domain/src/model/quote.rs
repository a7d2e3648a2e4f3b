//! Bid quote shown to a farmer group before submission

use mavuno_types::{Error, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use super::fee_breakdown::FeeBreakdown;
use super::money::{BidAmount, Quantity, KES_MINOR_UNIT_DP};
use super::policy::FeePolicy;
use super::truck_size::TruckSize;
use crate::service::fee_calculator::minimum_quantity;

/// Fee breakdown plus the derived values the bid summary displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BidQuote {
    pub truck_size: TruckSize,
    pub quantity_kg: Decimal,
    pub breakdown: FeeBreakdown,
    pub trips_required: u32,
    /// Net KES per kilogram, rounded to cents
    pub net_price_per_kg: Decimal,
    /// Share of the gross amount taken by deductions, in percent
    pub deduction_rate_percent: Decimal,
    pub meets_minimum: bool,
}

impl BidQuote {
    pub fn new(policy: &FeePolicy, gross: BidAmount, quantity: Quantity, truck: TruckSize) -> Result<Self> {
        let breakdown = policy.compute_breakdown(gross, quantity, truck)?;

        let net_price_per_kg = breakdown
            .net_amount()
            .checked_div(quantity.kg())
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "net price per kg is out of range for {} over {}",
                    gross, quantity
                ))
            })?
            .round_dp(KES_MINOR_UNIT_DP);
        let deduction_rate_percent = breakdown
            .total_deductions()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(breakdown.gross_amount()))
            .ok_or_else(|| {
                Error::invalid_argument(format!("deduction rate is out of range for {}", gross))
            })?
            .round_dp(2);

        Ok(Self {
            truck_size: truck,
            quantity_kg: quantity.kg(),
            breakdown,
            trips_required: truck.trips_required(quantity),
            net_price_per_kg,
            deduction_rate_percent,
            meets_minimum: quantity >= minimum_quantity(),
        })
    }
}
