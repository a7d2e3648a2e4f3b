//! Fee breakdown result type

use rust_decimal::Decimal;
use serde::Serialize;

/// Deductions applied to a bid and the resulting net payable amount.
///
/// Only the fee calculator builds these. The accounting identity
/// `gross = platform + finance + transport/QC + net` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeeBreakdown {
    gross_amount: Decimal,
    platform_fee: Decimal,
    finance_markup: Decimal,
    transport_and_qc_fee: Decimal,
    net_amount: Decimal,
}

impl FeeBreakdown {
    pub(crate) fn from_deductions(
        gross_amount: Decimal,
        platform_fee: Decimal,
        finance_markup: Decimal,
        transport_and_qc_fee: Decimal,
    ) -> Self {
        let net_amount = gross_amount - platform_fee - finance_markup - transport_and_qc_fee;
        Self {
            gross_amount,
            platform_fee,
            finance_markup,
            transport_and_qc_fee,
            net_amount,
        }
    }

    pub fn gross_amount(&self) -> Decimal {
        self.gross_amount
    }

    pub fn platform_fee(&self) -> Decimal {
        self.platform_fee
    }

    pub fn finance_markup(&self) -> Decimal {
        self.finance_markup
    }

    pub fn transport_and_qc_fee(&self) -> Decimal {
        self.transport_and_qc_fee
    }

    /// Amount available to the farmer group after platform fees
    pub fn net_amount(&self) -> Decimal {
        self.net_amount
    }

    pub fn total_deductions(&self) -> Decimal {
        self.platform_fee + self.finance_markup + self.transport_and_qc_fee
    }
}
