//! Fee policy rate table
//!
//! Every deduction is expressed in basis points of the gross bid amount.
//! A policy is only constructible when the worst-case combined rate stays
//! within 100%, which is what keeps the net amount non-negative.

use mavuno_types::{ConfigError, Result};
use serde::{Deserialize, Serialize};

use super::truck_size::TruckSize;

/// 100% expressed in basis points
pub const BPS_DENOMINATOR: u32 = 10_000;

pub const DEFAULT_PLATFORM_COMMISSION_BPS: u32 = 500;
pub const DEFAULT_FINANCE_MARKUP_BPS: u32 = 200;
pub const DEFAULT_TRANSPORT_QC_ONE_TON_BPS: u32 = 400;
pub const DEFAULT_TRANSPORT_QC_THREE_TON_BPS: u32 = 300;
pub const DEFAULT_TRANSPORT_QC_SEVEN_TON_BPS: u32 = 200;

/// Transport and quality-control rates keyed by truck size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportQcRates {
    pub one_ton_bps: u32,
    pub three_ton_bps: u32,
    pub seven_ton_bps: u32,
}

impl TransportQcRates {
    pub fn for_truck(&self, truck: TruckSize) -> u32 {
        match truck {
            TruckSize::OneTon => self.one_ton_bps,
            TruckSize::ThreeTon => self.three_ton_bps,
            TruckSize::SevenTon => self.seven_ton_bps,
        }
    }

    pub fn set_for_truck(&mut self, truck: TruckSize, bps: u32) {
        match truck {
            TruckSize::OneTon => self.one_ton_bps = bps,
            TruckSize::ThreeTon => self.three_ton_bps = bps,
            TruckSize::SevenTon => self.seven_ton_bps = bps,
        }
    }

    fn max_bps(&self) -> u32 {
        TruckSize::ALL
            .iter()
            .map(|t| self.for_truck(*t))
            .max()
            .unwrap_or(0)
    }
}

impl Default for TransportQcRates {
    fn default() -> Self {
        FeePolicy::DEFAULT.transport_qc
    }
}

/// Validated platform fee policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeePolicy {
    platform_commission_bps: u32,
    finance_markup_bps: u32,
    transport_qc: TransportQcRates,
}

impl FeePolicy {
    /// Marketplace default rate table
    pub const DEFAULT: FeePolicy = FeePolicy {
        platform_commission_bps: DEFAULT_PLATFORM_COMMISSION_BPS,
        finance_markup_bps: DEFAULT_FINANCE_MARKUP_BPS,
        transport_qc: TransportQcRates {
            one_ton_bps: DEFAULT_TRANSPORT_QC_ONE_TON_BPS,
            three_ton_bps: DEFAULT_TRANSPORT_QC_THREE_TON_BPS,
            seven_ton_bps: DEFAULT_TRANSPORT_QC_SEVEN_TON_BPS,
        },
    };

    /// Build a policy, rejecting tables whose combined worst-case rate
    /// exceeds 100% of the gross amount.
    pub fn new(
        platform_commission_bps: u32,
        finance_markup_bps: u32,
        transport_qc: TransportQcRates,
    ) -> Result<Self> {
        let worst_case = platform_commission_bps
            .checked_add(finance_markup_bps)
            .and_then(|sum| sum.checked_add(transport_qc.max_bps()));

        match worst_case {
            Some(total) if total <= BPS_DENOMINATOR => Ok(Self {
                platform_commission_bps,
                finance_markup_bps,
                transport_qc,
            }),
            Some(total) => Err(ConfigError::InvalidPolicy(format!(
                "combined deductions of {} bps exceed {} bps",
                total, BPS_DENOMINATOR
            ))
            .into()),
            None => Err(ConfigError::InvalidPolicy("rate overflow".to_string()).into()),
        }
    }

    pub fn platform_commission_bps(&self) -> u32 {
        self.platform_commission_bps
    }

    pub fn finance_markup_bps(&self) -> u32 {
        self.finance_markup_bps
    }

    pub fn transport_qc(&self) -> &TransportQcRates {
        &self.transport_qc
    }

    pub fn transport_qc_bps(&self, truck: TruckSize) -> u32 {
        self.transport_qc.for_truck(truck)
    }

    /// Sum of all rates applied to a bid carried by `truck`
    pub fn total_bps(&self, truck: TruckSize) -> u32 {
        self.platform_commission_bps + self.finance_markup_bps + self.transport_qc_bps(truck)
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
