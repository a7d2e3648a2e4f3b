//! Default fee rate table
//!
//! The canonical values live in `mavuno_domain::model::policy`; this module
//! re-exports them and turns a policy into display rows.

use mavuno_domain::model::{FeePolicy, TruckSize};
use rust_decimal::Decimal;
use serde::Serialize;

pub use mavuno_domain::model::policy::{
    BPS_DENOMINATOR, DEFAULT_FINANCE_MARKUP_BPS, DEFAULT_PLATFORM_COMMISSION_BPS,
    DEFAULT_TRANSPORT_QC_ONE_TON_BPS, DEFAULT_TRANSPORT_QC_SEVEN_TON_BPS,
    DEFAULT_TRANSPORT_QC_THREE_TON_BPS,
};
pub use mavuno_domain::service::MINIMUM_QUANTITY_KG;

/// One line of the policy table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRow {
    pub component: String,
    pub bps: u32,
    pub percent: Decimal,
}

/// Basis points as a percentage with two decimals (500 -> 5.00)
pub fn bps_to_percent(bps: u32) -> Decimal {
    Decimal::new(i64::from(bps), 2)
}

pub fn policy_table(policy: &FeePolicy) -> Vec<PolicyRow> {
    let mut rows = vec![
        PolicyRow {
            component: "Platform commission".to_string(),
            bps: policy.platform_commission_bps(),
            percent: bps_to_percent(policy.platform_commission_bps()),
        },
        PolicyRow {
            component: "Finance markup".to_string(),
            bps: policy.finance_markup_bps(),
            percent: bps_to_percent(policy.finance_markup_bps()),
        },
    ];
    for truck in TruckSize::ALL {
        let bps = policy.transport_qc_bps(truck);
        rows.push(PolicyRow {
            component: format!("Transport & QC ({})", truck.label()),
            bps,
            percent: bps_to_percent(bps),
        });
    }
    rows
}
