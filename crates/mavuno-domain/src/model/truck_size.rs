//! Truck capacity tiers used to bracket transport/QC fees

use std::fmt;
use std::str::FromStr;

use mavuno_types::Error;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Quantity;

/// Shipment capacity tier selected per request/bid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckSize {
    /// 1-ton class (small)
    #[serde(rename = "1-ton")]
    OneTon,
    /// 3-ton class (medium)
    #[serde(rename = "3-ton")]
    ThreeTon,
    /// 7-ton class (large)
    #[serde(rename = "7-ton")]
    SevenTon,
}

impl TruckSize {
    pub const ALL: [TruckSize; 3] = [TruckSize::OneTon, TruckSize::ThreeTon, TruckSize::SevenTon];

    /// Canonical tag, also used as the serde representation
    pub fn label(&self) -> &'static str {
        match self {
            TruckSize::OneTon => "1-ton",
            TruckSize::ThreeTon => "3-ton",
            TruckSize::SevenTon => "7-ton",
        }
    }

    /// Marketplace tier name shown next to the tonnage
    pub fn tier(&self) -> &'static str {
        match self {
            TruckSize::OneTon => "small",
            TruckSize::ThreeTon => "medium",
            TruckSize::SevenTon => "large",
        }
    }

    /// Payload capacity in kilograms
    pub fn capacity_kg(&self) -> u32 {
        match self {
            TruckSize::OneTon => 1_000,
            TruckSize::ThreeTon => 3_000,
            TruckSize::SevenTon => 7_000,
        }
    }

    /// Number of truck loads needed to move `quantity`
    pub fn trips_required(&self, quantity: Quantity) -> u32 {
        let trips = (quantity.kg() / Decimal::from(self.capacity_kg())).ceil();
        trips.to_u32().unwrap_or(u32::MAX)
    }
}

impl fmt::Display for TruckSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TruckSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        match normalized.as_str() {
            "1ton" | "1t" | "small" => Ok(TruckSize::OneTon),
            "3ton" | "3t" | "medium" => Ok(TruckSize::ThreeTon),
            "7ton" | "7t" | "large" => Ok(TruckSize::SevenTon),
            _ => Err(Error::invalid_argument(format!(
                "unrecognized truck size '{}' (expected 1-ton, 3-ton or 7-ton)",
                s
            ))),
        }
    }
}
