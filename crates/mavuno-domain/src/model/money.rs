//! Validated monetary amounts and produce quantities
//!
//! Both types wrap [`Decimal`] so fee arithmetic stays exact down to the
//! currency minor unit. Construction is the only place input is checked:
//! once a value exists it is known to be strictly positive.

use std::fmt;

use mavuno_types::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places of the Kenya shilling minor unit (cents)
pub const KES_MINOR_UNIT_DP: u32 = 2;

/// Largest gross amount a single bid may carry (one quadrillion KES)
pub const MAX_BID_AMOUNT_KES: i64 = 1_000_000_000_000_000;

/// Gross value (KES) a buyer would pay for the full quantity of a bid.
///
/// # Invariants
///
/// - Always > 0 and <= [`MAX_BID_AMOUNT_KES`]
/// - Always carries exactly two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct BidAmount(Decimal);

impl BidAmount {
    /// Creates a bid amount, rounding to cents with banker's rounding.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if the rounded value is not positive
    /// or exceeds [`MAX_BID_AMOUNT_KES`].
    pub fn new(value: Decimal) -> Result<Self> {
        let mut cents = value.round_dp(KES_MINOR_UNIT_DP);
        if cents <= Decimal::ZERO {
            return Err(Error::invalid_argument(format!(
                "gross amount must be positive, got {}",
                value
            )));
        }
        if cents > Decimal::from(MAX_BID_AMOUNT_KES) {
            return Err(Error::invalid_argument(format!(
                "gross amount {} exceeds the maximum of {} KES",
                value, MAX_BID_AMOUNT_KES
            )));
        }
        cents.rescale(KES_MINOR_UNIT_DP);
        Ok(Self(cents))
    }

    pub fn get(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for BidAmount {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BidAmount> for Decimal {
    fn from(amount: BidAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for BidAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KES {}", self.0)
    }
}

/// Produce volume in kilograms. Always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Quantity(Decimal);

impl Quantity {
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `kg <= 0`.
    pub fn new(kg: Decimal) -> Result<Self> {
        if kg <= Decimal::ZERO {
            return Err(Error::invalid_argument(format!(
                "quantity must be positive, got {} kg",
                kg
            )));
        }
        Ok(Self(kg.normalize()))
    }

    /// Whole-kilogram constant. `kg` must be non-zero.
    pub(crate) const fn whole_kg(kg: u32) -> Self {
        Self(Decimal::from_parts(kg, 0, 0, false, 0))
    }

    /// Whole-kilogram constructor; zero is rejected.
    pub fn from_kg(kg: u32) -> Result<Self> {
        Self::new(Decimal::from(kg))
    }

    pub fn kg(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = Error;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Quantity> for Decimal {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.0)
    }
}
