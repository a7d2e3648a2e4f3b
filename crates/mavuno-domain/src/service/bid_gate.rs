//! Submission gate for bids below the minimum tradeable quantity

use rust_decimal::Decimal;
use serde::Serialize;

use super::fee_calculator::minimum_quantity;

/// Outcome of the minimum quantity check run before a bid is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionCheck {
    pub allowed: bool,
    pub quantity_kg: Decimal,
    pub minimum_kg: Decimal,
    /// Kilograms missing to reach the minimum, `None` when allowed
    pub shortfall_kg: Option<Decimal>,
}

impl SubmissionCheck {
    /// Inline warning for a blocked submission
    pub fn warning(&self) -> Option<String> {
        self.shortfall_kg.map(|shortfall| {
            format!(
                "Minimum quantity is {} kg; add {} kg to submit this bid",
                self.minimum_kg, shortfall
            )
        })
    }
}

/// Decide whether a bid of `quantity_kg` may be submitted.
///
/// Quantities equal to the minimum are accepted.
pub fn check_submission(quantity_kg: Decimal) -> SubmissionCheck {
    let minimum_kg = minimum_quantity().kg();
    let allowed = quantity_kg >= minimum_kg;
    SubmissionCheck {
        allowed,
        quantity_kg,
        minimum_kg,
        shortfall_kg: if allowed {
            None
        } else {
            Some((minimum_kg - quantity_kg).normalize())
        },
    }
}
