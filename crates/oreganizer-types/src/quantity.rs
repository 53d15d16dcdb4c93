//! Exact quantities.
//!
//! Quantities are [`Decimal`] values: recipes may use fractional ratios
//! (a quarter of a brick per block) and those must add up exactly. There is
//! no floating point anywhere in the planner.

use rust_decimal::Decimal;

/// An exact, non-negative amount of some good.
pub type Quantity = Decimal;

/// Errors produced by quantity arithmetic and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    /// Quantities must never be negative.
    #[error("quantity must not be negative, got {quantity}")]
    Negative {
        /// The offending quantity.
        quantity: Quantity,
    },

    /// Checked arithmetic overflowed the decimal range.
    #[error("arithmetic overflow while {context}")]
    Overflow {
        /// What was being computed.
        context: &'static str,
    },

    /// Two demands for different goods were passed to the merger.
    #[error("cannot merge a demand for {incoming} into a demand for {existing}")]
    GoodMismatch {
        /// Good of the demand already recorded.
        existing: String,
        /// Good of the incoming demand.
        incoming: String,
    },
}

/// Accept `quantity` if it is zero or positive.
///
/// # Errors
///
/// Returns [`QuantityError::Negative`] for negative input.
pub fn validate_quantity(quantity: Quantity) -> Result<Quantity, QuantityError> {
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(QuantityError::Negative { quantity });
    }
    Ok(quantity)
}
