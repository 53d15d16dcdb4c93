//! Demands and the demand merger.
//!
//! A [`Demand`] is an outstanding need for some quantity of a good, tagged
//! with how the good will be used. When a second demand is raised for a good
//! that already has one recorded, the two are combined by [`merge`]:
//!
//! | existing | incoming | result |
//! |----------|----------|--------|
//! | Consume(a) | Consume(b) | Consume(a + b) |
//! | Require(a) | Require(b) | Require(max(a, b)) |
//! | Require(a) | Consume(b) | Consume(max(a, b)) |
//! | Consume(a) | Require(b) | Consume(max(a, b)) |
//!
//! The mixed rows are an approximation: a good that is both held and eaten
//! collapses to "must replenish" and the ordering between the two uses is
//! lost. Reasoning about that ordering needs a partial-order planner.
//!
//! The same merger feeds the worklist, the consumption totals, and the
//! terminal register. Each of those keeps its own accumulated state.

use serde::{Deserialize, Serialize};

use crate::enums::DemandKind;
use crate::good::Good;
use crate::quantity::{Quantity, QuantityError};

/// An outstanding need for `quantity` units of `good`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    /// The demanded good.
    pub good: Good,
    /// How many units are needed. Never negative.
    pub quantity: Quantity,
    /// Whether the good is held or destroyed by use.
    pub kind: DemandKind,
}

impl Demand {
    /// Build a demand of the given kind.
    pub fn new(good: impl Into<Good>, quantity: Quantity, kind: DemandKind) -> Self {
        Self {
            good: good.into(),
            quantity,
            kind,
        }
    }

    /// Build a [`DemandKind::Require`] demand.
    pub fn require(good: impl Into<Good>, quantity: Quantity) -> Self {
        Self::new(good, quantity, DemandKind::Require)
    }

    /// Build a [`DemandKind::Consume`] demand.
    pub fn consume(good: impl Into<Good>, quantity: Quantity) -> Self {
        Self::new(good, quantity, DemandKind::Consume)
    }

    /// Same good and kind, different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            good: self.good.clone(),
            quantity,
            kind: self.kind,
        }
    }
}

impl core::fmt::Display for Demand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}x {}", self.kind, self.quantity, self.good)
    }
}

/// Combine `incoming` with the demand already recorded for the same good.
///
/// With no existing demand the incoming one is returned unchanged.
///
/// # Errors
///
/// Returns [`QuantityError::Overflow`] if summing two consume demands
/// overflows, and [`QuantityError::GoodMismatch`] if the demands name
/// different goods.
pub fn merge(existing: Option<&Demand>, incoming: Demand) -> Result<Demand, QuantityError> {
    let Some(existing) = existing else {
        return Ok(incoming);
    };

    if existing.good != incoming.good {
        return Err(QuantityError::GoodMismatch {
            existing: existing.good.to_string(),
            incoming: incoming.good.into_inner(),
        });
    }

    let (quantity, kind) = match (existing.kind, incoming.kind) {
        (DemandKind::Consume, DemandKind::Consume) => {
            let sum = existing
                .quantity
                .checked_add(incoming.quantity)
                .ok_or(QuantityError::Overflow {
                    context: "summing consume demands",
                })?;
            (sum, DemandKind::Consume)
        }
        (DemandKind::Require, DemandKind::Require) => (
            existing.quantity.max(incoming.quantity),
            DemandKind::Require,
        ),
        (DemandKind::Require, DemandKind::Consume) | (DemandKind::Consume, DemandKind::Require) => (
            existing.quantity.max(incoming.quantity),
            DemandKind::Consume,
        ),
    };

    Ok(Demand {
        good: incoming.good,
        quantity,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    fn merged(existing: &Demand, incoming: Demand) -> Option<Demand> {
        merge(Some(existing), incoming).ok()
    }

    #[test]
    fn nothing_recorded_passes_through() {
        let incoming = Demand::require("T", dec!(1));
        assert_eq!(merge(None, incoming.clone()).ok(), Some(incoming));
    }

    #[test]
    fn consume_plus_consume_sums() {
        let result = merged(&Demand::consume("raw", dec!(2)), Demand::consume("raw", dec!(4)));
        assert_eq!(result, Some(Demand::consume("raw", dec!(6))));
    }

    #[test]
    fn require_plus_require_takes_max() {
        let result = merged(&Demand::require("T", dec!(5)), Demand::require("T", dec!(3)));
        assert_eq!(result, Some(Demand::require("T", dec!(5))));
    }

    #[test]
    fn mixed_kinds_collapse_to_consume_max() {
        let a = merged(&Demand::require("G", dec!(2)), Demand::consume("G", dec!(7)));
        assert_eq!(a, Some(Demand::consume("G", dec!(7))));

        // Either order gives the same answer.
        let b = merged(&Demand::consume("G", dec!(7)), Demand::require("G", dec!(2)));
        assert_eq!(b, Some(Demand::consume("G", dec!(7))));
    }

    #[test]
    fn fractional_consume_sums_exactly() {
        let result = merged(
            &Demand::consume("brick", dec!(0.25)),
            Demand::consume("brick", dec!(0.5)),
        );
        assert_eq!(result.map(|d| d.quantity), Some(dec!(0.75)));
    }

    #[test]
    fn overflow_is_an_error() {
        let result = merge(
            Some(&Demand::consume("G", Decimal::MAX)),
            Demand::consume("G", Decimal::MAX),
        );
        assert!(matches!(result, Err(QuantityError::Overflow { .. })));
    }

    #[test]
    fn different_goods_rejected() {
        let result = merge(Some(&Demand::consume("a", dec!(1))), Demand::consume("b", dec!(1)));
        assert!(matches!(result, Err(QuantityError::GoodMismatch { .. })));
    }

    #[test]
    fn display_shows_kind_count_and_good() {
        assert_eq!(Demand::consume("planks", dec!(3)).to_string(), "consume 3x planks");
    }
}
