//! Gross per-good flow accounting.
//!
//! The registers the planner reports are merged views: the terminal register
//! keeps the *largest* outstanding require, not the sum of everything that
//! was sourced. Conservation has to be checked against gross flows, so the
//! planner records every unit that enters or leaves a plan here as well.

use std::collections::BTreeMap;

use serde::Serialize;

use oreganizer_types::{Good, Quantity, QuantityError};

use crate::LedgerError;

/// Everything that happened to one good over a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GoodFlow {
    /// On hand before planning started.
    pub initial: Quantity,
    /// Made by expanding the good's recipe.
    pub produced: Quantity,
    /// Left for manual sourcing (no holding, no recipe).
    pub sourced: Quantity,
    /// Destroyed by consume demands.
    pub consumed: Quantity,
}

impl GoodFlow {
    /// `initial + produced + sourced`.
    ///
    /// Returns `None` on overflow.
    pub fn inflow(&self) -> Option<Quantity> {
        self.initial
            .checked_add(self.produced)?
            .checked_add(self.sourced)
    }
}

/// Which bucket a recorded quantity goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Initial,
    Produced,
    Sourced,
    Consumed,
}

/// Gross flows for every good that took part in a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlowLog {
    flows: BTreeMap<Good, GoodFlow>,
}

impl FlowLog {
    /// Create an empty flow log.
    pub const fn new() -> Self {
        Self {
            flows: BTreeMap::new(),
        }
    }

    /// Record initial inventory.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] on overflow.
    pub fn record_initial(&mut self, good: &Good, quantity: Quantity) -> Result<(), LedgerError> {
        self.add(good, quantity, Bucket::Initial)
    }

    /// Record units made by expanding a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] on overflow.
    pub fn record_produced(&mut self, good: &Good, quantity: Quantity) -> Result<(), LedgerError> {
        self.add(good, quantity, Bucket::Produced)
    }

    /// Record units left for manual sourcing.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] on overflow.
    pub fn record_sourced(&mut self, good: &Good, quantity: Quantity) -> Result<(), LedgerError> {
        self.add(good, quantity, Bucket::Sourced)
    }

    /// Record units destroyed by a consume demand.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] on overflow.
    pub fn record_consumed(&mut self, good: &Good, quantity: Quantity) -> Result<(), LedgerError> {
        self.add(good, quantity, Bucket::Consumed)
    }

    /// Flows for `good` (all zero if it never took part).
    pub fn get(&self, good: &Good) -> GoodFlow {
        self.flows.get(good).copied().unwrap_or_default()
    }

    /// Iterate over every good's flows in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Good, &GoodFlow)> {
        self.flows.iter()
    }

    fn add(&mut self, good: &Good, quantity: Quantity, bucket: Bucket) -> Result<(), LedgerError> {
        if quantity.is_sign_negative() && !quantity.is_zero() {
            return Err(LedgerError::NegativeQuantity {
                good: good.clone(),
                quantity,
            });
        }
        if quantity.is_zero() {
            return Ok(());
        }

        let flow = self.flows.entry(good.clone()).or_default();
        let slot = match bucket {
            Bucket::Initial => &mut flow.initial,
            Bucket::Produced => &mut flow.produced,
            Bucket::Sourced => &mut flow.sourced,
            Bucket::Consumed => &mut flow.consumed,
        };
        *slot = slot.checked_add(quantity).ok_or(QuantityError::Overflow {
            context: "accumulating a good's flow",
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn buckets_accumulate_independently() {
        let mut log = FlowLog::new();
        let coal = Good::from("coal");
        let _ = log.record_initial(&coal, dec!(2));
        let _ = log.record_sourced(&coal, dec!(3));
        let _ = log.record_sourced(&coal, dec!(1));
        let _ = log.record_consumed(&coal, dec!(6));

        let flow = log.get(&coal);
        assert_eq!(flow.initial, dec!(2));
        assert_eq!(flow.produced, Decimal::ZERO);
        assert_eq!(flow.sourced, dec!(4));
        assert_eq!(flow.consumed, dec!(6));
        assert_eq!(flow.inflow(), Some(dec!(6)));
    }

    #[test]
    fn zero_records_leave_no_entry() {
        let mut log = FlowLog::new();
        let _ = log.record_produced(&Good::from("x"), Decimal::ZERO);
        assert_eq!(log.iter().count(), 0);
    }

    #[test]
    fn negative_record_rejected() {
        let mut log = FlowLog::new();
        let result = log.record_consumed(&Good::from("x"), dec!(-2));
        assert!(matches!(result, Err(LedgerError::NegativeQuantity { .. })));
    }
}
