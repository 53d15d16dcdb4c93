//! Demand registers.
//!
//! A [`DemandRegister`] holds at most one [`Demand`] per good and folds every
//! newly recorded demand into the existing one with the demand merger. The
//! planner keeps two of them: the consumption totals (only ever fed consume
//! demands, so they simply sum) and the terminal register (goods nobody
//! holds and nothing produces, which must be sourced by hand).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use oreganizer_types::{Demand, DemandKind, Good, Quantity, merge};

use crate::LedgerError;

/// Per-good accumulation of merged demands, ordered by good name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DemandRegister {
    entries: BTreeMap<Good, Demand>,
}

impl DemandRegister {
    /// Create an empty register.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Merge `demand` into whatever is recorded for its good.
    ///
    /// Returns the merged entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] if the merge overflows.
    pub fn record(&mut self, demand: Demand) -> Result<&Demand, LedgerError> {
        let merged = merge(self.entries.get(&demand.good), demand)?;
        let slot = match self.entries.entry(merged.good.clone()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(merged);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(merged),
        };
        Ok(slot)
    }

    /// The merged demand recorded for `good`, if any.
    pub fn get(&self, good: &Good) -> Option<&Demand> {
        self.entries.get(good)
    }

    /// Recorded quantity for `good` (zero if absent).
    pub fn quantity(&self, good: &Good) -> Quantity {
        self.entries
            .get(good)
            .map_or(Quantity::ZERO, |demand| demand.quantity)
    }

    /// Number of goods recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over merged demands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Demand> {
        self.entries.values()
    }

    /// Quantities of every recorded good, regardless of kind.
    pub fn quantities(&self) -> BTreeMap<Good, Quantity> {
        self.entries
            .iter()
            .map(|(good, demand)| (good.clone(), demand.quantity))
            .collect()
    }

    /// Quantities of the recorded goods whose merged kind is `kind`.
    pub fn by_kind(&self, kind: DemandKind) -> BTreeMap<Good, Quantity> {
        self.entries
            .iter()
            .filter(|(_, demand)| demand.kind == kind)
            .map(|(good, demand)| (good.clone(), demand.quantity))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn consume_entries_accumulate() {
        let mut register = DemandRegister::new();
        let _ = register.record(Demand::consume("coal", dec!(2)));
        let _ = register.record(Demand::consume("coal", dec!(3)));
        assert_eq!(register.quantity(&Good::from("coal")), dec!(5));
        assert_eq!(register.len(), 1);
    }

    #[test]
    fn require_entries_take_max() {
        let mut register = DemandRegister::new();
        let _ = register.record(Demand::require("T", dec!(1)));
        let _ = register.record(Demand::require("T", dec!(1)));
        assert_eq!(register.get(&Good::from("T")), Some(&Demand::require("T", dec!(1))));
    }

    #[test]
    fn partition_by_kind() {
        let mut register = DemandRegister::new();
        let _ = register.record(Demand::require("T", dec!(1)));
        let _ = register.record(Demand::consume("raw", dec!(6)));
        let _ = register.record(Demand::require("mixed", dec!(2)));
        let _ = register.record(Demand::consume("mixed", dec!(1)));

        let required = register.by_kind(DemandKind::Require);
        let consumed = register.by_kind(DemandKind::Consume);
        assert_eq!(required.len(), 1);
        assert_eq!(required.get("T").copied(), Some(dec!(1)));
        assert_eq!(consumed.get("raw").copied(), Some(dec!(6)));
        assert_eq!(consumed.get("mixed").copied(), Some(dec!(2)));
    }

    #[test]
    fn serializes_as_map_of_demands() {
        let mut register = DemandRegister::new();
        let _ = register.record(Demand::consume("coal", dec!(2)));
        let json = serde_json::to_value(&register).ok();
        let kind = json
            .as_ref()
            .and_then(|v| v.get("coal"))
            .and_then(|v| v.get("kind"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(kind, Some("consume"));
    }
}
