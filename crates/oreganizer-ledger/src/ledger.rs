//! The resource ledger: what is on hand right now.
//!
//! The [`ResourceLedger`] starts as the initial inventory and is updated as
//! demands are resolved. It has two read paths, chosen by the kind of the
//! demand being processed, and one write path.
//!
//! # Reads
//!
//! - **Require**: held goods are reusable. If enough is held the demand is
//!   satisfied and nothing is taken away; otherwise the difference is the
//!   shortfall and the held amount is left alone.
//! - **Consume**: held goods are used up. If more is held than demanded the
//!   entry is decremented; if exactly enough is held the entry is removed;
//!   if too little is held the entry is removed and the difference is the
//!   shortfall.
//!
//! # Write (memoization)
//!
//! Once a require demand has been resolved the ledger records
//! `max(held, resolved)` for the good. A later require demand for no more
//! than that is answered straight from the ledger, so a good's recipe is
//! never expanded twice for the same requirement.
//!
//! Goods with no entry are treated as held in quantity zero. Zero entries
//! are never stored.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use oreganizer_types::{Good, Quantity, QuantityError};

use crate::LedgerError;

/// Outcome of checking a demand against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerRead {
    /// The demand is fully covered by what was on hand.
    Satisfied {
        /// Quantity on hand before the read.
        held: Quantity,
    },
    /// The demand is only partly covered (or not at all).
    Shortfall {
        /// Quantity on hand before the read.
        held: Quantity,
        /// Quantity still to be resolved by recipe or manual sourcing.
        remaining: Quantity,
    },
}

impl LedgerRead {
    /// Quantity still to be resolved, zero when satisfied.
    pub const fn remaining(&self) -> Quantity {
        match self {
            Self::Satisfied { .. } => Decimal::ZERO,
            Self::Shortfall { remaining, .. } => *remaining,
        }
    }
}

/// Quantities currently on hand, keyed by good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    held: BTreeMap<Good, Quantity>,
}

impl ResourceLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            held: BTreeMap::new(),
        }
    }

    /// Seed a ledger from an initial inventory.
    ///
    /// Repeated goods are summed. Zero quantities are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NegativeQuantity`] for a negative quantity, or
    /// [`LedgerError::Quantity`] if summing repeated goods overflows.
    pub fn from_inventory<I>(inventory: I) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = (Good, Quantity)>,
    {
        let mut held: BTreeMap<Good, Quantity> = BTreeMap::new();
        for (good, quantity) in inventory {
            if quantity.is_sign_negative() && !quantity.is_zero() {
                return Err(LedgerError::NegativeQuantity { good, quantity });
            }
            if quantity.is_zero() {
                continue;
            }
            let slot = held.entry(good).or_insert(Decimal::ZERO);
            *slot = slot.checked_add(quantity).ok_or(QuantityError::Overflow {
                context: "seeding the ledger",
            })?;
        }
        Ok(Self { held })
    }

    /// Quantity of `good` on hand (zero if absent).
    pub fn held(&self, good: &Good) -> Quantity {
        self.held.get(good).copied().unwrap_or(Decimal::ZERO)
    }

    /// Number of goods with a non-zero holding.
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Iterate over holdings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Good, &Quantity)> {
        self.held.iter()
    }

    /// Check a require demand. Never changes the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] if computing the shortfall
    /// overflows.
    pub fn read_require(&self, good: &Good, demanded: Quantity) -> Result<LedgerRead, LedgerError> {
        let held = self.held(good);
        if held >= demanded {
            return Ok(LedgerRead::Satisfied { held });
        }
        let remaining = shortfall(demanded, held)?;
        Ok(LedgerRead::Shortfall { held, remaining })
    }

    /// Check a consume demand, taking what it uses out of the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Quantity`] if the subtraction overflows.
    pub fn read_consume(
        &mut self,
        good: &Good,
        demanded: Quantity,
    ) -> Result<LedgerRead, LedgerError> {
        let held = self.held(good);
        if held > demanded {
            let left = shortfall(held, demanded)?;
            self.held.insert(good.clone(), left);
            return Ok(LedgerRead::Satisfied { held });
        }

        self.held.remove(good);
        if held == demanded {
            return Ok(LedgerRead::Satisfied { held });
        }
        let remaining = shortfall(demanded, held)?;
        Ok(LedgerRead::Shortfall { held, remaining })
    }

    /// Memoize a resolved require demand: the holding becomes
    /// `max(held, resolved)`.
    ///
    /// Returns the holding after the write.
    pub fn record_require(&mut self, good: &Good, resolved: Quantity) -> Quantity {
        let held = self.held(good);
        let updated = held.max(resolved);
        if !updated.is_zero() {
            self.held.insert(good.clone(), updated);
        }
        updated
    }
}

fn shortfall(larger: Quantity, smaller: Quantity) -> Result<Quantity, LedgerError> {
    larger
        .checked_sub(smaller)
        .ok_or(LedgerError::Quantity {
            source: QuantityError::Overflow {
                context: "computing a ledger shortfall",
            },
        })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn good(name: &str) -> Good {
        Good::from(name)
    }

    fn seeded(entries: &[(&str, Quantity)]) -> ResourceLedger {
        ResourceLedger::from_inventory(entries.iter().map(|(n, q)| (good(n), *q)))
            .unwrap_or_default()
    }

    #[test]
    fn seeding_drops_zero_and_sums_repeats() {
        let ledger = seeded(&[("a", dec!(0)), ("b", dec!(1)), ("b", dec!(2.5))]);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.held(&good("b")), dec!(3.5));
    }

    #[test]
    fn seeding_rejects_negative() {
        let result = ResourceLedger::from_inventory([(good("a"), dec!(-1))]);
        assert!(matches!(result, Err(LedgerError::NegativeQuantity { .. })));
    }

    #[test]
    fn require_satisfied_leaves_holding() {
        let ledger = seeded(&[("pick", dec!(2))]);
        let read = ledger.read_require(&good("pick"), dec!(1)).ok();
        assert_eq!(read, Some(LedgerRead::Satisfied { held: dec!(2) }));
        assert_eq!(ledger.held(&good("pick")), dec!(2));
    }

    #[test]
    fn require_shortfall_leaves_holding() {
        let ledger = seeded(&[("pick", dec!(2))]);
        let read = ledger.read_require(&good("pick"), dec!(5)).ok();
        assert_eq!(
            read,
            Some(LedgerRead::Shortfall {
                held: dec!(2),
                remaining: dec!(3)
            })
        );
        assert_eq!(ledger.held(&good("pick")), dec!(2));
    }

    #[test]
    fn require_on_absent_good_is_full_shortfall() {
        let ledger = ResourceLedger::new();
        let read = ledger.read_require(&good("pick"), dec!(1)).ok();
        assert_eq!(read.map(|r| r.remaining()), Some(dec!(1)));
    }

    #[test]
    fn consume_more_than_enough_decrements() {
        let mut ledger = seeded(&[("coal", dec!(10))]);
        let read = ledger.read_consume(&good("coal"), dec!(4)).ok();
        assert_eq!(read, Some(LedgerRead::Satisfied { held: dec!(10) }));
        assert_eq!(ledger.held(&good("coal")), dec!(6));
    }

    #[test]
    fn consume_exactly_enough_removes_entry() {
        let mut ledger = seeded(&[("coal", dec!(4))]);
        let read = ledger.read_consume(&good("coal"), dec!(4)).ok();
        assert_eq!(read, Some(LedgerRead::Satisfied { held: dec!(4) }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn consume_too_little_removes_entry_and_reports_shortfall() {
        let mut ledger = seeded(&[("cobblestone", dec!(2))]);
        let read = ledger.read_consume(&good("cobblestone"), dec!(4)).ok();
        assert_eq!(
            read,
            Some(LedgerRead::Shortfall {
                held: dec!(2),
                remaining: dec!(2)
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn record_require_keeps_the_larger() {
        let mut ledger = ResourceLedger::new();
        assert_eq!(ledger.record_require(&good("T"), dec!(5)), dec!(5));
        assert_eq!(ledger.record_require(&good("T"), dec!(3)), dec!(5));
        assert_eq!(ledger.held(&good("T")), dec!(5));
    }

    #[test]
    fn record_require_of_zero_stores_nothing() {
        let mut ledger = ResourceLedger::new();
        ledger.record_require(&good("T"), Decimal::ZERO);
        assert!(ledger.is_empty());
    }
}
