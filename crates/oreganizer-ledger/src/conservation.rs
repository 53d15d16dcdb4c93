//! Conservation law verification.
//!
//! Goods enter a plan as initial inventory, as recipe output, or as manual
//! sourcing, and leave it by being consumed. Whatever has not left is still
//! held. For each good G the check is:
//!
//! ```text
//! initial(G) + produced(G) + sourced(G) == consumed(G) + held(G)
//! ```
//!
//! The planner maintains this by construction. The check exists to catch
//! bookkeeping bugs, and a violation produces a [`ConservationAnomaly`].

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use oreganizer_types::{Good, Quantity};

use crate::ConservationAnomaly;
use crate::flow::FlowLog;
use crate::ledger::ResourceLedger;

/// The result of a conservation check over a finished plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// Every good balances.
    Balanced,
    /// One or more goods have imbalanced flows.
    Anomaly(ConservationAnomaly),
}

impl ConservationResult {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Verify the conservation law for every good seen in `flows` or still held
/// in `ledger`.
pub fn verify_conservation(flows: &FlowLog, ledger: &ResourceLedger) -> ConservationResult {
    let all_goods: BTreeSet<&Good> = flows
        .iter()
        .map(|(good, _)| good)
        .chain(ledger.iter().map(|(good, _)| good))
        .collect();

    let mut imbalances: BTreeMap<Good, (Quantity, Quantity)> = BTreeMap::new();

    for good in all_goods {
        let flow = flows.get(good);
        let held = ledger.held(good);

        let Some(inflow) = flow.inflow() else {
            return overflow_anomaly(good);
        };
        let Some(outflow) = flow.consumed.checked_add(held) else {
            return overflow_anomaly(good);
        };

        if inflow != outflow {
            imbalances.insert(good.clone(), (inflow, outflow));
        }
    }

    if imbalances.is_empty() {
        ConservationResult::Balanced
    } else {
        let count = imbalances.len();
        tracing::warn!(goods = count, "conservation law violated");
        ConservationResult::Anomaly(ConservationAnomaly {
            imbalances,
            message: format!("conservation law violated for {count} good(s)"),
        })
    }
}

/// Construct an anomaly result for arithmetic overflow during summation.
fn overflow_anomaly(good: &Good) -> ConservationResult {
    let mut imbalances = BTreeMap::new();
    imbalances.insert(good.clone(), (Decimal::ZERO, Decimal::ZERO));
    ConservationResult::Anomaly(ConservationAnomaly {
        imbalances,
        message: format!("arithmetic overflow while balancing {good}"),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn good(name: &str) -> Good {
        Good::from(name)
    }

    #[test]
    fn empty_plan_is_balanced() {
        let result = verify_conservation(&FlowLog::new(), &ResourceLedger::new());
        assert_eq!(result, ConservationResult::Balanced);
    }

    #[test]
    fn sourced_and_consumed_balance() {
        // Nothing held, 4 sourced by hand, all 4 eaten.
        let mut flows = FlowLog::new();
        let _ = flows.record_sourced(&good("cobblestone"), dec!(4));
        let _ = flows.record_consumed(&good("cobblestone"), dec!(4));
        let result = verify_conservation(&flows, &ResourceLedger::new());
        assert!(result.is_balanced());
    }

    #[test]
    fn produced_and_still_held_balance() {
        let mut flows = FlowLog::new();
        let _ = flows.record_produced(&good("A"), dec!(3));
        let mut ledger = ResourceLedger::new();
        ledger.record_require(&good("A"), dec!(3));
        assert!(verify_conservation(&flows, &ledger).is_balanced());
    }

    #[test]
    fn untouched_inventory_balances() {
        let mut flows = FlowLog::new();
        let _ = flows.record_initial(&good("coal"), dec!(7));
        let ledger = ResourceLedger::from_inventory([(good("coal"), dec!(7))]).unwrap_or_default();
        assert!(verify_conservation(&flows, &ledger).is_balanced());
    }

    #[test]
    fn missing_outflow_is_an_anomaly() {
        let mut flows = FlowLog::new();
        let _ = flows.record_sourced(&good("iron"), dec!(2));
        let result = verify_conservation(&flows, &ResourceLedger::new());

        let anomaly = match result {
            ConservationResult::Anomaly(anomaly) => Some(anomaly),
            ConservationResult::Balanced => None,
        };
        assert_eq!(
            anomaly
                .as_ref()
                .and_then(|a| a.imbalances.get(&good("iron")).copied()),
            Some((dec!(2), Decimal::ZERO))
        );
        assert!(anomaly.is_some_and(|a| a.to_string().contains("1 good")));
    }

    #[test]
    fn held_without_inflow_is_an_anomaly() {
        let ledger = ResourceLedger::from_inventory([(good("ghost"), dec!(1))]).unwrap_or_default();
        let result = verify_conservation(&FlowLog::new(), &ledger);
        assert!(!result.is_balanced());
    }
}
