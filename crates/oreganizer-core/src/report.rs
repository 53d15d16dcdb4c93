//! The finished plan.

use std::collections::BTreeMap;

use serde::Serialize;

use oreganizer_ledger::{
    ConservationResult, DemandRegister, FlowLog, ResourceLedger, verify_conservation,
};
use oreganizer_types::{DemandKind, Good, Quantity};

use crate::trace::PlanStep;

/// Everything a planning run produced.
///
/// The three totals are independent of worklist ordering. `trace` is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Held goods that must be sourced by hand (tools, stations).
    pub terminal_required: BTreeMap<Good, Quantity>,
    /// Consumed goods that must be sourced by hand (raw materials).
    pub terminal_consumed: BTreeMap<Good, Quantity>,
    /// Gross consumption per good over the whole plan.
    pub consumed: BTreeMap<Good, Quantity>,
    /// Goods still held at the end.
    pub leftover: BTreeMap<Good, Quantity>,
    /// Number of resolver iterations.
    pub steps: usize,
    /// Every resolver iteration, in order.
    pub trace: Vec<PlanStep>,
    /// Gross flows per good, used for the conservation check.
    pub flows: FlowLog,
    #[serde(skip)]
    ledger: ResourceLedger,
}

impl Plan {
    pub(crate) fn new(
        terminal: &DemandRegister,
        consumed: &DemandRegister,
        ledger: ResourceLedger,
        flows: FlowLog,
        trace: Vec<PlanStep>,
    ) -> Self {
        Self {
            terminal_required: terminal.by_kind(DemandKind::Require),
            terminal_consumed: terminal.by_kind(DemandKind::Consume),
            consumed: consumed.quantities(),
            leftover: ledger.iter().map(|(g, q)| (g.clone(), *q)).collect(),
            steps: trace.len(),
            trace,
            flows,
            ledger,
        }
    }

    /// Whether there is nothing to source by hand.
    pub fn is_self_sufficient(&self) -> bool {
        self.terminal_required.is_empty() && self.terminal_consumed.is_empty()
    }

    /// Check that every good's inflow matches its outflow plus what is
    /// still held.
    pub fn verify_conservation(&self) -> ConservationResult {
        verify_conservation(&self.flows, &self.ledger)
    }
}
