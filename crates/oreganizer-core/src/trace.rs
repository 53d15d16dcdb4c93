//! Human-readable record of what the resolver did.
//!
//! Every resolver iteration appends one [`PlanStep`]. The trace depends on
//! the worklist ordering; the final totals do not.

use serde::Serialize;

use oreganizer_types::{Demand, DemandKind, Quantity};

/// How a popped demand was dealt with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Fully covered by what was on hand.
    Satisfied {
        /// Quantity on hand before the step.
        held: Quantity,
    },
    /// The shortfall was expanded through the good's recipe.
    Expanded {
        /// Quantity on hand before the step.
        held: Quantity,
        /// Units produced by the recipe.
        produced: Quantity,
        /// Demands raised for the recipe's ingredients.
        subgoals: Vec<Demand>,
    },
    /// No recipe: the shortfall must be sourced by hand.
    Terminal {
        /// Quantity on hand before the step.
        held: Quantity,
        /// Units added to the terminal register.
        sourced: Quantity,
    },
}

impl StepOutcome {
    /// Whether inventory covered part, but not all, of the demand.
    pub fn partially_satisfied(&self) -> bool {
        match self {
            Self::Satisfied { .. } => false,
            Self::Expanded { held, .. } | Self::Terminal { held, .. } => !held.is_zero(),
        }
    }
}

/// One resolver iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanStep {
    /// The demand popped from the worklist.
    pub demand: Demand,
    /// What happened to it.
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

impl PlanStep {
    /// Whether a consume demand used up exactly what was held.
    pub fn consumed_exactly(&self) -> bool {
        match self.outcome {
            StepOutcome::Satisfied { held } => {
                self.demand.kind == DemandKind::Consume && held == self.demand.quantity
            }
            StepOutcome::Expanded { .. } | StepOutcome::Terminal { .. } => false,
        }
    }
}

impl core::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let demand = &self.demand;
        writeln!(f, "{}ing {} x{}", verb_stem(demand), demand.good, demand.quantity.normalize())?;

        match &self.outcome {
            StepOutcome::Satisfied { .. } if self.consumed_exactly() => {
                writeln!(f, "  satisfied perfectly by existing resources")
            }
            StepOutcome::Satisfied { .. } => writeln!(f, "  satisfied by existing resources"),
            StepOutcome::Expanded { subgoals, .. } => {
                if self.outcome.partially_satisfied() {
                    writeln!(f, "  partially satisfied by existing resources")?;
                }
                for subgoal in subgoals {
                    writeln!(
                        f,
                        "  new goal: {} {}x {}",
                        subgoal.kind,
                        subgoal.quantity.normalize(),
                        subgoal.good
                    )?;
                }
                Ok(())
            }
            StepOutcome::Terminal { sourced, .. } => {
                if self.outcome.partially_satisfied() {
                    writeln!(f, "  partially satisfied by existing resources")?;
                }
                writeln!(f, "  todo: {}x {}", sourced.normalize(), demand.good)
            }
        }
    }
}

const fn verb_stem(demand: &Demand) -> &'static str {
    match demand.kind {
        DemandKind::Require => "requir",
        DemandKind::Consume => "consum",
    }
}
