//! The worklist resolver.
//!
//! A [`Planner`] owns every piece of mutable state for one planning run and
//! borrows the (immutable) catalog. Each [`Planner::step`] resolves one
//! pending demand:
//!
//! 1. Pop the next demand from the worklist.
//! 2. If it is a consume demand, add it to the consumption totals. This is
//!    gross consumption, whether or not inventory later covers it.
//! 3. Check it against the resource ledger. If the ledger covers it, the
//!    step is done.
//! 4. Otherwise resolve the shortfall. With no recipe, the shortfall goes to
//!    the terminal register. With a recipe, each ingredient raises a new
//!    demand: consumed ingredients scale with the shortfall, required
//!    ingredients do not.
//! 5. If it is a require demand, memoize the result in the ledger.
//!
//! [`Planner::run`] repeats until the worklist is empty. With an acyclic
//! catalog this always terminates, and because the worklist resolves
//! products before their ingredients every good is popped at most once.
//!
//! Nothing in here fails on well-formed input. Goods that cannot be made are
//! data (terminal register entries), not errors. The errors that do exist
//! cover negative demands and decimal overflow.

use tracing::{debug, info};

use oreganizer_ledger::{DemandRegister, FlowLog, LedgerError, LedgerRead, ResourceLedger};
use oreganizer_types::{Demand, DemandKind, Good, Quantity, QuantityError, validate_quantity};

use crate::catalog::Catalog;
use crate::input::{Goals, Inventory};
use crate::report::Plan;
use crate::trace::{PlanStep, StepOutcome};
use crate::worklist::Worklist;

/// Errors that can occur while planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A goal or pushed demand had a negative quantity.
    #[error("demand for {good} has negative quantity {quantity}")]
    NegativeDemand {
        /// The demanded good.
        good: Good,
        /// The negative quantity.
        quantity: Quantity,
    },

    /// The plan was finished while demands were still pending.
    #[error("{pending} demand(s) still pending; the worklist must be drained before finishing")]
    WorklistNotEmpty {
        /// Number of pending demands.
        pending: usize,
    },

    /// Ledger or register update failed.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// Quantity arithmetic failed.
    #[error("quantity error: {source}")]
    Quantity {
        /// The underlying quantity error.
        #[from]
        source: QuantityError,
    },
}

/// All mutable state of one planning run.
#[derive(Debug)]
pub struct Planner<'c> {
    catalog: &'c Catalog,
    worklist: Worklist,
    ledger: ResourceLedger,
    consumed: DemandRegister,
    terminal: DemandRegister,
    flows: FlowLog,
    trace: Vec<PlanStep>,
}

impl<'c> Planner<'c> {
    /// Start a run over `catalog` with `inventory` on hand.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Ledger`] if the inventory has a negative
    /// quantity.
    pub fn new(catalog: &'c Catalog, inventory: &Inventory) -> Result<Self, PlanError> {
        let ledger = ResourceLedger::from_inventory(
            inventory
                .iter()
                .map(|(good, quantity)| (good.clone(), *quantity)),
        )?;

        let mut flows = FlowLog::new();
        for (good, quantity) in ledger.iter() {
            flows.record_initial(good, *quantity)?;
        }

        Ok(Self {
            catalog,
            worklist: Worklist::new(),
            ledger,
            consumed: DemandRegister::new(),
            terminal: DemandRegister::new(),
            flows,
            trace: Vec::new(),
        })
    }

    /// Queue every goal as a top-level require demand, in goal order.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NegativeDemand`] for a negative goal.
    pub fn add_goals(&mut self, goals: &Goals) -> Result<(), PlanError> {
        for (good, quantity) in goals {
            self.push(Demand::require(good.clone(), *quantity))?;
        }
        Ok(())
    }

    /// Queue one demand, merging it with anything pending for its good.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NegativeDemand`] for a negative quantity.
    pub fn push(&mut self, demand: Demand) -> Result<(), PlanError> {
        if validate_quantity(demand.quantity).is_err() {
            return Err(PlanError::NegativeDemand {
                good: demand.good,
                quantity: demand.quantity,
            });
        }
        self.worklist.push(demand)?;
        Ok(())
    }

    /// Resolve one pending demand.
    ///
    /// Returns the recorded step, or `None` once the worklist is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if quantity arithmetic overflows.
    pub fn step(&mut self) -> Result<Option<&PlanStep>, PlanError> {
        let Some(demand) = self.worklist.pop(self.catalog) else {
            return Ok(None);
        };

        if demand.kind == DemandKind::Consume {
            self.consumed.record(demand.clone())?;
            self.flows.record_consumed(&demand.good, demand.quantity)?;
        }

        let read = match demand.kind {
            DemandKind::Require => self.ledger.read_require(&demand.good, demand.quantity)?,
            DemandKind::Consume => self.ledger.read_consume(&demand.good, demand.quantity)?,
        };

        let outcome = match read {
            LedgerRead::Satisfied { held } => StepOutcome::Satisfied { held },
            LedgerRead::Shortfall { held, remaining } => {
                let outcome = self.resolve_shortfall(&demand, held, remaining)?;
                if demand.kind == DemandKind::Require {
                    self.ledger.record_require(&demand.good, demand.quantity);
                }
                outcome
            }
        };

        debug!(
            good = %demand.good,
            kind = %demand.kind,
            quantity = %demand.quantity,
            outcome = outcome_label(&outcome),
            pending = self.worklist.len(),
            "resolved demand"
        );

        self.trace.push(PlanStep { demand, outcome });
        Ok(self.trace.last())
    }

    /// Resolve pending demands until the worklist is empty.
    ///
    /// Returns the number of steps taken by this call.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanError`] raised by [`step`](Self::step).
    pub fn run(&mut self) -> Result<usize, PlanError> {
        let mut steps: usize = 0;
        while self.step()?.is_some() {
            steps = steps.saturating_add(1);
        }
        Ok(steps)
    }

    /// Pending demands not yet resolved.
    pub const fn worklist(&self) -> &Worklist {
        &self.worklist
    }

    /// The resource ledger as it stands.
    pub const fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Consumption totals so far.
    pub const fn consumed(&self) -> &DemandRegister {
        &self.consumed
    }

    /// Terminal register so far.
    pub const fn terminal(&self) -> &DemandRegister {
        &self.terminal
    }

    /// Steps taken so far, in order.
    pub fn trace(&self) -> &[PlanStep] {
        &self.trace
    }

    /// End the run and produce the report.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::WorklistNotEmpty`] if demands are still pending.
    pub fn finish(self) -> Result<Plan, PlanError> {
        if !self.worklist.is_empty() {
            return Err(PlanError::WorklistNotEmpty {
                pending: self.worklist.len(),
            });
        }
        Ok(Plan::new(
            &self.terminal,
            &self.consumed,
            self.ledger,
            self.flows,
            self.trace,
        ))
    }

    fn resolve_shortfall(
        &mut self,
        demand: &Demand,
        held: Quantity,
        remaining: Quantity,
    ) -> Result<StepOutcome, PlanError> {
        let catalog = self.catalog;
        let Some(recipe) = catalog.recipe(&demand.good) else {
            self.terminal.record(demand.with_quantity(remaining))?;
            self.flows.record_sourced(&demand.good, remaining)?;
            return Ok(StepOutcome::Terminal {
                held,
                sourced: remaining,
            });
        };

        self.flows.record_produced(&demand.good, remaining)?;

        let mut subgoals = Vec::with_capacity(recipe.ingredients.len());
        for ingredient in &recipe.ingredients {
            let quantity = match ingredient.kind {
                // One full set of consumed ingredients per unit produced.
                DemandKind::Consume => ingredient.quantity.checked_mul(remaining).ok_or(
                    QuantityError::Overflow {
                        context: "scaling a consumed ingredient",
                    },
                )?,
                // Held ingredients are needed once, however many are made.
                DemandKind::Require => ingredient.quantity,
            };
            let subgoal = Demand::new(ingredient.good.clone(), quantity, ingredient.kind);
            self.worklist.push(subgoal.clone())?;
            subgoals.push(subgoal);
        }

        Ok(StepOutcome::Expanded {
            held,
            produced: remaining,
            subgoals,
        })
    }
}

const fn outcome_label(outcome: &StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Satisfied { .. } => "satisfied",
        StepOutcome::Expanded { .. } => "expanded",
        StepOutcome::Terminal { .. } => "terminal",
    }
}

/// Plan `goals` against `catalog` starting from `inventory`.
///
/// # Errors
///
/// Returns [`PlanError`] for negative goals or inventory, or on overflow.
pub fn plan(catalog: &Catalog, goals: &Goals, inventory: &Inventory) -> Result<Plan, PlanError> {
    info!(
        recipes = catalog.len(),
        goals = goals.len(),
        inventory = inventory.len(),
        "planning started"
    );

    let mut planner = Planner::new(catalog, inventory)?;
    planner.add_goals(goals)?;
    let steps = planner.run()?;
    let plan = planner.finish()?;

    info!(
        steps,
        terminal = plan.terminal_required.len().saturating_add(plan.terminal_consumed.len()),
        consumed = plan.consumed.len(),
        leftover = plan.leftover.len(),
        "planning finished"
    );
    Ok(plan)
}
