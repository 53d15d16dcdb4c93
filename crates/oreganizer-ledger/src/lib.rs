//! Resource ledger, demand registers, and conservation checks for the
//! Oreganizer planner.
//!
//! Every unit of every good that passes through a plan is accounted for
//! here. Goods enter a plan from three places (initial inventory, recipe
//! production, manual sourcing) and leave it in two (consumption, or still
//! being held when the plan finishes).
//!
//! # Architecture
//!
//! The ledger crate provides four modules:
//!
//! - [`ledger`] -- The [`ResourceLedger`]: on-hand quantities, doubling as
//!   the memo table for resolved require demands.
//! - [`register`] -- [`DemandRegister`], the merge target behind the
//!   consumption totals and the terminal register.
//! - [`flow`] -- [`FlowLog`]: gross per-good inflow and outflow totals.
//! - [`conservation`] -- Conservation law verification.
//!
//! # Conservation Law
//!
//! For every good G at the end of a plan:
//!
//! ```text
//! initial(G) + produced(G) + sourced(G) == consumed(G) + held(G)
//! ```
//!
//! A violation produces a [`ConservationAnomaly`]. Nothing in this crate
//! panics; fallible operations return errors.
//!
//! # Usage
//!
//! ```
//! use oreganizer_ledger::{LedgerRead, ResourceLedger};
//! use oreganizer_types::Good;
//! use rust_decimal::Decimal;
//!
//! let mut ledger = ResourceLedger::from_inventory([(Good::from("cobblestone"), Decimal::new(2, 0))])
//!     .unwrap_or_default();
//!
//! // Consuming 4 cobblestone with 2 on hand leaves a shortfall of 2.
//! let read = ledger.read_consume(&Good::from("cobblestone"), Decimal::new(4, 0));
//! assert!(matches!(read, Ok(LedgerRead::Shortfall { .. })));
//! assert!(ledger.is_empty());
//! ```

pub mod conservation;
pub mod flow;
pub mod ledger;
pub mod register;

// Re-export primary types at crate root.
pub use conservation::{ConservationResult, verify_conservation};
pub use flow::{FlowLog, GoodFlow};
pub use ledger::{LedgerRead, ResourceLedger};
pub use register::DemandRegister;

use std::collections::BTreeMap;

use oreganizer_types::{Good, Quantity, QuantityError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when updating the ledger or its registers.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// A good was seeded or recorded with a negative quantity.
    #[error("negative quantity {quantity} for {good}")]
    NegativeQuantity {
        /// The good.
        good: Good,
        /// The invalid quantity.
        quantity: Quantity,
    },

    /// Quantity arithmetic failed.
    #[error("quantity error: {source}")]
    Quantity {
        /// The underlying quantity error.
        #[from]
        source: QuantityError,
    },
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A conservation law violation detected at the end of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConservationAnomaly {
    /// Per-good imbalance: (`inflow`, `outflow`) for each good that did not
    /// balance.
    pub imbalances: BTreeMap<Good, (Quantity, Quantity)>,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl core::fmt::Display for ConservationAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
