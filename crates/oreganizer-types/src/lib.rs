//! Shared type definitions for the Oreganizer production planner.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the workspace: goods, demand kinds, demands, and the rule for merging two
//! demands raised against the same good.
//!
//! # Modules
//!
//! - [`good`] -- The [`Good`] name wrapper.
//! - [`enums`] -- [`DemandKind`] (require vs. consume).
//! - [`quantity`] -- The exact [`Quantity`] type and its validation.
//! - [`demand`] -- [`Demand`] and the demand merger ([`merge`]).

pub mod demand;
pub mod enums;
pub mod good;
pub mod quantity;

// Re-export all public types at crate root for convenience.
pub use demand::{Demand, merge};
pub use enums::DemandKind;
pub use good::Good;
pub use quantity::{Quantity, QuantityError, validate_quantity};
