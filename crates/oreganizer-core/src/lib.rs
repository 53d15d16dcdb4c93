//! Recipe catalog, worklist resolver, and plan reporting for the Oreganizer
//! planner.
//!
//! Given a catalog of recipes, a set of goals, and a starting inventory,
//! the planner works out what has to be crafted, what gets used up along
//! the way, and what must be gathered by hand.
//!
//! # Modules
//!
//! - [`catalog`] -- Recipe catalog compilation, validation, and topological
//!   ranks.
//! - [`config`] -- Configuration loading from `oreganizer.yaml` into
//!   strongly-typed structs.
//! - [`input`] -- Catalog, goals, and inventory loading from JSON or YAML.
//! - [`planner`] -- The worklist resolver ([`Planner`]).
//! - [`report`] -- The finished [`Plan`].
//! - [`trace`] -- Per-step record of what the resolver did.
//! - [`worklist`] -- Pending demands, one per good, in resolution order.
//!
//! # Usage
//!
//! ```
//! use oreganizer_core::input::{parse_catalog, Goals, InputFormat, Inventory};
//! use oreganizer_core::plan;
//! use rust_decimal::Decimal;
//!
//! let catalog = parse_catalog(
//!     r#"{"planks": {"consumes": {"log": 0.25}}}"#,
//!     InputFormat::Json,
//! )
//! .unwrap_or_default();
//!
//! let mut goals = Goals::new();
//! goals.insert("planks".into(), Decimal::new(8, 0));
//!
//! let plan = plan(&catalog, &goals, &Inventory::new());
//! let logs = plan.ok().and_then(|p| p.terminal_consumed.get("log").copied());
//! assert_eq!(logs, Some(Decimal::new(2, 0)));
//! ```

pub mod catalog;
pub mod config;
pub mod input;
pub mod planner;
pub mod report;
pub mod trace;
pub mod worklist;

pub use catalog::{Catalog, CatalogError, CatalogSpec, Ingredient, Recipe, RecipeSpec};
pub use config::{ConfigError, OreganizerConfig, ReportFormat};
pub use input::{Goals, InputError, Inventory, PlanInput};
pub use planner::{PlanError, Planner, plan};
pub use report::Plan;
pub use trace::{PlanStep, StepOutcome};
pub use worklist::Worklist;
