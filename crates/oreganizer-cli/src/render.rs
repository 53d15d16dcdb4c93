//! Report rendering.

use std::fmt;

use oreganizer_core::{Catalog, Goals, Inventory, Plan};
use oreganizer_types::{DemandKind, Quantity};

/// The sectioned plain-text report.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    /// The compiled catalog.
    pub catalog: &'a Catalog,
    /// The goals as loaded.
    pub goals: &'a Goals,
    /// The starting inventory as loaded.
    pub inventory: &'a Inventory,
    /// The finished plan.
    pub plan: &'a Plan,
    /// Include the step-by-step trace.
    pub show_trace: bool,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Actions:")?;
        for recipe in self.catalog.recipes() {
            write!(f, "  {} <- ", recipe.product)?;
            write_ingredients(f, recipe.ingredients_of(DemandKind::Consume))?;
            let mut requires = recipe.ingredients_of(DemandKind::Require).peekable();
            if requires.peek().is_some() {
                write!(f, " using ")?;
                write_ingredients(f, requires)?;
            }
            writeln!(f)?;
        }
        writeln!(f)?;

        writeln!(f, "Initial goals:")?;
        for (good, quantity) in self.goals {
            writeln!(f, "  {}: {:>3}x {good}", DemandKind::Require, qty(*quantity))?;
        }
        writeln!(f)?;

        writeln!(f, "Initial resources:")?;
        for (good, quantity) in self.inventory {
            writeln!(f, "  {:>3}x {good}", qty(*quantity))?;
        }
        writeln!(f)?;

        if self.show_trace {
            writeln!(f, "Trace:")?;
            for step in &self.plan.trace {
                write!(f, "{step}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Todo by hand:")?;
        let terminal = [
            (DemandKind::Require, &self.plan.terminal_required),
            (DemandKind::Consume, &self.plan.terminal_consumed),
        ];
        for (kind, items) in terminal {
            for (good, quantity) in items {
                writeln!(f, "  {kind}: {:>3}x {good}", qty(*quantity))?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Resources that will be consumed:")?;
        for (good, quantity) in &self.plan.consumed {
            writeln!(f, "  {:>3}x {good}", qty(*quantity))?;
        }
        writeln!(f)?;

        writeln!(f, "Resources remaining at end:")?;
        for (good, quantity) in &self.plan.leftover {
            writeln!(f, "  {:>3}x {good}", qty(*quantity))?;
        }
        Ok(())
    }
}

fn write_ingredients<'i>(
    f: &mut fmt::Formatter<'_>,
    ingredients: impl Iterator<Item = &'i oreganizer_core::Ingredient>,
) -> fmt::Result {
    for (index, ingredient) in ingredients.enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} {}", qty(ingredient.quantity), ingredient.good)?;
    }
    Ok(())
}

/// A quantity without trailing zeros, ready for width padding.
fn qty(quantity: Quantity) -> String {
    quantity.normalize().to_string()
}

/// The plan as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn render_json(plan: &Plan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(plan)
}
