//! The recipe catalog.
//!
//! A catalog maps each producible good to its recipe: the goods needed to
//! make one unit of it, each tagged as required (held for the duration,
//! reusable) or consumed (used up). Goods without a recipe can only come
//! from inventory or be sourced by hand.
//!
//! Catalogs are read from a [`CatalogSpec`] and compiled once with
//! [`Catalog::compile`], which rejects malformed input before any planning
//! starts:
//!
//! - a negative ingredient quantity,
//! - a recipe that lists its own product,
//! - a recipe that lists one good as both required and consumed,
//! - a cycle (a good whose recipe transitively depends on itself).
//!
//! Compilation also assigns every good a topological rank: a product always
//! ranks before each of its ingredients. The worklist uses the rank to decide
//! what to resolve next.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use oreganizer_types::{DemandKind, Good, Quantity};

/// Errors that make a catalog unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// An ingredient quantity was negative.
    #[error("recipe for {product} needs {quantity} of {ingredient}; quantities must not be negative")]
    NegativeQuantity {
        /// The recipe's product.
        product: Good,
        /// The offending ingredient.
        ingredient: Good,
        /// The negative quantity.
        quantity: Quantity,
    },

    /// A recipe lists its own product as an ingredient.
    #[error("recipe for {good} depends on itself")]
    SelfReference {
        /// The self-referencing good.
        good: Good,
    },

    /// A recipe lists the same ingredient under both requires and consumes.
    #[error("recipe for {product} both requires and consumes {ingredient}")]
    ConflictingKinds {
        /// The recipe's product.
        product: Good,
        /// The ingredient listed twice.
        ingredient: Good,
    },

    /// The recipes form a dependency cycle.
    #[error("recipe cycle detected involving: {}", format_members(.members))]
    Cycle {
        /// Goods that could not be ordered, in name order.
        members: Vec<Good>,
    },
}

fn format_members(members: &[Good]) -> String {
    members
        .iter()
        .map(Good::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Input contract
// ---------------------------------------------------------------------------

/// One recipe as written in a catalog file.
///
/// Both sections are optional. Entry order is preserved and becomes the
/// order in which ingredients are demanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSpec {
    /// Goods that must be held, per recipe use (not scaled by output).
    #[serde(default, alias = "require", alias = "Require")]
    pub requires: IndexMap<Good, Quantity>,
    /// Goods used up, per unit of output.
    #[serde(default, alias = "consume", alias = "Consume")]
    pub consumes: IndexMap<Good, Quantity>,
}

/// A whole catalog as written in a catalog file: product -> recipe.
pub type CatalogSpec = IndexMap<Good, RecipeSpec>;

// ---------------------------------------------------------------------------
// Compiled catalog
// ---------------------------------------------------------------------------

/// One dependency of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// The dependency good.
    pub good: Good,
    /// Quantity per unit of output (consume) or per use (require).
    pub quantity: Quantity,
    /// How the dependency is used.
    pub kind: DemandKind,
}

/// A validated recipe: requires first, then consumes, each in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// The good this recipe makes.
    pub product: Good,
    /// Ordered dependencies.
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Ingredients of the given kind, in order.
    pub fn ingredients_of(&self, kind: DemandKind) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(move |i| i.kind == kind)
    }
}

/// A validated, acyclic recipe catalog. Immutable once compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    recipes: BTreeMap<Good, Recipe>,
    ranks: BTreeMap<Good, usize>,
}

impl Catalog {
    /// Validate `spec` and build a catalog from it.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first problem found.
    pub fn compile(spec: CatalogSpec) -> Result<Self, CatalogError> {
        let mut recipes = BTreeMap::new();

        for (product, recipe_spec) in spec {
            let recipe = compile_recipe(product.clone(), recipe_spec)?;
            recipes.insert(product, recipe);
        }

        let ranks = topological_ranks(&recipes)?;
        tracing::debug!(recipes = recipes.len(), goods = ranks.len(), "catalog compiled");
        Ok(Self { recipes, ranks })
    }

    /// The recipe for `good`, or `None` if it can only be sourced.
    pub fn recipe(&self, good: &Good) -> Option<&Recipe> {
        self.recipes.get(good)
    }

    /// Topological rank of `good`, or `None` if the catalog never mentions
    /// it. Products rank lower than their ingredients.
    pub fn rank(&self, good: &Good) -> Option<usize> {
        self.ranks.get(good).copied()
    }

    /// Number of recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog has no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Iterate over recipes in product-name order.
    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Every good the catalog mentions, as product or ingredient, in rank
    /// order.
    pub fn goods(&self) -> Vec<&Good> {
        let mut goods: Vec<(&Good, usize)> = self.ranks.iter().map(|(g, r)| (g, *r)).collect();
        goods.sort_by_key(|(_, rank)| *rank);
        goods.into_iter().map(|(good, _)| good).collect()
    }

    /// Every good reachable from `roots` through recipes, roots included.
    pub fn reachable<'a, I>(&self, roots: I) -> BTreeSet<Good>
    where
        I: IntoIterator<Item = &'a Good>,
    {
        let mut seen: BTreeSet<Good> = BTreeSet::new();
        let mut stack: Vec<&Good> = roots.into_iter().collect();

        while let Some(good) = stack.pop() {
            if !seen.insert(good.clone()) {
                continue;
            }
            if let Some(recipe) = self.recipes.get(good) {
                stack.extend(recipe.ingredients.iter().map(|i| &i.good));
            }
        }
        seen
    }
}

fn compile_recipe(product: Good, spec: RecipeSpec) -> Result<Recipe, CatalogError> {
    let mut ingredients = Vec::with_capacity(spec.requires.len().saturating_add(spec.consumes.len()));

    let sections = [
        (spec.requires, DemandKind::Require),
        (spec.consumes, DemandKind::Consume),
    ];
    for (section, kind) in sections {
        for (good, quantity) in section {
            if quantity.is_sign_negative() && !quantity.is_zero() {
                return Err(CatalogError::NegativeQuantity {
                    product,
                    ingredient: good,
                    quantity,
                });
            }
            if good == product {
                return Err(CatalogError::SelfReference { good });
            }
            if ingredients.iter().any(|i: &Ingredient| i.good == good) {
                return Err(CatalogError::ConflictingKinds {
                    product,
                    ingredient: good,
                });
            }
            ingredients.push(Ingredient {
                good,
                quantity,
                kind,
            });
        }
    }

    Ok(Recipe {
        product,
        ingredients,
    })
}

/// Kahn's algorithm over product -> ingredient edges, with name-sorted
/// tie-breaking so ranks are stable across runs.
fn topological_ranks(
    recipes: &BTreeMap<Good, Recipe>,
) -> Result<BTreeMap<Good, usize>, CatalogError> {
    let mut in_degree: BTreeMap<&Good, usize> = BTreeMap::new();
    for (product, recipe) in recipes {
        in_degree.entry(product).or_insert(0);
        for ingredient in &recipe.ingredients {
            let degree = in_degree.entry(&ingredient.good).or_insert(0);
            *degree = degree.saturating_add(1);
        }
    }

    // BTreeMap iteration is name-sorted already.
    let mut queue: VecDeque<&Good> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(good, _)| *good)
        .collect();

    let mut ranks: BTreeMap<Good, usize> = BTreeMap::new();
    while let Some(current) = queue.pop_front() {
        let rank = ranks.len();
        ranks.insert(current.clone(), rank);

        let Some(recipe) = recipes.get(current) else {
            continue;
        };
        let mut next_ready: Vec<&Good> = Vec::new();
        for ingredient in &recipe.ingredients {
            if let Some(degree) = in_degree.get_mut(&ingredient.good) {
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    next_ready.push(&ingredient.good);
                }
            }
        }
        next_ready.sort();
        queue.extend(next_ready);
    }

    if ranks.len() != in_degree.len() {
        let members: Vec<Good> = in_degree
            .keys()
            .filter(|good| !ranks.contains_key(**good))
            .map(|good| (*good).clone())
            .collect();
        return Err(CatalogError::Cycle { members });
    }

    Ok(ranks)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn good(name: &str) -> Good {
        Good::from(name)
    }

    fn recipe(requires: &[(&str, Quantity)], consumes: &[(&str, Quantity)]) -> RecipeSpec {
        RecipeSpec {
            requires: requires.iter().map(|(g, q)| (good(g), *q)).collect(),
            consumes: consumes.iter().map(|(g, q)| (good(g), *q)).collect(),
        }
    }

    fn piston_spec() -> CatalogSpec {
        let mut spec = CatalogSpec::new();
        spec.insert(
            good("piston"),
            recipe(
                &[],
                &[
                    ("cobblestone", dec!(4)),
                    ("planks", dec!(3)),
                    ("iron_ingot", dec!(1)),
                    ("redstone_dust", dec!(1)),
                ],
            ),
        );
        spec
    }

    #[test]
    fn compile_preserves_ingredient_order() {
        let catalog = Catalog::compile(piston_spec()).unwrap_or_default();
        let names: Vec<&str> = catalog
            .recipe(&good("piston"))
            .map(|r| r.ingredients.iter().map(|i| i.good.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, ["cobblestone", "planks", "iron_ingot", "redstone_dust"]);
    }

    #[test]
    fn requires_come_before_consumes() {
        let mut spec = CatalogSpec::new();
        spec.insert(good("A"), recipe(&[("T", dec!(1))], &[("raw", dec!(2))]));
        let catalog = Catalog::compile(spec).unwrap_or_default();
        let kinds: Vec<DemandKind> = catalog
            .recipe(&good("A"))
            .map(|r| r.ingredients.iter().map(|i| i.kind).collect())
            .unwrap_or_default();
        assert_eq!(kinds, [DemandKind::Require, DemandKind::Consume]);
    }

    #[test]
    fn empty_catalog_reports_no_recipes() {
        let catalog = Catalog::compile(CatalogSpec::new()).unwrap_or_default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.goods().is_empty());

        let piston = Catalog::compile(piston_spec()).unwrap_or_default();
        assert!(!piston.is_empty());
    }

    #[test]
    fn goods_without_recipe_have_none() {
        let catalog = Catalog::compile(piston_spec()).unwrap_or_default();
        assert!(catalog.recipe(&good("cobblestone")).is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn products_rank_before_ingredients() {
        let mut spec = CatalogSpec::new();
        spec.insert(good("B"), recipe(&[], &[("C", dec!(1))]));
        spec.insert(good("A"), recipe(&[], &[("C", dec!(1)), ("B", dec!(1))]));
        let catalog = Catalog::compile(spec).unwrap_or_default();

        let rank = |name: &str| catalog.rank(&good(name));
        assert!(rank("A") < rank("B"));
        assert!(rank("B") < rank("C"));
        assert_eq!(rank("unknown"), None);
    }

    #[test]
    fn negative_quantity_rejected() {
        let mut spec = CatalogSpec::new();
        spec.insert(good("A"), recipe(&[], &[("raw", dec!(-2))]));
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::NegativeQuantity { .. })
        ));
    }

    #[test]
    fn self_reference_rejected() {
        let mut spec = CatalogSpec::new();
        spec.insert(good("A"), recipe(&[("A", dec!(1))], &[]));
        assert_eq!(
            Catalog::compile(spec),
            Err(CatalogError::SelfReference { good: good("A") })
        );
    }

    #[test]
    fn same_ingredient_under_both_kinds_rejected() {
        let mut spec = CatalogSpec::new();
        spec.insert(good("A"), recipe(&[("x", dec!(1))], &[("x", dec!(1))]));
        assert!(matches!(
            Catalog::compile(spec),
            Err(CatalogError::ConflictingKinds { .. })
        ));
    }

    #[test]
    fn cycle_rejected_with_members() {
        let mut spec = CatalogSpec::new();
        spec.insert(good("A"), recipe(&[], &[("B", dec!(1))]));
        spec.insert(good("B"), recipe(&[], &[("C", dec!(1))]));
        spec.insert(good("C"), recipe(&[("A", dec!(1))], &[]));
        spec.insert(good("D"), recipe(&[], &[("raw", dec!(1))]));

        let result = Catalog::compile(spec);
        assert_eq!(
            result,
            Err(CatalogError::Cycle {
                members: vec![good("A"), good("B"), good("C")]
            })
        );
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("A, B, C"));
    }

    #[test]
    fn reachable_follows_recipes() {
        let mut spec = piston_spec();
        spec.insert(good("planks"), recipe(&[], &[("log", dec!(0.25))]));
        let catalog = Catalog::compile(spec).unwrap_or_default();
        let reachable = catalog.reachable([&good("piston")]);
        assert_eq!(reachable.len(), 6);
        assert!(reachable.contains(&good("log")));
    }

    #[test]
    fn goods_listed_in_rank_order() {
        let mut spec = piston_spec();
        spec.insert(good("planks"), recipe(&[], &[("log", dec!(0.25))]));
        let catalog = Catalog::compile(spec).unwrap_or_default();
        let goods = catalog.goods();
        assert_eq!(goods.len(), 6);
        assert_eq!(goods.first().map(|g| g.as_str()), Some("piston"));
        assert_eq!(goods.last().map(|g| g.as_str()), Some("log"));
    }

    #[test]
    fn catalog_file_accepts_singular_section_names() {
        let json = r#"{"A": {"require": {"T": 1}, "consume": {"raw": 2}}}"#;
        let spec: Option<CatalogSpec> = serde_json::from_str(json).ok();
        let ingredients = spec
            .and_then(|s| Catalog::compile(s).ok())
            .and_then(|c| c.recipe(&good("A")).map(|r| r.ingredients.len()));
        assert_eq!(ingredients, Some(2));
    }
}
