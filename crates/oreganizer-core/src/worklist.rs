//! The worklist of pending demands.
//!
//! At most one demand is pending per good. A new demand for a good that is
//! already pending is merged into the existing entry, which keeps its place
//! in the queue.
//!
//! # Ordering
//!
//! [`Worklist::pop`] takes the pending demand whose good has the lowest
//! topological rank in the catalog, so a good is resolved only after every
//! product that could still demand it. Goods the catalog never mentions rank
//! last. Ties break by first insertion. With an acyclic catalog this means
//! each good is popped at most once per drain.

use indexmap::IndexMap;
use indexmap::map::Entry;

use oreganizer_types::{Demand, Good, QuantityError, merge};

use crate::catalog::Catalog;

/// Pending demands, one per good, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worklist {
    pending: IndexMap<Good, Demand>,
}

impl Worklist {
    /// Create an empty worklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `demand`, merging it into any demand already pending for its good.
    ///
    /// Returns the pending entry after the merge.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Overflow`] if the merge overflows.
    pub fn push(&mut self, demand: Demand) -> Result<&Demand, QuantityError> {
        let slot = match self.pending.entry(demand.good.clone()) {
            Entry::Occupied(occupied) => {
                let slot = occupied.into_mut();
                *slot = merge(Some(&*slot), demand)?;
                slot
            }
            Entry::Vacant(vacant) => vacant.insert(demand),
        };
        Ok(slot)
    }

    /// Remove and return the next demand to resolve (see the module docs for
    /// the ordering).
    pub fn pop(&mut self, catalog: &Catalog) -> Option<Demand> {
        let index = self
            .pending
            .values()
            .enumerate()
            .min_by_key(|(index, demand)| (catalog.rank(&demand.good).unwrap_or(usize::MAX), *index))
            .map(|(index, _)| index)?;
        self.pending
            .shift_remove_index(index)
            .map(|(_, demand)| demand)
    }

    /// Number of pending demands.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterate over pending demands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Demand> {
        self.pending.values()
    }
}
