//! Deduplicating worklist of cells waiting to be re-checked
//!
//! Each queued cell carries the set of directions whose neighbours changed since it was
//! last checked. Pushing a cell that is already queued only widens that set, so the
//! stack never holds the same cell twice.

use ndarray::Array3;

use crate::spatial::{Dimensions, DirectionSet, GridPosition};

/// Stack of cells paired with the directions they must be re-checked against
#[derive(Clone, Debug)]
pub struct Worklist {
    stack: Vec<GridPosition>,
    pending: Array3<DirectionSet>,
}

impl Worklist {
    /// Create an empty worklist for a grid
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            stack: Vec::new(),
            pending: Array3::from_elem(dimensions.shape(), DirectionSet::EMPTY),
        }
    }

    /// Queue `position` for checking against the neighbours in `directions`
    ///
    /// Positions outside the grid and empty direction sets are ignored.
    pub fn push(&mut self, position: GridPosition, directions: DirectionSet) {
        if directions.is_empty() {
            return;
        }
        let Some(pending) = self.pending.get_mut(position.as_index()) else {
            return;
        };
        if pending.is_empty() {
            self.stack.push(position);
        }
        pending.union_with(directions);
    }

    /// Take the most recently queued cell with every direction gathered for it
    pub fn pop(&mut self) -> Option<(GridPosition, DirectionSet)> {
        let position = self.stack.pop()?;
        let directions = self
            .pending
            .get_mut(position.as_index())
            .map(std::mem::take)
            .unwrap_or_default();
        Some((position, directions))
    }

    /// Whether `position` is queued
    pub fn contains(&self, position: GridPosition) -> bool {
        self.pending
            .get(position.as_index())
            .is_some_and(|directions| !directions.is_empty())
    }

    /// Number of queued cells
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop every queued cell
    pub fn clear(&mut self) {
        for position in self.stack.drain(..) {
            if let Some(pending) = self.pending.get_mut(position.as_index()) {
                *pending = DirectionSet::EMPTY;
            }
        }
    }
}
