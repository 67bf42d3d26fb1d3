//! Candidate (entry, rotation) pairs
//!
//! A [`Possibility`] is a plain value: equality and hashing cover only the entry and
//! the rotation. Per-cell state such as the root and placed flags is kept by the domain
//! grid, never on the value itself.

use std::collections::HashMap;
use std::fmt;

use crate::algorithm::bitset::{PossibilitySet, TileBitset};
use crate::catalog::tile::{Tile, TileId};

/// Quarter-turn rotation about the vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    /// Unrotated
    #[default]
    Zero,
    /// One quarter turn
    Ninety,
    /// Two quarter turns
    OneEighty,
    /// Three quarter turns
    TwoSeventy,
}

impl Rotation {
    /// All four rotations in ascending order
    pub const ALL: [Self; 4] = [Self::Zero, Self::Ninety, Self::OneEighty, Self::TwoSeventy];

    /// Number of quarter turns, 0 to 3
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::Ninety => 1,
            Self::OneEighty => 2,
            Self::TwoSeventy => 3,
        }
    }

    /// Angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Zero => 0,
            Self::Ninety => 90,
            Self::OneEighty => 180,
            Self::TwoSeventy => 270,
        }
    }

    /// Yaw a consumer applies when instantiating; rotation runs counter to the yaw axis
    pub const fn yaw_degrees(self) -> i16 {
        -(self.degrees() as i16)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A candidate value for a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// The catalog entry
    pub tile: TileId,
    /// Its rotation
    pub rotation: Rotation,
}

impl Possibility {
    /// Pair an entry with a rotation
    pub const fn new(tile: TileId, rotation: Rotation) -> Self {
        Self { tile, rotation }
    }

    /// Unrotated possibility for an entry
    pub const fn unrotated(tile: TileId) -> Self {
        Self::new(tile, Rotation::Zero)
    }

    /// Yaw a consumer applies when instantiating this possibility
    pub const fn yaw_degrees(&self) -> i16 {
        self.rotation.yaw_degrees()
    }
}

impl fmt::Display for Possibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.tile, self.rotation)
    }
}

/// Every placeable possibility of a catalog, numbered densely
///
/// Possibilities of one entry occupy a contiguous run of indices in rotation order, so a
/// cell domain can be a [`PossibilitySet`] over this table.
#[derive(Clone, Debug)]
pub struct PossibilityTable {
    possibilities: Vec<Possibility>,
    index: HashMap<Possibility, usize>,
}

impl PossibilityTable {
    /// Expand placeable entries into their valid rotations
    ///
    /// `tiles` yields `(id, entry)` pairs; ids may be sparse, since the border entry is
    /// never expanded.
    pub fn new<'a>(tiles: impl IntoIterator<Item = (TileId, &'a Tile)>) -> Self {
        let mut possibilities = Vec::new();
        for (id, tile) in tiles {
            possibilities.extend(
                tile.rotations()
                    .iter()
                    .map(|&rotation| Possibility::new(id, rotation)),
            );
        }

        let index: HashMap<Possibility, usize> = possibilities
            .iter()
            .enumerate()
            .map(|(i, &possibility)| (possibility, i))
            .collect();

        Self {
            possibilities,
            index,
        }
    }

    /// Number of possibilities
    pub fn len(&self) -> usize {
        self.possibilities.len()
    }

    /// Whether the table has no possibilities
    pub fn is_empty(&self) -> bool {
        self.possibilities.is_empty()
    }

    /// Possibility at an index
    pub fn get(&self, index: usize) -> Option<Possibility> {
        self.possibilities.get(index).copied()
    }

    /// Index of a possibility, `None` if the entry is not placeable at that rotation
    pub fn index_of(&self, possibility: Possibility) -> Option<usize> {
        self.index.get(&possibility).copied()
    }

    /// Every possibility in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Possibility)> + '_ {
        self.possibilities.iter().copied().enumerate()
    }

    /// Domain holding every possibility
    pub fn full(&self) -> PossibilitySet {
        PossibilitySet::full(self.len())
    }

    /// Entries present among the possibilities of `set`
    pub fn tiles_in(&self, set: &PossibilitySet) -> TileBitset {
        set.iter()
            .filter_map(|index| self.possibilities.get(index))
            .map(|possibility| possibility.tile)
            .collect()
    }
}
