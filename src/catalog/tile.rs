//! Catalog entries with per-direction adjacency declarations

use std::fmt;

use crate::algorithm::bitset::TileBitset;
use crate::catalog::possibility::Rotation;
use crate::io::configuration::DEFAULT_TILE_WEIGHT;
use crate::spatial::{Direction, Footprint};

/// Index of an entry within its tileset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(usize);

impl TileId {
    /// Wrap a raw index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index into the tileset
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allowed neighbours, one set per direction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Adjacency {
    north: TileBitset,
    east: TileBitset,
    south: TileBitset,
    west: TileBitset,
    above: TileBitset,
    below: TileBitset,
}

impl Adjacency {
    const fn get(&self, direction: Direction) -> &TileBitset {
        match direction {
            Direction::North => &self.north,
            Direction::East => &self.east,
            Direction::South => &self.south,
            Direction::West => &self.west,
            Direction::Above => &self.above,
            Direction::Below => &self.below,
        }
    }

    const fn get_mut(&mut self, direction: Direction) -> &mut TileBitset {
        match direction {
            Direction::North => &mut self.north,
            Direction::East => &mut self.east,
            Direction::South => &mut self.south,
            Direction::West => &mut self.west,
            Direction::Above => &mut self.above,
            Direction::Below => &mut self.below,
        }
    }
}

/// A kind of grid content and the rules for placing it
///
/// Entries are built with the `with_*` methods and handed to a
/// [`TilesetBuilder`](crate::catalog::TilesetBuilder), which records the adjacency
/// declarations and validates the flags.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    name: String,
    adjacency: Adjacency,
    allow_rotation: bool,
    allow_free_rotation: bool,
    same_rotation_when_stacked: bool,
    dont_instantiate: bool,
    weight: f64,
    footprint: Footprint,
}

impl Tile {
    /// Create a single-cell, non-rotating entry with the default weight
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adjacency: Adjacency::default(),
            allow_rotation: false,
            allow_free_rotation: false,
            same_rotation_when_stacked: false,
            dont_instantiate: false,
            weight: DEFAULT_TILE_WEIGHT,
            footprint: Footprint::UNIT,
        }
    }

    /// Let the entry appear in all four quarter-turn rotations
    #[must_use]
    pub const fn with_rotation(mut self) -> Self {
        self.allow_rotation = true;
        self
    }

    /// Ask consumers to pick a random yaw at instantiation time
    #[must_use]
    pub const fn with_free_rotation(mut self) -> Self {
        self.allow_free_rotation = true;
        self
    }

    /// Force rotation-bearing entries stacked on top of this one to share its rotation
    #[must_use]
    pub const fn with_stacked_rotation(mut self) -> Self {
        self.same_rotation_when_stacked = true;
        self
    }

    /// Keep the entry out of placement output while it still constrains neighbours
    #[must_use]
    pub const fn invisible(mut self) -> Self {
        self.dont_instantiate = true;
        self
    }

    /// Relative selection probability
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Occupy more than one cell
    #[must_use]
    pub const fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry may appear in four cardinal rotations
    pub const fn allow_rotation(&self) -> bool {
        self.allow_rotation
    }

    /// Entry is rotated arbitrarily by the consumer at placement time
    pub const fn allow_free_rotation(&self) -> bool {
        self.allow_free_rotation
    }

    /// Entries stacked on top must share this entry's rotation
    pub const fn same_rotation_when_stacked(&self) -> bool {
        self.same_rotation_when_stacked
    }

    /// Entry produces no visible placement
    pub const fn dont_instantiate(&self) -> bool {
        self.dont_instantiate
    }

    /// Relative selection probability
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Unrotated extent in cells
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Extent in cells at the given rotation
    pub const fn rotated_footprint(&self, rotation: Rotation) -> Footprint {
        self.footprint.rotated(rotation)
    }

    /// Occupies more than one cell
    pub fn is_multi_cell(&self) -> bool {
        self.footprint.is_multi_cell()
    }

    /// Rotations this entry can be placed in
    pub fn rotations(&self) -> &'static [Rotation] {
        if self.allow_rotation {
            &Rotation::ALL
        } else {
            &[Rotation::Zero]
        }
    }

    /// Neighbours allowed in `direction` exactly as declared, ignoring rotation
    pub const fn declared(&self, direction: Direction) -> &TileBitset {
        self.adjacency.get(direction)
    }

    /// Neighbours allowed in `direction` when the entry is placed at `rotation`
    ///
    /// Horizontal lookups select the declaration at `(direction + rotation) mod 4`;
    /// above and below are unaffected.
    pub const fn allowed(&self, direction: Direction, rotation: Rotation) -> &TileBitset {
        self.adjacency
            .get(direction.rotated(rotation.quarter_turns()))
    }

    /// Whether `other` may sit in `direction` of this entry placed at `rotation`
    pub fn allows(&self, direction: Direction, rotation: Rotation, other: TileId) -> bool {
        self.allowed(direction, rotation).contains(other)
    }

    pub(crate) fn declare(&mut self, direction: Direction, other: TileId) {
        self.adjacency.get_mut(direction).insert(other);
    }
}
