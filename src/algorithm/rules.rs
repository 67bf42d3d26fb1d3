//! Adjacency rules compiled from a tileset
//!
//! Rotation-adjusted lookups are resolved once per possibility at engine construction,
//! so propagation only ever reads flat tables indexed by possibility.

use crate::algorithm::bitset::{PossibilitySet, TileBitset};
use crate::catalog::{Possibility, PossibilityTable, TileId, Tileset};
use crate::spatial::{Direction, DirectionSet, Footprint};

/// Per-possibility adjacency data for one tileset
#[derive(Clone, Debug)]
pub struct AdjacencyRules {
    table: PossibilityTable,
    allowed: Vec<[TileBitset; 6]>,
    border_allowed: Vec<DirectionSet>,
    footprints: Vec<Footprint>,
    weights: Vec<f64>,
    stacking: TileBitset,
    rotating: TileBitset,
    has_multi_cell: bool,
    empty: TileBitset,
}

impl AdjacencyRules {
    /// Compile every placeable possibility of `tileset`
    pub fn new(tileset: &Tileset) -> Self {
        let table = tileset.possibility_table();
        let border = tileset.border();

        let mut allowed = Vec::with_capacity(table.len());
        let mut border_allowed = Vec::with_capacity(table.len());
        let mut footprints = Vec::with_capacity(table.len());
        let mut weights = Vec::with_capacity(table.len());

        for (_, possibility) in table.iter() {
            let rotation = possibility.rotation;
            // The table is built from this tileset, so every entry resolves
            let Some(tile) = tileset.tile(possibility.tile) else {
                allowed.push(Default::default());
                border_allowed.push(DirectionSet::EMPTY);
                footprints.push(Footprint::UNIT);
                weights.push(0.0);
                continue;
            };
            allowed.push(std::array::from_fn(|index| {
                Direction::from_index(index)
                    .map(|direction| tile.allowed(direction, rotation).clone())
                    .unwrap_or_default()
            }));
            border_allowed.push(
                Direction::ALL
                    .into_iter()
                    .filter(|&direction| tile.allows(direction, rotation, border))
                    .collect(),
            );
            footprints.push(tile.rotated_footprint(rotation));
            weights.push(tile.weight());
        }

        let stacking = tileset
            .tiles()
            .filter(|(_, tile)| tile.same_rotation_when_stacked())
            .map(|(id, _)| id)
            .collect();
        let rotating = tileset
            .tiles()
            .filter(|(_, tile)| tile.allow_rotation())
            .map(|(id, _)| id)
            .collect();
        let has_multi_cell = footprints.iter().any(Footprint::is_multi_cell);

        Self {
            table,
            allowed,
            border_allowed,
            footprints,
            weights,
            stacking,
            rotating,
            has_multi_cell,
            empty: TileBitset::new(),
        }
    }

    /// Index table of every placeable possibility
    pub const fn table(&self) -> &PossibilityTable {
        &self.table
    }

    /// Number of possibilities
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no possibility exists
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Possibility at an index
    pub fn possibility(&self, index: usize) -> Option<Possibility> {
        self.table.get(index)
    }

    /// Entries possibility `index` accepts in `direction`, rotation already applied
    pub fn allowed(&self, index: usize, direction: Direction) -> &TileBitset {
        self.allowed
            .get(index)
            .and_then(|sets| sets.get(direction.index()))
            .unwrap_or(&self.empty)
    }

    /// Whether possibility `index` accepts the border in `direction`
    pub fn allows_border(&self, index: usize, direction: Direction) -> bool {
        self.border_allowed
            .get(index)
            .is_some_and(|directions| directions.contains(direction))
    }

    /// Rotated footprint of possibility `index`
    pub fn footprint(&self, index: usize) -> Footprint {
        self.footprints.get(index).copied().unwrap_or_default()
    }

    /// Whether possibility `index` covers more than one cell
    pub fn is_multi_cell(&self, index: usize) -> bool {
        self.footprint(index).is_multi_cell()
    }

    /// Selection weight of possibility `index`
    pub fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(0.0)
    }

    /// Whether rotation-bearing entries stacked on `tile` must copy its rotation
    pub fn locks_stacked_rotation(&self, tile: TileId) -> bool {
        self.stacking.contains(tile)
    }

    /// Whether `tile` appears in four rotations
    pub fn is_rotating(&self, tile: TileId) -> bool {
        self.rotating.contains(tile)
    }

    /// Whether any possibility covers more than one cell
    pub const fn has_multi_cell(&self) -> bool {
        self.has_multi_cell
    }

    /// Entries present among the possibilities of `set`
    pub fn tiles_in(&self, set: &PossibilitySet) -> TileBitset {
        self.table.tiles_in(set)
    }

    /// Every entry accepted in `direction` by at least one possibility of `set`
    pub fn union_allowed(&self, set: &PossibilitySet, direction: Direction) -> TileBitset {
        let mut union = TileBitset::new();
        for index in set.iter() {
            union.union_with(self.allowed(index, direction));
        }
        union
    }
}
