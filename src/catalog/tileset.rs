//! Tilesets and their builder
//!
//! The builder records adjacency declarations by id and validates the whole catalog in
//! one pass at `build`. Mutual declarations are offered as a data-entry convenience
//! only; the resulting tileset keeps one-sided declarations as they are.

use std::collections::BTreeSet;
use std::fmt;

use crate::catalog::possibility::{Possibility, PossibilityTable};
use crate::catalog::tile::{Tile, TileId};
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::spatial::Direction;

/// An entry allows a neighbour that does not allow it back
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AsymmetricDeclaration {
    /// Entry making the declaration
    pub from: TileId,
    /// Direction of the declaration, seen from `from`
    pub direction: Direction,
    /// Entry declared as allowed
    pub to: TileId,
}

/// Ordered catalog of entries plus the border entry
#[derive(Clone, Debug)]
pub struct Tileset {
    tiles: Vec<Tile>,
    border: TileId,
}

impl Tileset {
    /// Entry by id, including the border
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// The entry standing for the space outside the grid
    pub const fn border(&self) -> TileId {
        self.border
    }

    /// Placeable entries in catalog order, border excluded
    pub fn tiles(&self) -> impl Iterator<Item = (TileId, &Tile)> + '_ {
        let border = self.border;
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId::new(index), tile))
            .filter(move |&(id, _)| id != border)
    }

    /// Number of placeable entries
    pub fn len(&self) -> usize {
        self.tiles.len().saturating_sub(1)
    }

    /// Whether the tileset has no placeable entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ids in use, border included
    pub fn id_count(&self) -> usize {
        self.tiles.len()
    }

    /// Look an entry up by name
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.tiles
            .iter()
            .position(|tile| tile.name() == name)
            .map(TileId::new)
    }

    /// Display name of an entry, `"?"` for unknown ids
    pub fn name_of(&self, id: TileId) -> &str {
        self.tile(id).map_or("?", Tile::name)
    }

    /// Every valid (entry, rotation) pair for the given entries
    ///
    /// Rotating entries yield four pairs, the rest one. Unknown ids are skipped. Each
    /// call returns fresh values; nothing is shared with any grid cell.
    pub fn possibilities_from_tiles(
        &self,
        tiles: impl IntoIterator<Item = TileId>,
    ) -> BTreeSet<Possibility> {
        tiles
            .into_iter()
            .filter_map(|id| self.tile(id).map(|tile| (id, tile)))
            .flat_map(|(id, tile)| {
                tile.rotations()
                    .iter()
                    .map(move |&rotation| Possibility::new(id, rotation))
            })
            .collect()
    }

    /// Expansion of every placeable entry, indexed densely
    pub fn possibility_table(&self) -> PossibilityTable {
        PossibilityTable::new(self.tiles())
    }

    /// Declarations not mirrored by the neighbour
    ///
    /// `(a, d, b)` is reported when `a` allows `b` in `d` but `b` does not allow `a`
    /// in the opposite direction. Declarations naming the border are not reported.
    pub fn asymmetric_declarations(&self) -> Vec<AsymmetricDeclaration> {
        let mut found = Vec::new();
        for (from, tile) in self.tiles() {
            for direction in Direction::ALL {
                for to in tile.declared(direction).iter() {
                    if to == self.border {
                        continue;
                    }
                    let mirrored = self
                        .tile(to)
                        .is_some_and(|other| other.declared(direction.opposite()).contains(from));
                    if !mirrored {
                        found.push(AsymmetricDeclaration {
                            from,
                            direction,
                            to,
                        });
                    }
                }
            }
        }
        found
    }
}

impl fmt::Display for Tileset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.tiles().map(|(_, tile)| tile.name()).collect();
        write!(
            f,
            "Tileset[{}] (border: {})",
            names.join(", "),
            self.name_of(self.border)
        )
    }
}

/// Incremental construction of a [`Tileset`]
#[derive(Clone, Debug, Default)]
pub struct TilesetBuilder {
    tiles: Vec<Tile>,
    border: Option<TileId>,
    declarations: Vec<(TileId, Direction, TileId)>,
}

impl TilesetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placeable entry and return its id
    pub fn add_tile(&mut self, tile: Tile) -> TileId {
        self.tiles.push(tile);
        TileId::new(self.tiles.len() - 1)
    }

    /// Set the border entry, replacing any earlier one in place
    pub fn set_border(&mut self, tile: Tile) -> TileId {
        if let Some(id) = self.border {
            if let Some(slot) = self.tiles.get_mut(id.index()) {
                *slot = tile;
                return id;
            }
        }
        let id = self.add_tile(tile);
        self.border = Some(id);
        id
    }

    /// Declare that `from` accepts `to` as its neighbour in `direction`
    ///
    /// Only `from` is changed; `to` must declare the reverse itself.
    pub fn allow(&mut self, from: TileId, direction: Direction, to: TileId) -> &mut Self {
        self.declarations.push((from, direction, to));
        self
    }

    /// Declare `from` accepts each of `to` in `direction`
    pub fn allow_all(&mut self, from: TileId, direction: Direction, to: &[TileId]) -> &mut Self {
        for &other in to {
            self.allow(from, direction, other);
        }
        self
    }

    /// Declare both sides at once: `a` accepts `b` in `direction` and `b` accepts `a`
    /// in the opposite direction
    pub fn allow_mutual(&mut self, a: TileId, direction: Direction, b: TileId) -> &mut Self {
        self.allow(a, direction, b);
        self.allow(b, direction.opposite(), a)
    }

    /// Validate and freeze the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No border entry was set, or there is no placeable entry
    /// - A declaration names an unknown entry
    /// - A placeable entry has a non-positive or non-finite weight
    /// - A footprint extent is zero
    /// - An entry allows both quarter-turn and free rotation
    pub fn build(self) -> Result<Tileset> {
        let Some(border) = self.border else {
            return Err(SynthesisError::InvalidTileset {
                reason: "no border entry was set".to_string(),
            });
        };
        let mut tiles = self.tiles;
        if tiles.len() < 2 {
            return Err(SynthesisError::InvalidTileset {
                reason: "a tileset needs at least one placeable entry".to_string(),
            });
        }

        for (index, tile) in tiles.iter().enumerate() {
            if index == border.index() {
                continue;
            }
            validate_tile(tile)?;
        }

        let count = tiles.len();
        for (from, direction, to) in self.declarations {
            if to.index() >= count {
                return Err(SynthesisError::InvalidTileIndex {
                    index: to.index(),
                    max_tiles: count,
                });
            }
            let Some(tile) = tiles.get_mut(from.index()) else {
                return Err(SynthesisError::InvalidTileIndex {
                    index: from.index(),
                    max_tiles: count,
                });
            };
            tile.declare(direction, to);
        }

        Ok(Tileset { tiles, border })
    }
}

fn validate_tile(tile: &Tile) -> Result<()> {
    let weight = tile.weight();
    if !weight.is_finite() || weight <= 0.0 {
        return Err(invalid_parameter(
            "weight",
            &weight,
            &format!("entry '{}' needs a positive, finite weight", tile.name()),
        ));
    }
    let footprint = tile.footprint();
    if footprint.volume() == 0 {
        return Err(invalid_parameter(
            "footprint",
            &footprint,
            &format!("entry '{}' has an empty footprint", tile.name()),
        ));
    }
    if tile.allow_rotation() && tile.allow_free_rotation() {
        return Err(invalid_parameter(
            "allow_free_rotation",
            &true,
            &format!(
                "entry '{}' cannot combine quarter-turn and free rotation",
                tile.name()
            ),
        ));
    }
    Ok(())
}
