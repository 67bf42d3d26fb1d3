//! Catalog data model
//!
//! A catalog (tileset) is an ordered list of entries plus one border entry standing in
//! for the space outside the grid. Each entry declares, per direction, which entries
//! it accepts as neighbours. Declarations are one-sided; the engine checks both sides
//! independently.

/// Candidate (entry, rotation) pairs and their index table
pub mod possibility;
/// Catalog entries and their adjacency declarations
pub mod tile;
/// Tilesets, their builder and symmetry validation
pub mod tileset;

pub use possibility::{Possibility, PossibilityTable, Rotation};
pub use tile::{Tile, TileId};
pub use tileset::{AsymmetricDeclaration, Tileset, TilesetBuilder};
