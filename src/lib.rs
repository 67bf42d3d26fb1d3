//! Layered model synthesis: fills a 3D grid with catalog entries by arc-consistent
//! adjacency propagation
//!
//! Every cell starts with the full set of (entry, rotation) possibilities. Cells are
//! resolved in a fixed scan order by weighted random choice, and each choice is
//! propagated outward until the grid is locally consistent again. An empty domain is a
//! contradiction and aborts the solve; there is no backtracking.

#![forbid(unsafe_code)]

/// Propagation engine, weighted selection and the synthesis executor
pub mod algorithm;
/// Instrumentation and placement summaries
pub mod analysis;
/// Catalog entries, tilesets and (entry, rotation) possibilities
pub mod catalog;
/// Input/output operations, configuration and error handling
pub mod io;
/// Directions, grid coordinates, the domain grid and footprint geometry
pub mod spatial;

pub use algorithm::executor::{ModelSynthesis, SynthesisState};
pub use catalog::{Possibility, Rotation, Tile, TileId, Tileset, TilesetBuilder};
pub use io::error::{Result, SynthesisError};
pub use spatial::{Direction, Footprint, GridPosition};
