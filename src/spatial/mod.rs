//! Spatial data structures for the synthesis grid
//!
//! This module contains spatial-related functionality including:
//! - Directions and direction sets
//! - Grid coordinates, dimensions and the per-cell domain grid
//! - Footprint geometry for multi-cell entries

/// Axis-aligned directions between neighbouring cells
pub mod direction;
/// Footprint extents and boundary geometry
pub mod footprint;
/// Grid coordinates and the domain grid
pub mod grid;

pub use direction::{Direction, DirectionSet};
pub use footprint::Footprint;
pub use grid::{Cell, Dimensions, DomainGrid, GridPosition};
