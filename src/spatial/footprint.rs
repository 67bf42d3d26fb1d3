//! Footprint geometry for multi-cell entries
//!
//! A footprint always extends from its root cell towards +x, +y and +z. Rotation only
//! swaps the horizontal extents.

use std::fmt;

use crate::catalog::possibility::Rotation;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::grid::{Dimensions, GridPosition};

/// Integer extent of an entry in cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Footprint {
    /// Extent along x
    pub x: usize,
    /// Extent along y
    pub y: usize,
    /// Extent along z
    pub z: usize,
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

impl Footprint {
    /// The single-cell footprint
    pub const UNIT: Self = Self { x: 1, y: 1, z: 1 };

    /// Create a footprint
    ///
    /// # Errors
    ///
    /// Returns an error if any extent is zero.
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self> {
        for (axis, value) in [("footprint.x", x), ("footprint.y", y), ("footprint.z", z)] {
            if value == 0 {
                return Err(invalid_parameter(
                    axis,
                    &value,
                    &"footprint extents must be at least 1",
                ));
            }
        }
        Ok(Self { x, y, z })
    }

    /// Anything larger than one cell
    pub fn is_multi_cell(&self) -> bool {
        *self != Self::UNIT
    }

    /// Extent after turning the entry; quarter turns swap x and z
    pub const fn rotated(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Zero | Rotation::OneEighty => self,
            Rotation::Ninety | Rotation::TwoSeventy => Self {
                x: self.z,
                y: self.y,
                z: self.x,
            },
        }
    }

    /// Number of cells covered
    pub const fn volume(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Offsets of every covered cell relative to the root, root first
    pub fn offsets(self) -> impl Iterator<Item = [usize; 3]> {
        (0..self.x).flat_map(move |i| {
            (0..self.y).flat_map(move |j| (0..self.z).map(move |k| [i, j, k]))
        })
    }

    /// Covered cells for a footprint rooted at `origin`, or `None` if any leaves the grid
    pub fn cells(self, origin: GridPosition, dimensions: Dimensions) -> Option<Vec<GridPosition>> {
        self.offsets()
            .map(|[i, j, k]| {
                let cell = GridPosition::new(origin.x + i, origin.y + j, origin.z + k);
                dimensions.contains(cell).then_some(cell)
            })
            .collect()
    }

    /// Cells just outside the face of the footprint that points in `direction`
    ///
    /// Neighbours outside the grid are reported as `None` so callers can consult the
    /// border entry for them.
    pub fn boundary(
        self,
        origin: GridPosition,
        direction: Direction,
        dimensions: Dimensions,
    ) -> Vec<Option<GridPosition>> {
        let start = [origin.x as isize, origin.y as isize, origin.z as isize];
        let extent = [self.x as isize, self.y as isize, self.z as isize];
        let (axis, forward) = match direction {
            Direction::East => (0, true),
            Direction::West => (0, false),
            Direction::Above => (1, true),
            Direction::Below => (1, false),
            Direction::North => (2, true),
            Direction::South => (2, false),
        };
        let fixed = if forward {
            start.get(axis).copied().unwrap_or(0) + extent.get(axis).copied().unwrap_or(1)
        } else {
            start.get(axis).copied().unwrap_or(0) - 1
        };

        // Collapse the loop along the face normal to a single layer
        let mut span = extent;
        if let Some(slot) = span.get_mut(axis) {
            *slot = 1;
        }
        let mut neighbours = Vec::new();
        for i in 0..span[0] {
            for j in 0..span[1] {
                for k in 0..span[2] {
                    let mut coordinates = [start[0] + i, start[1] + j, start[2] + k];
                    if let Some(slot) = coordinates.get_mut(axis) {
                        *slot = fixed;
                    }
                    neighbours.push(to_position(coordinates, dimensions));
                }
            }
        }
        neighbours
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

fn to_position(coordinates: [isize; 3], dimensions: Dimensions) -> Option<GridPosition> {
    let [x, y, z] = coordinates;
    let position = GridPosition::new(
        usize::try_from(x).ok()?,
        usize::try_from(y).ok()?,
        usize::try_from(z).ok()?,
    );
    dimensions.contains(position).then_some(position)
}
