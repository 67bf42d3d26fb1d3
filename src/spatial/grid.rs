//! Domain grid: the per-cell sets of possibilities not yet excluded
//!
//! The grid is a dense `[x, y, z]` array allocated once per engine. Cells only ever
//! lose candidates, either through propagation or by collapsing to a single placed
//! possibility. Root flags live beside the candidates as a second bitset, so the flags
//! of one cell can never leak into another.

use ndarray::Array3;
use std::fmt;

use crate::algorithm::bitset::PossibilitySet;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::direction::Direction;

/// Integer cell coordinates inside the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    /// Width axis (east)
    pub x: usize,
    /// Height axis (up)
    pub y: usize,
    /// Length axis (north)
    pub z: usize,
}

impl GridPosition {
    /// Create a position from its coordinates
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Shift by a signed offset, or `None` if any coordinate would become negative
    pub const fn offset(self, delta: [isize; 3]) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(delta[0]) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(delta[1]) else {
            return None;
        };
        let Some(z) = self.z.checked_add_signed(delta[2]) else {
            return None;
        };
        Some(Self { x, y, z })
    }

    /// Coordinates as an ndarray index
    pub const fn as_index(self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Grid extent along each axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// Cells along x
    pub width: usize,
    /// Cells along y
    pub height: usize,
    /// Cells along z
    pub length: usize,
}

impl Dimensions {
    /// Validate grid dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if any axis is zero or exceeds
    /// [`MAX_GRID_DIMENSION`](crate::io::configuration::MAX_GRID_DIMENSION).
    pub fn new(width: usize, length: usize, height: usize) -> Result<Self> {
        for (parameter, value) in [("width", width), ("length", length), ("height", height)] {
            if value == 0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"grid dimensions must be greater than 0",
                ));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("grid dimensions are limited to {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self {
            width,
            height,
            length,
        })
    }

    /// Check whether a position lies inside the grid
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.x < self.width && position.y < self.height && position.z < self.length
    }

    /// Face neighbour in `direction`, or `None` when it falls outside the grid
    pub fn neighbour(&self, position: GridPosition, direction: Direction) -> Option<GridPosition> {
        position
            .offset(direction.offset())
            .filter(|&neighbour| self.contains(neighbour))
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width * self.height * self.length
    }

    /// Shape for ndarray allocation
    pub const fn shape(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.length)
    }

    /// Resolution order: layer by layer from the bottom, rows along z, cells along x
    pub fn scan_order(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let Self {
            width,
            height,
            length,
        } = *self;
        (0..height).flat_map(move |y| {
            (0..length).flat_map(move |z| (0..width).map(move |x| GridPosition::new(x, y, z)))
        })
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.length)
    }
}

/// Domain of a single cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    candidates: PossibilitySet,
    roots: PossibilitySet,
    placed: bool,
}

impl Cell {
    /// A cell where every candidate is still possible and anchors its own footprint
    pub fn unconstrained(candidates: PossibilitySet) -> Self {
        Self {
            roots: candidates.clone(),
            candidates,
            placed: false,
        }
    }

    /// Possibility indices still in the domain
    pub const fn candidates(&self) -> &PossibilitySet {
        &self.candidates
    }

    /// Possibility indices that may anchor a footprint at this cell
    pub const fn roots(&self) -> &PossibilitySet {
        &self.roots
    }

    /// Number of candidates left
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// An empty domain is a contradiction
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the cell was collapsed by placement
    pub const fn is_placed(&self) -> bool {
        self.placed
    }

    /// Collapsed to a single placed possibility
    pub fn is_resolved(&self) -> bool {
        self.placed && self.candidates.len() == 1
    }

    /// Test candidate membership
    pub fn contains(&self, possibility: usize) -> bool {
        self.candidates.contains(possibility)
    }

    /// Test whether a candidate is flagged as a footprint anchor
    pub fn is_root(&self, possibility: usize) -> bool {
        self.roots.contains(possibility)
    }

    /// The single remaining candidate, if the domain has exactly one
    pub fn single(&self) -> Option<usize> {
        if self.candidates.len() == 1 {
            self.candidates.first()
        } else {
            None
        }
    }

    /// Keep only candidates also present in `keep`
    pub fn restrict(&mut self, keep: &PossibilitySet) {
        self.candidates.intersect_with(keep);
        self.roots.intersect_with(keep);
    }

    /// Drop a candidate entirely
    pub fn remove(&mut self, possibility: usize) {
        self.candidates.remove(possibility);
        self.roots.remove(possibility);
    }

    /// Stop treating a candidate as a footprint anchor
    pub fn demote(&mut self, possibility: usize) {
        self.roots.remove(possibility);
    }

    /// Collapse to one placed possibility
    pub fn collapse(&mut self, possibility: usize, root: bool) {
        self.candidates.clear();
        self.candidates.insert(possibility);
        self.roots.clear();
        if root {
            self.roots.insert(possibility);
        }
        self.placed = true;
    }
}

/// Dense 3D array of cell domains
#[derive(Clone, Debug)]
pub struct DomainGrid {
    cells: Array3<Cell>,
    dimensions: Dimensions,
}

impl DomainGrid {
    /// Allocate a grid where every cell holds `full`
    pub fn new(dimensions: Dimensions, full: &PossibilitySet) -> Self {
        Self {
            cells: Array3::from_elem(dimensions.shape(), Cell::unconstrained(full.clone())),
            dimensions,
        }
    }

    /// Grid extent
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Cell at a position
    pub fn cell(&self, position: GridPosition) -> Option<&Cell> {
        self.cells.get(position.as_index())
    }

    /// Mutable cell at a position
    pub fn cell_mut(&mut self, position: GridPosition) -> Option<&mut Cell> {
        self.cells.get_mut(position.as_index())
    }

    /// Domain size at a position, zero outside the grid
    pub fn domain_len(&self, position: GridPosition) -> usize {
        self.cell(position).map_or(0, Cell::len)
    }

    /// Whether the cell at `position` is collapsed and placed
    pub fn is_resolved(&self, position: GridPosition) -> bool {
        self.cell(position).is_some_and(Cell::is_resolved)
    }

    /// Whether every cell is resolved
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }

    /// Iterate all cells with their positions in `[x, y, z]` memory order
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y, z), cell)| (GridPosition::new(x, y, z), cell))
    }
}
