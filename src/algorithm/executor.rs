use std::fmt;
use std::sync::Arc;

use log::{debug, info, trace, warn};

use crate::algorithm::observer::{NoopObserver, SynthesisObserver};
use crate::algorithm::propagation::{anchors, global_frontier, local_frontier, propagate};
use crate::algorithm::rules::AdjacencyRules;
use crate::algorithm::selection::RandomSelector;
use crate::algorithm::worklist::Worklist;
use crate::analysis::timing::{Instrumentation, Span};
use crate::catalog::{Possibility, Tileset};
use crate::io::error::{ErrorContext, Result, SynthesisError, WithContext, invalid_parameter};
use crate::spatial::{Cell, Dimensions, Direction, DomainGrid, GridPosition};

/// Lifecycle of a synthesis engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SynthesisState {
    /// Constructed; pre-placement is allowed
    Uninitialized,
    /// Running a propagation pass
    Propagating,
    /// Walking the grid in scan order
    Scanning,
    /// Every cell resolved
    Finished,
    /// A contradiction or selection failure ended the solve
    Failed,
}

impl fmt::Display for SynthesisState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Propagating => "propagating",
            Self::Scanning => "scanning",
            Self::Finished => "finished",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Final content of one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedCell {
    /// The placed possibility
    pub possibility: Possibility,
    /// Whether this cell anchors the footprint
    pub root: bool,
}

/// Layered model synthesis engine
///
/// Owns the domain grid, the compiled adjacency rules and the random source for one
/// solve. Construct it, optionally pre-place content with [`place_tile`], then call
/// [`synthesize`] once.
///
/// [`place_tile`]: ModelSynthesis::place_tile
/// [`synthesize`]: ModelSynthesis::synthesize
pub struct ModelSynthesis {
    tileset: Arc<Tileset>,
    rules: AdjacencyRules,
    grid: DomainGrid,
    worklist: Worklist,
    selector: RandomSelector,
    seed: u64,
    state: SynthesisState,
    propagated_cells: usize,
    instrumentation: Option<Box<dyn Instrumentation + Send>>,
}

impl fmt::Debug for ModelSynthesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSynthesis")
            .field("tileset", &self.tileset.to_string())
            .field("dimensions", &self.grid.dimensions())
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("propagated_cells", &self.propagated_cells)
            .finish_non_exhaustive()
    }
}

impl ModelSynthesis {
    /// Create an engine with every cell holding every possibility
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero or above
    /// [`MAX_GRID_DIMENSION`](crate::io::configuration::MAX_GRID_DIMENSION).
    pub fn new(
        tileset: impl Into<Arc<Tileset>>,
        width: usize,
        length: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self> {
        let tileset = tileset.into();
        let dimensions = Dimensions::new(width, length, height)?;

        for declaration in tileset.asymmetric_declarations() {
            warn!(
                "'{}' allows '{}' {} but is not allowed back",
                tileset.name_of(declaration.from),
                tileset.name_of(declaration.to),
                declaration.direction
            );
        }

        let rules = AdjacencyRules::new(&tileset);
        let grid = DomainGrid::new(dimensions, &rules.table().full());
        debug!(
            "Allocated {dimensions} grid with {} possibilities per cell",
            rules.len()
        );

        Ok(Self {
            tileset,
            rules,
            grid,
            worklist: Worklist::new(dimensions),
            selector: RandomSelector::new(seed),
            seed,
            state: SynthesisState::Uninitialized,
            propagated_cells: 0,
            instrumentation: None,
        })
    }

    /// Report phase timings to `instrumentation`
    #[must_use]
    pub fn with_instrumentation(
        mut self,
        instrumentation: Box<dyn Instrumentation + Send>,
    ) -> Self {
        self.instrumentation = Some(instrumentation);
        self
    }

    /// Force a cell, and the rest of the footprint it anchors, to `possibility`
    ///
    /// No propagation happens here; [`synthesize`](Self::synthesize) accounts for
    /// pre-placed cells in its global pass. Nothing is reported to observers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine has already started solving
    /// - The entry is not a placeable entry of this tileset
    /// - The entry does not rotate and the rotation is not zero
    /// - The cell or any footprint cell lies outside the grid
    /// - Any footprint cell is already placed
    pub fn place_tile(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        possibility: Possibility,
    ) -> Result<()> {
        if self.state != SynthesisState::Uninitialized {
            return Err(SynthesisError::InvalidState {
                operation: "place a tile",
                state: self.state,
            });
        }

        let dimensions = self.grid.dimensions();
        let position = GridPosition::new(x, y, z);
        if !dimensions.contains(position) {
            return Err(SynthesisError::OutOfBounds {
                position,
                dimensions,
            });
        }

        let Some(tile) = self.tileset.tile(possibility.tile) else {
            return Err(SynthesisError::InvalidTileIndex {
                index: possibility.tile.index(),
                max_tiles: self.tileset.id_count(),
            });
        };
        if possibility.tile == self.tileset.border() {
            return Err(invalid_parameter(
                "possibility",
                &possibility,
                &"the border entry never occupies a cell",
            ));
        }
        let Some(index) = self.rules.table().index_of(possibility) else {
            return Err(SynthesisError::UnsupportedRotation {
                tile: tile.name().to_string(),
                rotation: possibility.rotation,
            });
        };

        let Some(cells) = self.rules.footprint(index).cells(position, dimensions) else {
            return Err(SynthesisError::OutOfBounds {
                position,
                dimensions,
            });
        };
        if let Some(&occupied) = cells.iter().find(|&&cell| {
            self.grid.cell(cell).is_some_and(Cell::is_placed)
        }) {
            return Err(SynthesisError::CellOccupied { position: occupied });
        }

        trace!("Pre-placing {} at {position}", tile.name());
        self.collapse(position, index, &cells);
        Ok(())
    }

    /// Resolve every cell, discarding notifications
    ///
    /// # Errors
    ///
    /// See [`synthesize_with`](Self::synthesize_with).
    pub fn synthesize(&mut self) -> Result<()> {
        self.synthesize_with(&mut NoopObserver)
    }

    /// Resolve every cell, reporting each placement and the finish to `observer`
    ///
    /// Runs one propagation pass over every unplaced cell, then observes cells
    /// bottom layer first, rows along z, cells along x. Each observation is propagated
    /// before the placement is reported.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine has already run
    /// - Pre-placed cells contradict each other or the border
    /// - Propagation empties a cell's domain
    /// - Weighted selection finds no candidate able to anchor at a cell
    pub fn synthesize_with<O>(&mut self, observer: &mut O) -> Result<()>
    where
        O: SynthesisObserver + ?Sized,
    {
        if self.state != SynthesisState::Uninitialized {
            return Err(SynthesisError::InvalidState {
                operation: "synthesize",
                state: self.state,
            });
        }

        let result = self.run(observer);
        self.state = if result.is_ok() {
            SynthesisState::Finished
        } else {
            SynthesisState::Failed
        };
        result
    }

    fn run<O>(&mut self, observer: &mut O) -> Result<()>
    where
        O: SynthesisObserver + ?Sized,
    {
        self.state = SynthesisState::Propagating;
        self.check_placed_cells()?;

        global_frontier(&self.grid, &mut self.worklist);
        self.span_start(Span::GlobalPropagation);
        let settled = propagate(&mut self.grid, &self.rules, &mut self.worklist);
        self.span_stop(Span::GlobalPropagation);
        self.propagated_cells += settled?;

        self.state = SynthesisState::Scanning;
        let mut placements = 0_usize;
        for position in self.grid.dimensions().scan_order() {
            let Some(cell) = self.grid.cell(position) else {
                continue;
            };
            if cell.is_placed() {
                continue;
            }
            if cell.is_empty() {
                return Err(SynthesisError::Contradiction {
                    position,
                    origin: None,
                    attempted: None,
                });
            }

            self.span_start(Span::Observe);
            let observed = self.observe(position);
            self.span_stop(Span::Observe);
            let (index, possibility) = observed?;

            let Some(cells) = self
                .rules
                .footprint(index)
                .cells(position, self.grid.dimensions())
            else {
                return Err(SynthesisError::OutOfBounds {
                    position,
                    dimensions: self.grid.dimensions(),
                });
            };
            self.collapse(position, index, &cells);
            trace!(
                "Placed {} ({}) at {position}",
                self.tileset.name_of(possibility.tile),
                possibility.rotation
            );

            self.state = SynthesisState::Propagating;
            local_frontier(&self.grid, &cells, &mut self.worklist);
            self.span_start(Span::LocalPropagation);
            let settled = propagate(&mut self.grid, &self.rules, &mut self.worklist);
            self.span_stop(Span::LocalPropagation);
            let context = ErrorContext {
                origin: Some(position),
                attempted: Some(self.tileset.name_of(possibility.tile).to_string()),
            };
            self.propagated_cells += settled.with_context(context)?;
            self.state = SynthesisState::Scanning;

            observer.on_place_tile(position, possibility);
            placements += 1;
        }

        observer.on_finish();
        info!(
            "Synthesized {} grid with seed {}: {placements} placements, {} cells propagated",
            self.grid.dimensions(),
            self.seed,
            self.propagated_cells
        );
        Ok(())
    }

    /// Pick a root possibility at `position` by weight
    fn observe(&mut self, position: GridPosition) -> Result<(usize, Possibility)> {
        let Some(cell) = self.grid.cell(position) else {
            return Err(SynthesisError::OutOfBounds {
                position,
                dimensions: self.grid.dimensions(),
            });
        };
        let candidates: Vec<usize> = cell
            .roots()
            .iter()
            .filter(|&index| cell.contains(index))
            .filter(|&index| anchors(&self.grid, &self.rules, position, index))
            .collect();
        let weights: Vec<f64> = candidates
            .iter()
            .map(|&index| self.rules.weight(index))
            .collect();

        self.selector
            .weighted_choice(&weights)
            .and_then(|choice| candidates.get(choice).copied())
            .and_then(|index| Some((index, self.rules.possibility(index)?)))
            .ok_or_else(|| SynthesisError::SelectionFailure {
                position,
                candidates: cell.len(),
            })
    }

    /// Collapse footprint cells to one possibility, anchoring it at `origin`
    fn collapse(&mut self, origin: GridPosition, index: usize, cells: &[GridPosition]) {
        for &position in cells {
            if let Some(cell) = self.grid.cell_mut(position) {
                cell.collapse(index, position == origin);
            }
        }
    }

    /// Reject pre-placed neighbours that do not accept each other
    fn check_placed_cells(&self) -> Result<()> {
        let dimensions = self.grid.dimensions();
        for position in dimensions.scan_order() {
            let Some(index) = self.placed_index(position) else {
                continue;
            };
            for direction in Direction::ALL {
                let accepted = match dimensions.neighbour(position, direction) {
                    None => self.rules.allows_border(index, direction),
                    Some(neighbour) => self.placed_index(neighbour).is_none_or(|other| {
                        (index == other && self.same_footprint(position, neighbour, index))
                            || self.accepts(index, other, direction)
                    }),
                };
                if !accepted {
                    let possibility = self.rules.possibility(index);
                    return Err(SynthesisError::Contradiction {
                        position: dimensions.neighbour(position, direction).unwrap_or(position),
                        origin: Some(position),
                        attempted: possibility
                            .map(|possibility| self.tileset.name_of(possibility.tile).to_string()),
                    });
                }
            }
        }
        Ok(())
    }

    /// Whether placed possibilities `index` and `other` may touch, `other` lying in
    /// `direction`
    fn accepts(&self, index: usize, other: usize, direction: Direction) -> bool {
        let (Some(this), Some(that)) =
            (self.rules.possibility(index), self.rules.possibility(other))
        else {
            return false;
        };
        let stacked = direction == Direction::Below
            && self.rules.locks_stacked_rotation(that.tile)
            && self.rules.is_rotating(this.tile)
            && this.rotation != that.rotation;
        self.rules.allowed(index, direction).contains(that.tile)
            && self
                .rules
                .allowed(other, direction.opposite())
                .contains(this.tile)
            && !stacked
    }

    /// Whether two placed cells holding possibility `index` belong to one footprint
    fn same_footprint(&self, a: GridPosition, b: GridPosition, index: usize) -> bool {
        self.rules.is_multi_cell(index)
            && self
                .footprint_origin(a, index)
                .is_some_and(|origin| self.footprint_origin(b, index) == Some(origin))
    }

    /// Root cell of the placed footprint of `index` covering `position`
    ///
    /// Placed footprints never overlap, so at most one root qualifies.
    fn footprint_origin(&self, position: GridPosition, index: usize) -> Option<GridPosition> {
        self.rules
            .footprint(index)
            .offsets()
            .filter_map(|[i, j, k]| {
                Some(GridPosition::new(
                    position.x.checked_sub(i)?,
                    position.y.checked_sub(j)?,
                    position.z.checked_sub(k)?,
                ))
            })
            .find(|&origin| {
                self.grid
                    .cell(origin)
                    .is_some_and(|cell| cell.is_placed() && cell.is_root(index))
            })
    }

    fn placed_index(&self, position: GridPosition) -> Option<usize> {
        self.grid
            .cell(position)
            .filter(|cell| Cell::is_placed(cell))
            .and_then(Cell::single)
    }

    fn span_start(&mut self, span: Span) {
        if let Some(instrumentation) = self.instrumentation.as_mut() {
            instrumentation.start(span);
        }
    }

    fn span_stop(&mut self, span: Span) {
        if let Some(instrumentation) = self.instrumentation.as_mut() {
            instrumentation.stop(span);
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SynthesisState {
        self.state
    }

    /// Seed of the random source
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Grid extent
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// The tileset being placed
    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    /// Compiled adjacency rules
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    /// Current domain grid
    pub const fn grid(&self) -> &DomainGrid {
        &self.grid
    }

    /// Placed content of a cell, `None` while unresolved or outside the grid
    pub fn resolved(&self, position: GridPosition) -> Option<ResolvedCell> {
        let cell = self.grid.cell(position).filter(|cell| Cell::is_resolved(cell))?;
        let index = cell.single()?;
        Some(ResolvedCell {
            possibility: self.rules.possibility(index)?,
            root: cell.is_root(index),
        })
    }

    /// Every resolved cell in scan order
    pub fn cells(&self) -> impl Iterator<Item = (GridPosition, ResolvedCell)> + '_ {
        self.grid
            .dimensions()
            .scan_order()
            .filter_map(|position| self.resolved(position).map(|cell| (position, cell)))
    }

    /// Whether every cell is resolved
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Worklist pops performed so far, across all propagation passes
    pub const fn propagated_cells(&self) -> usize {
        self.propagated_cells
    }
}
