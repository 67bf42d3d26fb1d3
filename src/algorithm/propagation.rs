use log::debug;

use crate::algorithm::bitset::PossibilitySet;
use crate::algorithm::rules::AdjacencyRules;
use crate::algorithm::worklist::Worklist;
use crate::catalog::Rotation;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::{Cell, Direction, DirectionSet, DomainGrid, GridPosition};

/// Queue every unplaced cell for a check against all six neighbours
///
/// Cells are pushed in reverse scan order so they pop bottom layer first.
pub fn global_frontier(grid: &DomainGrid, worklist: &mut Worklist) {
    let order: Vec<GridPosition> = grid.dimensions().scan_order().collect();
    for position in order.into_iter().rev() {
        if grid.cell(position).is_some_and(|cell| !cell.is_placed()) {
            worklist.push(position, DirectionSet::ALL);
        }
    }
}

/// Queue the unplaced neighbours of freshly placed cells
///
/// Each neighbour is only re-checked in the directions facing the placed cells.
pub fn local_frontier(grid: &DomainGrid, placed: &[GridPosition], worklist: &mut Worklist) {
    let dimensions = grid.dimensions();
    for &position in placed {
        for direction in Direction::ALL {
            let Some(neighbour) = dimensions.neighbour(position, direction) else {
                continue;
            };
            if grid.cell(neighbour).is_some_and(|cell| !cell.is_placed()) {
                worklist.push(neighbour, DirectionSet::single(direction.opposite()));
            }
        }
    }
}

/// Narrow domains until every queued cell is consistent with its neighbours
///
/// Returns the number of cells popped from the worklist.
///
/// # Errors
///
/// Returns [`SynthesisError::Contradiction`] as soon as a domain becomes empty. The
/// error names the emptied cell only; callers attach the placement that started the
/// cascade.
pub fn propagate(
    grid: &mut DomainGrid,
    rules: &AdjacencyRules,
    worklist: &mut Worklist,
) -> Result<usize> {
    let dimensions = grid.dimensions();
    let mut popped = 0;

    while let Some((position, directions)) = worklist.pop() {
        popped += 1;
        let Some(cell) = grid.cell(position) else {
            continue;
        };
        if cell.is_placed() {
            continue;
        }
        let before = cell.len();

        let keep = constrain_by_neighbours(grid, rules, position, directions);
        if let Some(cell) = grid.cell_mut(position) {
            cell.restrict(&keep);
        }
        if rules.has_multi_cell() {
            maintain_footprints(grid, rules, position, worklist);
        }

        let after = grid.domain_len(position);
        if after == 0 {
            worklist.clear();
            return Err(SynthesisError::Contradiction {
                position,
                origin: None,
                attempted: None,
            });
        }
        if after < before {
            for direction in Direction::ALL {
                let Some(neighbour) = dimensions.neighbour(position, direction) else {
                    continue;
                };
                if grid.cell(neighbour).is_some_and(|cell| !cell.is_placed()) {
                    worklist.push(neighbour, DirectionSet::single(direction.opposite()));
                }
            }
        }
    }

    debug!("Propagation settled after {popped} cells");
    Ok(popped)
}

/// Candidates of the cell at `position` that survive the checks in `directions`
///
/// A candidate survives a direction when it accepts something the neighbour can still
/// hold and the neighbour can still hold something that accepts it back. Outside the
/// grid the border entry stands in for the neighbour.
fn constrain_by_neighbours(
    grid: &DomainGrid,
    rules: &AdjacencyRules,
    position: GridPosition,
    directions: DirectionSet,
) -> PossibilitySet {
    let dimensions = grid.dimensions();
    let Some(cell) = grid.cell(position) else {
        return PossibilitySet::new(rules.len());
    };
    let mut keep = cell.candidates().clone();

    for direction in directions.iter() {
        let Some(neighbour) = dimensions
            .neighbour(position, direction)
            .and_then(|neighbour| grid.cell(neighbour))
        else {
            keep.retain(|index| rules.allows_border(index, direction));
            continue;
        };

        let present = rules.tiles_in(neighbour.candidates());
        let allowed_back = rules.union_allowed(neighbour.candidates(), direction.opposite());
        let locked_rotation = stacked_rotation(rules, neighbour, direction);

        keep.retain(|index| {
            let Some(possibility) = rules.possibility(index) else {
                return false;
            };
            // Footprint cells shared with an unplaced neighbour are judged by footprint
            // maintenance instead
            let carried = !neighbour.is_placed()
                && rules.is_multi_cell(index)
                && neighbour.contains(index);
            let adjacent = carried
                || (rules.allowed(index, direction).intersects(&present)
                    && allowed_back.contains(possibility.tile));
            adjacent
                && locked_rotation.is_none_or(|rotation| {
                    !rules.is_rotating(possibility.tile) || possibility.rotation == rotation
                })
        });
    }
    keep
}

/// Rotation imposed by a placed stacking entry directly below
fn stacked_rotation(
    rules: &AdjacencyRules,
    neighbour: &Cell,
    direction: Direction,
) -> Option<Rotation> {
    if direction != Direction::Below || !neighbour.is_placed() {
        return None;
    }
    neighbour
        .single()
        .and_then(|index| rules.possibility(index))
        .filter(|below| rules.locks_stacked_rotation(below.tile))
        .map(|below| below.rotation)
}

/// Re-validate anchor flags and prune orphaned footprint cells
///
/// A multi-cell candidate stays an anchor only while its whole footprint fits and its
/// boundary accepts it. A candidate that is not an anchor survives only while some cell
/// behind it still anchors the same possibility over this one.
fn maintain_footprints(
    grid: &mut DomainGrid,
    rules: &AdjacencyRules,
    position: GridPosition,
    worklist: &mut Worklist,
) {
    let dimensions = grid.dimensions();
    let Some(cell) = grid.cell(position) else {
        return;
    };
    let multi: Vec<usize> = cell
        .candidates()
        .iter()
        .filter(|&index| rules.is_multi_cell(index))
        .collect();
    if multi.is_empty() {
        return;
    }

    let demoted: Vec<usize> = multi
        .iter()
        .copied()
        .filter(|&index| cell.is_root(index))
        .filter(|&index| !anchors(grid, rules, position, index))
        .collect();
    for &index in &demoted {
        if let Some(cell) = grid.cell_mut(position) {
            cell.demote(index);
        }
        // Cells that leaned on this anchor must look for another
        let covered = rules
            .footprint(index)
            .offsets()
            .filter(|&offset| offset != [0, 0, 0])
            .map(|[i, j, k]| GridPosition::new(position.x + i, position.y + j, position.z + k))
            .filter(|&covered| dimensions.contains(covered));
        for covered in covered {
            if grid.cell(covered).is_some_and(|cell| !cell.is_placed()) {
                worklist.push(covered, DirectionSet::ALL);
            }
        }
    }

    let orphaned: Vec<usize> = multi
        .into_iter()
        .filter(|&index| grid.cell(position).is_some_and(|cell| !cell.is_root(index)))
        .filter(|&index| !has_anchor_behind(grid, rules, position, index))
        .collect();
    if let Some(cell) = grid.cell_mut(position) {
        for index in orphaned {
            cell.remove(index);
        }
    }
}

/// Whether some other cell anchors possibility `index` with a footprint covering
/// `position`
fn has_anchor_behind(
    grid: &DomainGrid,
    rules: &AdjacencyRules,
    position: GridPosition,
    index: usize,
) -> bool {
    rules
        .footprint(index)
        .offsets()
        .filter(|&offset| offset != [0, 0, 0])
        .filter_map(|[i, j, k]| {
            Some(GridPosition::new(
                position.x.checked_sub(i)?,
                position.y.checked_sub(j)?,
                position.z.checked_sub(k)?,
            ))
        })
        .any(|anchor| grid.cell(anchor).is_some_and(|cell| cell.is_root(index)))
}

/// Whether possibility `index` can anchor a footprint at `origin`
///
/// Combines the fit check and the placement check.
pub fn anchors(
    grid: &DomainGrid,
    rules: &AdjacencyRules,
    origin: GridPosition,
    index: usize,
) -> bool {
    fits_footprint(grid, rules, origin, index) && can_be_placed(grid, rules, origin, index)
}

/// Every footprint cell is in the grid, still holds the possibility and is not placed
pub fn fits_footprint(
    grid: &DomainGrid,
    rules: &AdjacencyRules,
    origin: GridPosition,
    index: usize,
) -> bool {
    let Some(cells) = rules.footprint(index).cells(origin, grid.dimensions()) else {
        return false;
    };
    cells.into_iter().all(|covered| {
        grid.cell(covered)
            .is_some_and(|cell| cell.contains(index) && !cell.is_placed())
    })
}

/// Every cell just outside the footprint accepts the possibility and is accepted back
pub fn can_be_placed(
    grid: &DomainGrid,
    rules: &AdjacencyRules,
    origin: GridPosition,
    index: usize,
) -> bool {
    let Some(possibility) = rules.possibility(index) else {
        return false;
    };
    let footprint = rules.footprint(index);
    let dimensions = grid.dimensions();

    Direction::ALL.into_iter().all(|direction| {
        let allowed = rules.allowed(index, direction);
        footprint
            .boundary(origin, direction, dimensions)
            .into_iter()
            .all(|neighbour| match neighbour.and_then(|n| grid.cell(n)) {
                None => rules.allows_border(index, direction),
                Some(cell) => {
                    allowed.intersects(&rules.tiles_in(cell.candidates()))
                        && rules
                            .union_allowed(cell.candidates(), direction.opposite())
                            .contains(possibility.tile)
                        && stacked_rotation(rules, cell, direction).is_none_or(|rotation| {
                            !rules.is_rotating(possibility.tile)
                                || possibility.rotation == rotation
                        })
                }
            })
    })
}
