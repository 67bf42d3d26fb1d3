//! Meandering walkways for pre-placement
//!
//! A walk starts on the west edge halfway along z and steps east, north or south at
//! random, never revisiting a cell, until it reaches the east edge.

use std::collections::HashSet;

use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::MAX_PATH_STEPS;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{Direction, GridPosition};

/// Cells of a random walk across a `width` by `length` layer at height `y`
///
/// Cells are returned in walk order. The first lies at `x = 0`; the walk ends once it
/// reaches `x = width - 1` or after a fixed number of steps.
///
/// # Errors
///
/// Returns an error if `width` or `length` is zero.
pub fn generate_path(
    width: usize,
    length: usize,
    y: usize,
    seed: u64,
) -> Result<Vec<GridPosition>> {
    if width == 0 {
        return Err(invalid_parameter("width", &width, &"a path needs at least one column"));
    }
    if length == 0 {
        return Err(invalid_parameter("length", &length, &"a path needs at least one row"));
    }

    let steps = [Direction::North, Direction::South, Direction::East];
    let mut selector = RandomSelector::new(seed);
    let mut current = GridPosition::new(0, y, length / 2);
    let mut visited = HashSet::from([current]);
    let mut cells = vec![current];

    for _ in 0..MAX_PATH_STEPS {
        if current.x + 1 >= width {
            break;
        }
        let Some(direction) = selector
            .uniform_index(steps.len())
            .and_then(|choice| steps.get(choice).copied())
        else {
            break;
        };
        let Some(next) = current
            .offset(direction.offset())
            .filter(|next| next.z < length && !visited.contains(next))
        else {
            continue;
        };
        visited.insert(next);
        cells.push(next);
        current = next;
    }
    Ok(cells)
}
