//! Per-entry placement counts of a finished solve

use std::collections::BTreeMap;
use std::fmt;

use crate::algorithm::executor::ModelSynthesis;
use crate::catalog::TileId;

/// How often each visible entry was placed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    counts: BTreeMap<TileId, (String, usize)>,
    hidden: usize,
}

impl PlacementSummary {
    /// Count footprint roots in the engine's grid
    ///
    /// Entries flagged `dont_instantiate` are tallied separately as hidden.
    pub fn from_engine(engine: &ModelSynthesis) -> Self {
        let tileset = engine.tileset();
        let mut summary = Self::default();
        for (_, cell) in engine.cells().filter(|(_, cell)| cell.root) {
            let id = cell.possibility.tile;
            if tileset.tile(id).is_some_and(|tile| tile.dont_instantiate()) {
                summary.hidden += 1;
                continue;
            }
            summary
                .counts
                .entry(id)
                .or_insert_with(|| (tileset.name_of(id).to_string(), 0))
                .1 += 1;
        }
        summary
    }

    /// Placements of one entry
    pub fn count(&self, tile: TileId) -> usize {
        self.counts.get(&tile).map_or(0, |(_, count)| *count)
    }

    /// Visible placements in total
    pub fn total(&self) -> usize {
        self.counts.values().map(|(_, count)| count).sum()
    }

    /// Placements of entries that produce no visible output
    pub const fn hidden(&self) -> usize {
        self.hidden
    }

    /// `(name, count)` pairs in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts
            .values()
            .map(|(name, count)| (name.as_str(), *count))
    }
}

impl fmt::Display for PlacementSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} placements ({} hidden)", self.total(), self.hidden)?;
        for (name, count) in self.entries() {
            writeln!(f, "  {name:<12} {count:>6}")?;
        }
        Ok(())
    }
}
