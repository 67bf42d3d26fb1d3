//! Bitsets over catalog entries and over possibility indices

use bitvec::prelude::*;
use std::fmt;

use crate::catalog::tile::TileId;

/// Growable bitset of catalog entries, used for per-direction adjacency sets
///
/// Indices are the raw [`TileId`] values. The set grows on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a set with no entries present
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set sized for `max_tiles` entries
    pub fn with_capacity(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
        }
    }

    /// Insert an entry, growing the set if needed
    pub fn insert(&mut self, tile: TileId) {
        let index = tile.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        self.bits.set(index, true);
    }

    /// Remove an entry
    pub fn remove(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), false);
        }
    }

    /// Test entry membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Add every entry of `other`
    pub fn union_with(&mut self, other: &Self) {
        if other.bits.len() > self.bits.len() {
            self.bits.resize(other.bits.len(), false);
        }
        for index in other.bits.iter_ones() {
            self.bits.set(index, true);
        }
    }

    /// Test whether the two sets share an entry
    pub fn intersects(&self, other: &Self) -> bool {
        self.bits.iter_ones().any(|index| other.bits.get(index).as_deref() == Some(&true))
    }

    /// Test if no entries are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count entries in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId::new)
    }

    /// Extract all entries as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }
}

impl FromIterator<TileId> for TileBitset {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        let mut set = Self::new();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}

/// Fixed-size bitset over the indices of a possibility table
///
/// One of these is a cell domain. All sets built from the same table share a length,
/// so set operations run word by word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossibilitySet {
    bits: BitVec,
}

impl PossibilitySet {
    /// Create a set with no possibilities present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a set containing every possibility
    pub fn full(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Number of possibilities the set can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a possibility index; indices beyond the capacity are ignored
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Remove a possibility index
    pub fn remove(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Remove every possibility
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Number of possibilities present
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no possibilities are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Lowest index present
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Keep only possibilities also present in `other`
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every possibility of `other`
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Test whether the two sets share a possibility
    pub fn intersects(&self, other: &Self) -> bool {
        self.bits.iter_ones().any(|index| other.contains(index))
    }

    /// Keep only possibilities for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        let dropped: Vec<usize> = self.bits.iter_ones().filter(|&index| !keep(index)).collect();
        for index in dropped {
            self.bits.set(index, false);
        }
    }

    /// Iterate indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PossibilitySet({} of {}: {:?})",
            self.len(),
            self.capacity(),
            self.iter().collect::<Vec<_>>()
        )
    }
}
