//! The six axis-aligned directions between neighbouring cells
//!
//! Axes follow the grid convention: x grows east, y grows upward and z grows north.
//! Cardinal directions are numbered clockwise from north so that turning a tile by a
//! quarter is an index shift modulo four.

use std::fmt;

/// Direction from a cell towards one of its six face neighbours
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards +z
    North,
    /// Towards +x
    East,
    /// Towards -z
    South,
    /// Towards -x
    West,
    /// Towards +y
    Above,
    /// Towards -y
    Below,
}

impl Direction {
    /// Every direction in the order neighbours are relaxed
    pub const ALL: [Self; 6] = [
        Self::Above,
        Self::Below,
        Self::North,
        Self::East,
        Self::South,
        Self::West,
    ];

    /// The four horizontal directions, clockwise from north
    pub const CARDINAL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Stable index: cardinals 0..4 clockwise from north, then above and below
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
            Self::Above => 4,
            Self::Below => 5,
        }
    }

    /// Inverse of [`Direction::index`]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::South),
            3 => Some(Self::West),
            4 => Some(Self::Above),
            5 => Some(Self::Below),
            _ => None,
        }
    }

    /// Unit step `[dx, dy, dz]` towards the neighbour
    pub const fn offset(self) -> [isize; 3] {
        match self {
            Self::North => [0, 0, 1],
            Self::East => [1, 0, 0],
            Self::South => [0, 0, -1],
            Self::West => [-1, 0, 0],
            Self::Above => [0, 1, 0],
            Self::Below => [0, -1, 0],
        }
    }

    /// The direction pointing back from the neighbour
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::Above => Self::Below,
            Self::Below => Self::Above,
        }
    }

    /// Above and below are unaffected by tile rotation
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Above | Self::Below)
    }

    /// Turn a horizontal direction clockwise by `quarter_turns`
    ///
    /// Vertical directions are returned unchanged.
    pub const fn rotated(self, quarter_turns: usize) -> Self {
        if self.is_vertical() {
            return self;
        }
        match (self.index() + quarter_turns) % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
            Self::Above => "above",
            Self::Below => "below",
        };
        f.write_str(name)
    }
}

/// Compact set of directions, used to remember where a change arrived from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// No directions
    pub const EMPTY: Self = Self(0);
    /// All six directions
    pub const ALL: Self = Self(0b11_1111);

    /// Set holding exactly one direction
    pub const fn single(direction: Direction) -> Self {
        Self(direction.bit())
    }

    /// Add a direction
    pub const fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    /// Merge another set into this one
    pub const fn union_with(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Test membership
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Test if no direction is present
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of directions present
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in [`Direction::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.contains(direction))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}
