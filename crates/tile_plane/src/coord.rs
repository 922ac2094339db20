//! Plane coordinates and the eight compass directions.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;

use crate::error::DirectionError;

/// Tile coordinate on the unbounded plane.
///
/// Coordinates can be negative. Neighbor arithmetic is checked: an offset
/// that would leave the `i32` range has no coordinate at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Origin at (0, 0).
    pub const ZERO: Coord = Coord { x: 0, y: 0 };

    /// Create a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step one unit in `dir`.
    ///
    /// Returns `None` if the step overflows.
    pub fn step(&self, dir: Direction) -> Option<Coord> {
        let offset = dir.offset();
        Some(Coord {
            x: self.x.checked_add(offset.x)?,
            y: self.y.checked_add(offset.y)?,
        })
    }

    /// Get the 8 grid-adjacent coordinates, paired with the direction that
    /// reaches them.
    ///
    /// Returned in [`Direction::ALL`] order; overflowing offsets are skipped.
    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(dir).map(|coord| (dir, coord)))
    }

    /// Direction from `self` to an adjacent `other`, if they touch.
    pub fn direction_to(&self, other: Coord) -> Option<Direction> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        Direction::ALL
            .into_iter()
            .find(|dir| i64::from(dir.offset().x) == dx && i64::from(dir.offset().y) == dy)
    }
}

impl From<IVec2> for Coord {
    fn from(v: IVec2) -> Self {
        Coord { x: v.x, y: v.y }
    }
}

impl From<Coord> for IVec2 {
    fn from(c: Coord) -> Self {
        IVec2::new(c.x, c.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// One of the eight compass directions.
///
/// North increments y, east increments x. The textual codes use `O`
/// (ovest) for west and are kept for command compatibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north. The position in this array is
    /// the direction's bit in a [`NeighborMask`](crate::tile::NeighborMask).
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit offset on the plane.
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, 1),
            Direction::NorthEast => IVec2::new(1, 1),
            Direction::East => IVec2::new(1, 0),
            Direction::SouthEast => IVec2::new(1, -1),
            Direction::South => IVec2::new(0, -1),
            Direction::SouthWest => IVec2::new(-1, -1),
            Direction::West => IVec2::new(-1, 0),
            Direction::NorthWest => IVec2::new(-1, 1),
        }
    }

    /// Index into [`Direction::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction pointing back.
    pub const fn opposite(self) -> Direction {
        Direction::ALL[(self as usize + 4) % 8]
    }

    /// Two-letter command code.
    pub const fn code(self) -> &'static str {
        match self {
            Direction::North => "NN",
            Direction::NorthEast => "NE",
            Direction::East => "EE",
            Direction::SouthEast => "SE",
            Direction::South => "SS",
            Direction::SouthWest => "SO",
            Direction::West => "OO",
            Direction::NorthWest => "NO",
        }
    }

    /// Parse a two-letter command code.
    pub fn from_code(code: &str) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.code() == code)
    }
}

impl FromStr for Direction {
    type Err = DirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_code(s).ok_or_else(|| DirectionError { code: s.to_string() })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
