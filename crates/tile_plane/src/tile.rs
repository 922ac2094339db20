//! Tile data structure and its adjacency mask.

use crate::coord::{Coord, Direction};

/// Set of lit neighbors, one bit per [`Direction`].
///
/// Bit `i` corresponds to `Direction::ALL[i]`. Neighbors are stored as
/// directions rather than references so they always resolve through the
/// plane's map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborMask(u8);

impl NeighborMask {
    /// No neighbors.
    pub const EMPTY: NeighborMask = NeighborMask(0);

    /// Raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if the neighbor in `dir` is linked.
    pub const fn contains(self, dir: Direction) -> bool {
        self.0 & (1u8 << dir.index()) != 0
    }

    /// Link the neighbor in `dir`.
    ///
    /// Returns true if it was not already linked.
    pub fn insert(&mut self, dir: Direction) -> bool {
        let was = self.contains(dir);
        self.0 |= 1u8 << dir.index();
        !was
    }

    /// Unlink the neighbor in `dir`.
    ///
    /// Returns true if it was linked.
    pub fn remove(&mut self, dir: Direction) -> bool {
        let was = self.contains(dir);
        self.0 &= !(1u8 << dir.index());
        was
    }

    /// Number of linked neighbors (0..=8).
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate linked directions in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |dir| self.contains(*dir))
    }
}

/// A lit cell of the plane.
///
/// Tiles are created and destroyed only through [`Plane`](crate::plane::Plane),
/// which owns the adjacency mask; color and intensity are plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Position on the plane.
    pub position: Coord,

    /// Color label.
    pub color: String,

    /// Intensity, summed by block queries.
    pub intensity: i32,

    pub(crate) neighbors: NeighborMask,
}

impl Tile {
    /// Create an unlinked tile.
    pub fn new(position: Coord, color: impl Into<String>, intensity: i32) -> Self {
        Self {
            position,
            color: color.into(),
            intensity,
            neighbors: NeighborMask::EMPTY,
        }
    }

    /// Adjacency mask of this tile.
    pub fn neighbor_mask(&self) -> NeighborMask {
        self.neighbors
    }

    /// Coordinates of the linked neighbors.
    pub fn neighbors(&self) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors
            .iter()
            .filter_map(move |dir| self.position.step(dir))
    }

    /// Number of linked neighbors.
    pub fn neighbor_count(&self) -> u32 {
        self.neighbors.len()
    }

    /// Check if `other` is a linked neighbor.
    pub fn is_linked_to(&self, other: Coord) -> bool {
        self.position
            .direction_to(other)
            .is_some_and(|dir| self.neighbors.contains(dir))
    }
}
