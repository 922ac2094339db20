//! Block queries: flood fill over the adjacency graph.

use std::collections::{HashSet, VecDeque};

use crate::coord::Coord;
use crate::plane::Plane;

impl Plane {
    /// Coordinates of the block containing `start`, in breadth-first order.
    ///
    /// The block is the connected component of `start`. With
    /// `homogeneous_only` the fill never crosses into a tile whose color
    /// differs from the start tile's. Empty if `start` is dark.
    pub fn block(&self, start: Coord, homogeneous_only: bool) -> Vec<Coord> {
        let Some(origin) = self.tiles.get(&start) else {
            return Vec::new();
        };

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();

        while let Some(coord) = queue.pop_front() {
            order.push(coord);
            let Some(tile) = self.tiles.get(&coord) else {
                continue;
            };
            for next in tile.neighbors() {
                let Some(neighbor) = self.tiles.get(&next) else {
                    continue;
                };
                if homogeneous_only && neighbor.color != origin.color {
                    continue;
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// Sum of intensities over the block containing `start`.
    ///
    /// Returns 0 if `start` is dark.
    pub fn sum_intensity(&self, start: Coord, homogeneous_only: bool) -> i64 {
        self.block(start, homogeneous_only)
            .iter()
            .filter_map(|coord| self.tiles.get(coord))
            .map(|tile| i64::from(tile.intensity))
            .sum()
    }
}
