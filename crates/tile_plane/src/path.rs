//! Path queries: directional walks and shortest paths.

use std::collections::{HashSet, VecDeque};

use crate::coord::{Coord, Direction};
use crate::plane::Plane;
use crate::tile::Tile;

/// One tile on a traced path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub position: Coord,
    pub color: String,
    pub intensity: i32,
}

impl From<&Tile> for PathStep {
    fn from(tile: &Tile) -> Self {
        Self {
            position: tile.position,
            color: tile.color.clone(),
            intensity: tile.intensity,
        }
    }
}

impl Plane {
    /// Walk `directions` from `start`, collecting every tile stepped on.
    ///
    /// The path starts with the tile at `start`. If `start` or any step
    /// lands on a dark cell the whole path is discarded and `None` is
    /// returned; a partial path is never reported.
    pub fn follow_path(&self, start: Coord, directions: &[Direction]) -> Option<Vec<PathStep>> {
        let mut tile = self.tiles.get(&start)?;
        let mut path = Vec::with_capacity(directions.len() + 1);
        path.push(PathStep::from(tile));

        for &dir in directions {
            let next = tile.position.step(dir)?;
            tile = self.tiles.get(&next)?;
            path.push(PathStep::from(tile));
        }

        Some(path)
    }

    /// Length of the shortest path from `a` to `b`, counted in tiles.
    ///
    /// A tile to itself has length 1. Returns `None` if either end is dark
    /// or `b` is not in the block of `a`.
    pub fn shortest_distance(&self, a: Coord, b: Coord) -> Option<usize> {
        if !self.tiles.contains_key(&a) || !self.tiles.contains_key(&b) {
            return None;
        }
        if a == b {
            return Some(1);
        }

        let mut visited = HashSet::from([a]);
        let mut queue = VecDeque::from([(a, 0usize)]);

        while let Some((coord, hops)) = queue.pop_front() {
            let Some(tile) = self.tiles.get(&coord) else {
                continue;
            };
            for next in tile.neighbors() {
                if next == b {
                    return Some(hops + 2);
                }
                if self.tiles.contains_key(&next) && visited.insert(next) {
                    queue.push_back((next, hops + 1));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Direction::*;

    fn line_plane() -> Plane {
        let mut plane = Plane::new();
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 0), "blue", 2);
        plane.set_tile(Coord::new(2, 0), "red", 3);
        plane
    }

    #[test]
    fn follow_path_collects_tiles() {
        let plane = line_plane();

        let path = plane.follow_path(Coord::new(0, 0), &[East, East, West]).unwrap();

        let positions: Vec<_> = path.iter().map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0), Coord::new(1, 0)]
        );
        assert_eq!(path[1].color, "blue");
        assert_eq!(path[2].intensity, 3);
    }

    #[test]
    fn follow_path_empty_directions_is_start_only() {
        let plane = line_plane();
        let path = plane.follow_path(Coord::new(2, 0), &[]).unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn follow_path_aborts_on_gap() {
        let mut plane = Plane::new();
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 0), "red", 1);

        assert_eq!(plane.follow_path(Coord::new(0, 0), &[East, East]), None);
    }

    #[test]
    fn follow_path_dark_start() {
        let plane = line_plane();
        assert_eq!(plane.follow_path(Coord::new(0, 5), &[]), None);
    }

    #[test]
    fn follow_path_diagonals() {
        let mut plane = Plane::new();
        plane.set_tile(Coord::new(0, 0), "a", 1);
        plane.set_tile(Coord::new(1, 1), "b", 1);
        plane.set_tile(Coord::new(0, 2), "c", 1);
        plane.set_tile(Coord::new(-1, 1), "d", 1);

        let path = plane
            .follow_path(Coord::ZERO, &[NorthEast, NorthWest, SouthWest, SouthEast])
            .unwrap();
        let colors: Vec<_> = path.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["a", "b", "c", "d", "a"]);
    }

    #[test]
    fn shortest_distance_on_a_line() {
        let plane = line_plane();
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(2, 0)), Some(3));
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(1, 0)), Some(2));
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(0, 0)), Some(1));
    }

    #[test]
    fn shortest_distance_missing_endpoint() {
        let mut plane = line_plane();
        plane.remove_tile(Coord::new(2, 0));
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(2, 0)), None);
        assert_eq!(plane.shortest_distance(Coord::new(7, 7), Coord::new(7, 7)), None);
    }

    #[test]
    fn shortest_distance_unreachable() {
        let mut plane = line_plane();
        plane.set_tile(Coord::new(9, 9), "red", 1);
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(9, 9)), None);
    }

    #[test]
    fn shortest_distance_takes_diagonal_shortcut() {
        let mut plane = Plane::new();
        // Hook-shaped route; a tile at (1,1) opens a straight diagonal.
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 0), "red", 1);
        plane.set_tile(Coord::new(2, 0), "red", 1);
        plane.set_tile(Coord::new(2, 1), "red", 1);
        plane.set_tile(Coord::new(2, 2), "red", 1);
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(2, 2)), Some(4));

        plane.set_tile(Coord::new(1, 1), "red", 1);
        assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(2, 2)), Some(3));
    }
}
