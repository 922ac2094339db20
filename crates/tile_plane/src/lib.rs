//! Sparse tile plane with neighbor-color propagation rules.
//!
//! Tiles live on an unbounded integer grid and are linked to up to eight
//! compass neighbors. A [`Plane`] keeps those links symmetric as tiles are
//! lit and turned off, owns an ordered [`RuleSet`], and answers block and
//! path queries over the adjacency graph.
//!
//! # Example
//!
//! ```
//! use tile_plane::{Coord, Direction, Plane};
//!
//! let mut plane = Plane::new();
//! plane.set_tile(Coord::new(0, 0), "red", 2);
//! plane.set_tile(Coord::new(1, 0), "red", 3);
//! plane.set_tile(Coord::new(2, 1), "blue", 5);
//!
//! assert_eq!(plane.sum_intensity(Coord::new(0, 0), false), 10);
//! assert_eq!(plane.sum_intensity(Coord::new(0, 0), true), 5);
//! assert_eq!(plane.shortest_distance(Coord::new(0, 0), Coord::new(2, 1)), Some(3));
//!
//! // Any tile touching two reds turns green.
//! plane.add_rule("green 2 red").unwrap();
//! assert!(plane.apply_at(Coord::new(1, 1)).is_applied());
//! assert_eq!(plane.get_tile(Coord::new(1, 1)).unwrap().color, "green");
//!
//! let path = plane.follow_path(Coord::new(0, 0), &[Direction::East]).unwrap();
//! assert_eq!(path.len(), 2);
//! ```

pub mod block;
pub mod config;
pub mod coord;
pub mod engine;
pub mod error;
pub mod path;
pub mod plane;
pub mod rule;
pub mod stats;
pub mod tile;

// Re-export primary types
pub use crate::config::PlaneConfig;
pub use crate::coord::{Coord, Direction};
pub use crate::engine::Propagation;
pub use crate::error::{DirectionError, RuleError, MAX_RULE_WEIGHT};
pub use crate::path::PathStep;
pub use crate::plane::Plane;
pub use crate::rule::{ColorHistogram, Condition, Rule, RuleSet};
pub use crate::stats::{PlaneDebugInfo, PropagationStats};
pub use crate::tile::{NeighborMask, Tile};
