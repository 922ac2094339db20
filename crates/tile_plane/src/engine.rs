//! Rule propagation: single-cell and whole-block.
//!
//! Single-cell propagation evaluates the target as a virtual tile, so a dark
//! cell is only lit if a rule fires for it. Block propagation is synchronous:
//!
//! ```text
//!   read phase (&self)                 commit phase (&mut self)
//! ┌──────────────────────────┐       ┌──────────────────────────┐
//! │ BFS over the component   │       │ recolor each decided tile│
//! │ histogram per tile       │──────▶│ bump each fired rule     │
//! │ first matching rule      │       │                          │
//! └──────────────────────────┘       └──────────────────────────┘
//! ```
//!
//! Every decision is taken before any tile changes, so a tile recolored in
//! this pass never influences another tile's match in the same pass.

use tracing::{debug, trace};

use crate::coord::Coord;
use crate::plane::Plane;
use crate::rule::ColorHistogram;
use crate::stats::PropagationStats;

/// Outcome of [`Plane::apply_at`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The rule at priority `rule` fired and the tile now has `color`.
    Applied { rule: usize, color: String },
    /// No rule matched; the plane is unchanged.
    NoMatch,
}

impl Propagation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Propagation::Applied { .. })
    }
}

impl Plane {
    /// Tally the colors of the lit tiles around `pos`.
    ///
    /// For a lit tile this reads its links; for a dark cell it reads the lit
    /// tiles it would be linked to if it were lit.
    pub fn neighbor_histogram(&self, pos: Coord) -> ColorHistogram<'_> {
        match self.tiles.get(&pos) {
            Some(tile) => ColorHistogram::from_colors(
                tile.neighbors()
                    .filter_map(|coord| self.tiles.get(&coord))
                    .map(|t| t.color.as_str()),
            ),
            None => ColorHistogram::from_colors(
                pos.neighbors()
                    .filter_map(|(_, coord)| self.tiles.get(&coord))
                    .map(|t| t.color.as_str()),
            ),
        }
    }

    /// Index of the first rule matching the neighborhood of `pos`.
    pub fn matching_rule(&self, pos: Coord) -> Option<usize> {
        let histogram = self.neighbor_histogram(pos);
        self.rules.first_match(&histogram)
    }

    /// Apply the first matching rule to the tile at `pos`.
    ///
    /// A matching rule recolors the tile (intensity unchanged) and bumps the
    /// rule's usage. A dark cell is lit with the configured default intensity
    /// only when a rule fires; otherwise it stays dark. A lit tile with no
    /// matching rule is left as it is.
    pub fn apply_at(&mut self, pos: Coord) -> Propagation {
        let Some(index) = self.matching_rule(pos) else {
            trace!(x = pos.x, y = pos.y, "no rule matches");
            return Propagation::NoMatch;
        };
        let Some(color) = self.rules.get(index).map(|rule| rule.result().to_owned()) else {
            return Propagation::NoMatch;
        };

        match self.tiles.get_mut(&pos) {
            Some(tile) => tile.color.clone_from(&color),
            None => {
                let intensity = self.config.default_intensity;
                self.set_tile(pos, color.clone(), intensity);
            }
        }
        self.rules.record_use(index);

        trace!(x = pos.x, y = pos.y, rule = index, color = %color, "rule applied");
        Propagation::Applied { rule: index, color }
    }

    /// Apply the first matching rule to every tile of the block containing
    /// `pos`, all decided against the neighbor colors as they were before
    /// the call.
    ///
    /// The block is the full connected component regardless of color. A dark
    /// `pos` has no block and nothing happens.
    pub fn apply_to_block(&mut self, pos: Coord) -> PropagationStats {
        let component = self.block(pos, false);
        let mut stats = PropagationStats {
            tiles_visited: component.len(),
            ..Default::default()
        };

        let decisions: Vec<(Coord, usize)> = component
            .iter()
            .filter_map(|&coord| self.matching_rule(coord).map(|index| (coord, index)))
            .collect();

        for &(coord, index) in &decisions {
            let (Some(rule), Some(tile)) = (self.rules.get(index), self.tiles.get_mut(&coord)) else {
                continue;
            };
            tile.color = rule.result().to_owned();
            self.rules.record_use(index);
            stats.tiles_recolored += 1;
        }

        debug!(
            x = pos.x,
            y = pos.y,
            visited = stats.tiles_visited,
            recolored = stats.tiles_recolored,
            "block propagated"
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane_with_rules(rules: &[&str]) -> Plane {
        let mut plane = Plane::new();
        for rule in rules {
            plane.add_rule(rule).unwrap();
        }
        plane
    }

    #[test]
    fn histogram_of_lit_tile() {
        let mut plane = Plane::new();
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 0), "blue", 1);
        plane.set_tile(Coord::new(0, 1), "blue", 1);
        plane.set_tile(Coord::new(5, 5), "blue", 1);

        let hist = plane.neighbor_histogram(Coord::new(0, 0));
        assert_eq!(hist.count("blue"), 2);
        assert_eq!(hist.count("red"), 0);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn histogram_of_dark_cell() {
        let mut plane = Plane::new();
        plane.set_tile(Coord::new(1, 1), "red", 1);
        plane.set_tile(Coord::new(-1, -1), "red", 1);

        let hist = plane.neighbor_histogram(Coord::ZERO);
        assert_eq!(hist.count("red"), 2);
    }

    #[test]
    fn apply_at_recolors_keeping_intensity() {
        let mut plane = plane_with_rules(&["green 1 red"]);
        plane.set_tile(Coord::new(0, 0), "blue", 7);
        plane.set_tile(Coord::new(1, 0), "red", 1);

        let outcome = plane.apply_at(Coord::new(0, 0));

        assert_eq!(
            outcome,
            Propagation::Applied {
                rule: 0,
                color: "green".to_string()
            }
        );
        let tile = plane.get_tile(Coord::new(0, 0)).unwrap();
        assert_eq!(tile.color, "green");
        assert_eq!(tile.intensity, 7);
        assert_eq!(plane.rules().get(0).unwrap().usage(), 1);
    }

    #[test]
    fn apply_at_first_match_priority() {
        let mut plane = plane_with_rules(&["first 1 red", "second 1 red"]);
        plane.set_tile(Coord::new(0, 0), "blue", 1);
        plane.set_tile(Coord::new(0, 1), "red", 1);

        plane.apply_at(Coord::new(0, 0));

        assert_eq!(plane.get_tile(Coord::new(0, 0)).unwrap().color, "first");
        assert_eq!(plane.rules().get(0).unwrap().usage(), 1);
        assert_eq!(plane.rules().get(1).unwrap().usage(), 0);
    }

    #[test]
    fn apply_at_lights_dark_cell_when_rule_fires() {
        let mut plane = plane_with_rules(&["green 2 red"]);
        plane.set_tile(Coord::new(1, 0), "red", 4);
        plane.set_tile(Coord::new(-1, 0), "red", 4);

        assert!(plane.apply_at(Coord::ZERO).is_applied());

        let tile = plane.get_tile(Coord::ZERO).unwrap();
        assert_eq!(tile.color, "green");
        assert_eq!(tile.intensity, 1);
        assert_eq!(tile.neighbor_count(), 2);
        assert!(plane.is_adjacency_consistent());
    }

    #[test]
    fn apply_at_dark_cell_without_match_stays_dark() {
        let mut plane = plane_with_rules(&["green 2 red"]);
        plane.set_tile(Coord::new(1, 0), "red", 4);

        assert_eq!(plane.apply_at(Coord::ZERO), Propagation::NoMatch);

        assert!(!plane.contains(Coord::ZERO));
        assert_eq!(plane.tile_count(), 1);
        assert!(plane.get_tile(Coord::new(1, 0)).unwrap().neighbor_mask().is_empty());
    }

    #[test]
    fn apply_at_lit_tile_without_match_stays_lit() {
        let mut plane = plane_with_rules(&["green 2 red"]);
        plane.set_tile(Coord::ZERO, "blue", 3);

        assert_eq!(plane.apply_at(Coord::ZERO), Propagation::NoMatch);

        let tile = plane.get_tile(Coord::ZERO).unwrap();
        assert_eq!(tile.color, "blue");
        assert_eq!(tile.intensity, 3);
    }

    #[test]
    fn apply_at_with_unconditional_rule_lights_isolated_cell() {
        let mut plane = plane_with_rules(&["yellow"]);

        assert!(plane.apply_at(Coord::new(9, 9)).is_applied());
        assert_eq!(plane.get_tile(Coord::new(9, 9)).unwrap().color, "yellow");
    }

    #[test]
    fn apply_to_block_dark_is_noop() {
        let mut plane = plane_with_rules(&["yellow"]);

        let stats = plane.apply_to_block(Coord::ZERO);

        assert_eq!(stats, PropagationStats::default());
        assert!(plane.is_empty());
        assert_eq!(plane.rules().get(0).unwrap().usage(), 0);
    }

    #[test]
    fn apply_to_block_uses_snapshot() {
        // A=red and B=blue swap colors: each decision must read the other's
        // color from before the call.
        let mut plane = plane_with_rules(&["blue 1 blue", "red 1 red"]);
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 0), "blue", 1);

        let stats = plane.apply_to_block(Coord::new(0, 0));

        assert_eq!(stats.tiles_visited, 2);
        assert_eq!(stats.tiles_recolored, 2);
        assert_eq!(plane.get_tile(Coord::new(0, 0)).unwrap().color, "blue");
        assert_eq!(plane.get_tile(Coord::new(1, 0)).unwrap().color, "red");
        assert_eq!(plane.rules().get(0).unwrap().usage(), 1);
        assert_eq!(plane.rules().get(1).unwrap().usage(), 1);
    }

    #[test]
    fn apply_to_block_does_not_cascade() {
        // Only the tile next to red can turn red in one pass; the far end of
        // the chain must wait for a second pass.
        let mut plane = plane_with_rules(&["red 1 red"]);
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 0), "white", 1);
        plane.set_tile(Coord::new(2, 0), "white", 1);

        let stats = plane.apply_to_block(Coord::new(2, 0));

        assert_eq!(stats.tiles_visited, 3);
        // (0,0) has no red neighbor, (1,0) does, (2,0) does not yet.
        assert_eq!(stats.tiles_recolored, 1);
        assert_eq!(plane.get_tile(Coord::new(1, 0)).unwrap().color, "red");
        assert_eq!(plane.get_tile(Coord::new(2, 0)).unwrap().color, "white");

        plane.apply_to_block(Coord::new(2, 0));
        assert_eq!(plane.get_tile(Coord::new(2, 0)).unwrap().color, "red");
    }

    #[test]
    fn apply_to_block_spans_colors_but_not_gaps() {
        let mut plane = plane_with_rules(&["green"]);
        plane.set_tile(Coord::new(0, 0), "red", 1);
        plane.set_tile(Coord::new(1, 1), "blue", 1);
        plane.set_tile(Coord::new(5, 5), "red", 1);

        let stats = plane.apply_to_block(Coord::new(0, 0));

        assert_eq!(stats.tiles_visited, 2);
        assert_eq!(plane.get_tile(Coord::new(1, 1)).unwrap().color, "green");
        assert_eq!(plane.get_tile(Coord::new(5, 5)).unwrap().color, "red");
        assert_eq!(plane.rules().get(0).unwrap().usage(), 2);
    }
}
