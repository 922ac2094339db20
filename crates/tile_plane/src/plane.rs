//! Plane - owns tile storage, adjacency maintenance, and the rule set.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::PlaneConfig;
use crate::coord::Coord;
use crate::error::RuleError;
use crate::rule::{Rule, RuleSet};
use crate::stats::PlaneDebugInfo;
use crate::tile::Tile;

/// Sparse store of lit tiles with maintained 8-neighbor adjacency.
///
/// Handles:
/// - Tile storage (HashMap by coordinate)
/// - Symmetric adjacency links on insertion and removal
/// - The ordered rule set used by propagation
///
/// Propagation lives in [`engine`](crate::engine), block queries in
/// [`block`](crate::block), and path queries in [`path`](crate::path).
#[derive(Clone, Debug, Default)]
pub struct Plane {
    /// All lit tiles indexed by coordinate.
    pub(crate) tiles: HashMap<Coord, Tile>,

    /// Propagation rules in priority order.
    pub(crate) rules: RuleSet,

    pub(crate) config: PlaneConfig,
}

impl Plane {
    /// Create an empty plane with default configuration.
    pub fn new() -> Self {
        Self::with_config(PlaneConfig::default())
    }

    /// Create an empty plane with custom configuration.
    pub fn with_config(config: PlaneConfig) -> Self {
        Self {
            tiles: HashMap::new(),
            rules: RuleSet::new(),
            config,
        }
    }

    pub fn config(&self) -> &PlaneConfig {
        &self.config
    }

    // ========================================================================
    // Tile Access
    // ========================================================================

    /// Get a tile by coordinate.
    pub fn get_tile(&self, pos: Coord) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    /// Check if a tile is lit at `pos`.
    pub fn contains(&self, pos: Coord) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// Number of lit tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over all tiles in arbitrary order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Tiles linked to the tile at `pos`. Empty if `pos` is dark.
    pub fn neighbors_of(&self, pos: Coord) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles
            .get(&pos)
            .into_iter()
            .flat_map(|tile| tile.neighbors())
            .filter_map(move |coord| self.tiles.get(&coord))
    }

    // ========================================================================
    // Tile Edits
    // ========================================================================

    /// Color the tile at `pos`, lighting it if needed.
    ///
    /// A new tile is linked both ways to every lit tile among its 8 compass
    /// neighbors. An existing tile only has its color and intensity replaced.
    pub fn set_tile(&mut self, pos: Coord, color: impl Into<String>, intensity: i32) {
        if let Some(tile) = self.tiles.get_mut(&pos) {
            tile.color = color.into();
            tile.intensity = intensity;
            return;
        }

        let mut tile = Tile::new(pos, color, intensity);
        for (dir, coord) in pos.neighbors() {
            if let Some(neighbor) = self.tiles.get_mut(&coord) {
                neighbor.neighbors.insert(dir.opposite());
                tile.neighbors.insert(dir);
            }
        }

        debug!(x = pos.x, y = pos.y, links = tile.neighbor_count(), "tile lit");
        self.tiles.insert(pos, tile);
    }

    /// Turn off the tile at `pos`.
    ///
    /// Every neighbor drops its link back to the removed tile. Returns the
    /// removed tile, detached from the plane, or `None` if `pos` was dark.
    pub fn remove_tile(&mut self, pos: Coord) -> Option<Tile> {
        let mut tile = self.tiles.remove(&pos)?;

        for dir in tile.neighbors.iter() {
            let Some(coord) = pos.step(dir) else {
                continue;
            };
            if let Some(neighbor) = self.tiles.get_mut(&coord) {
                neighbor.neighbors.remove(dir.opposite());
            }
        }
        tile.neighbors = Default::default();

        debug!(x = pos.x, y = pos.y, "tile turned off");
        Some(tile)
    }

    /// Remove every tile. Rules are kept.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    // ========================================================================
    // Rules
    // ========================================================================

    /// Rules in priority order.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Parse `beta k1 c1 k2 c2 ...` and append it at the lowest priority.
    ///
    /// On error the rule set is left unchanged.
    pub fn add_rule(&mut self, text: &str) -> Result<(), RuleError> {
        match Rule::parse(text) {
            Ok(rule) => {
                self.push_rule(rule);
                Ok(())
            }
            Err(err) => {
                warn!(rule = text, error = %err, "rule rejected");
                Err(err)
            }
        }
    }

    /// Append an already-validated rule at the lowest priority.
    pub fn push_rule(&mut self, rule: Rule) {
        debug!(rule = %rule, priority = self.rules.len(), "rule added");
        self.rules.push(rule);
    }

    /// Stable-sort the rules by ascending usage.
    pub fn reorder_rules(&mut self) {
        self.rules.reorder();
        debug!(rules = self.rules.len(), "rules reordered by usage");
    }

    // ========================================================================
    // Debug / Inspection
    // ========================================================================

    /// Get debug information about the plane.
    pub fn debug_info(&self) -> PlaneDebugInfo {
        let mut info = PlaneDebugInfo::default();
        let mut link_ends = 0usize;

        for tile in self.tiles.values() {
            info.total_tiles += 1;
            let degree = tile.neighbor_count() as usize;
            link_ends += degree;
            if degree == 0 {
                info.isolated_tiles += 1;
            }
        }

        info.adjacency_links = link_ends / 2;
        info.rule_count = self.rules.len();
        info.total_rule_usage = self.rules.total_usage();
        info
    }

    /// Check that every tile's links are exactly its lit compass neighbors,
    /// which also makes the links symmetric.
    pub fn is_adjacency_consistent(&self) -> bool {
        self.tiles.iter().all(|(pos, tile)| {
            tile.position == *pos
                && pos.neighbors().all(|(dir, coord)| {
                    let linked = tile.neighbors.contains(dir);
                    let back = self
                        .tiles
                        .get(&coord)
                        .map(|other| other.neighbors.contains(dir.opposite()));
                    match back {
                        Some(back) => linked && back,
                        None => !linked,
                    }
                })
        })
    }
}
