//! Statistics structs for plane operations.

/// Statistics from one block-wide propagation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Tiles in the connected component that was evaluated.
    pub tiles_visited: usize,
    /// Tiles whose neighborhood matched a rule and were recolored.
    pub tiles_recolored: usize,
}

impl PropagationStats {
    /// Check if any rule fired.
    pub fn any_recolored(&self) -> bool {
        self.tiles_recolored > 0
    }
}

/// Debug information about plane state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaneDebugInfo {
    /// Total number of lit tiles.
    pub total_tiles: usize,
    /// Undirected adjacency links (each symmetric pair counted once).
    pub adjacency_links: usize,
    /// Tiles with no neighbors.
    pub isolated_tiles: usize,
    /// Rules in the rule set.
    pub rule_count: usize,
    /// Sum of every rule's usage counter.
    pub total_rule_usage: u64,
}

impl PlaneDebugInfo {
    /// Average neighbor count per tile.
    pub fn mean_degree(&self) -> f32 {
        if self.total_tiles == 0 {
            return 0.0;
        }
        (self.adjacency_links * 2) as f32 / self.total_tiles as f32
    }
}
