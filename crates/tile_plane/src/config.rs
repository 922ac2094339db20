//! Configuration for a [`Plane`](crate::plane::Plane).

/// Tunables for a plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneConfig {
    /// Intensity given to a tile that single-cell propagation lights up
    /// from the dark.
    pub default_intensity: i32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            default_intensity: 1,
        }
    }
}
