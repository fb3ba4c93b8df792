use serde::{Deserialize, Serialize};

use super::gravity_resource::Gravity;
use super::spatial_hash_grid::DEFAULT_CELL_SIZE;

/// Tunables for the physics step. Numerical tolerances are constants, not settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: Gravity,
    /// Multiplier applied to horizontal velocity every tick.
    pub velocity_damping: f32,
    pub cell_size: f32,
    /// Extra cells around static colliders in the static grid.
    pub static_padding: u32,
    /// Margin added around the region of interest when deciding which bodies are awake.
    pub wake_margin: f32,
    pub ground_probe_distance: f32,
    pub ground_probe_tolerance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Gravity::default(),
            velocity_damping: 0.75,
            cell_size: DEFAULT_CELL_SIZE,
            static_padding: 1,
            wake_margin: 32.0,
            ground_probe_distance: 1.0,
            ground_probe_tolerance: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity.magnitude, 400.0);
        assert_eq!(config.gravity.max_rise_speed, -150.0);
        assert_eq!(config.gravity.max_fall_speed, 200.0);
        assert_eq!(config.velocity_damping, 0.75);
        assert_eq!(config.cell_size, 8.0);
    }
}
