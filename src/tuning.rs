//! Gameplay tuning for the caster and the viewer's movement.
//!
//! Keep this separate from runtime configuration (window size, map file, etc.).

/// Collision applied after each position integration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Clamp to the boundary margin only. Interior walls do not stop the viewer.
    #[default]
    BoundaryOnly,
    /// Refuse per-axis moves that would put the viewer inside a wall cell, then
    /// clamp to the boundary margin.
    SolidWalls,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasterTuning {
    /// Coarse marching step in map units.
    pub step: f64,

    /// Rays give up after this many map units.
    pub max_distance: f64,

    /// Halving passes after the coarse hit; precision is `step / 2^refinement_steps`.
    pub refinement_steps: u32,
}

impl CasterTuning {
    pub fn tolerance(&self) -> f64 {
        self.step / 2f64.powi(self.refinement_steps as i32)
    }
}

impl Default for CasterTuning {
    fn default() -> Self {
        Self {
            step: 0.1,
            max_distance: 10.0,
            refinement_steps: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementTuning {
    /// Forward speed in map units per frame.
    pub speed: f64,

    /// Turn rate in degrees per frame.
    pub turn_rate: f64,

    /// Distance kept from the outer edge of the map on each axis.
    pub boundary_margin: f64,

    pub collision: CollisionPolicy,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed: 0.05,
            turn_rate: 2.0,
            boundary_margin: 1.5,
            collision: CollisionPolicy::BoundaryOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn default_tolerance_is_step_over_1024() {
        assert_abs_diff_eq!(CasterTuning::default().tolerance(), 0.1 / 1024.0, epsilon = 1e-15);
    }

    #[test]
    fn deep_refinement_keeps_a_positive_tolerance() {
        let tuning = CasterTuning {
            refinement_steps: 40,
            ..CasterTuning::default()
        };
        let tolerance = tuning.tolerance();
        assert!(tolerance > 0.0);
        assert!(tolerance < 1e-12);
    }
}
