use tracing::trace;

use crate::core::maze::Map;
use crate::core::player::{KinematicState, Vec2};
use crate::tuning::{CollisionPolicy, MovementTuning};

/// Integrates the viewer's kinematics once per frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementController {
    pub tuning: MovementTuning,
}

impl MovementController {
    pub fn new(tuning: MovementTuning) -> Self {
        Self { tuning }
    }

    pub fn advance(&self, state: &mut KinematicState, map: &Map) {
        // Forward thrust follows the current facing, even mid-turn.
        if !state.vel.is_zero() {
            state.vel = state.facing() * self.tuning.speed;
        }

        match self.tuning.collision {
            CollisionPolicy::BoundaryOnly => state.pos += state.vel,
            CollisionPolicy::SolidWalls => state.pos = slide(map, state.pos, state.vel),
        }
        state.a += state.look_vel;

        self.clamp_to_bounds(&mut state.pos, map);
        trace!(x = state.pos.x, y = state.pos.y, a = state.a, "advanced");
    }

    fn clamp_to_bounds(&self, pos: &mut Vec2, map: &Map) {
        let margin = self.tuning.boundary_margin;
        let max_x = map.width() as f64 - margin;
        let max_y = map.height() as f64 - margin;
        // max/min rather than clamp: a margin wider than half the map must not panic
        pos.x = pos.x.max(margin).min(max_x);
        pos.y = pos.y.max(margin).min(max_y);
    }
}

/// Moves one axis at a time, dropping any axis whose move lands in a wall.
fn slide(map: &Map, from: Vec2, delta: Vec2) -> Vec2 {
    let mut pos = from;
    let try_x = Vec2::new(pos.x + delta.x, pos.y);
    if !map.is_wall_at(try_x) {
        pos = try_x;
    }
    let try_y = Vec2::new(pos.x, pos.y + delta.y);
    if !map.is_wall_at(try_y) {
        pos = try_y;
    }
    pos
}
