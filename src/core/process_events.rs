//! Movement intents and how they map onto velocity.
//!
//! The input layer turns raw key events into these; the core never sees keys.
use crate::core::player::{KinematicState, Vec2};
use crate::tuning::MovementTuning;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementIntent {
    TurnLeft,
    TurnRight,
    StopTurning,
    Forward,
    StopForward,
}

/// Everything the frame driver can receive from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(MovementIntent),
    Quit,
}

impl From<MovementIntent> for InputEvent {
    fn from(intent: MovementIntent) -> Self {
        InputEvent::Move(intent)
    }
}

impl MovementIntent {
    pub fn apply(self, state: &mut KinematicState, tuning: &MovementTuning) {
        match self {
            MovementIntent::TurnLeft => state.look_vel = -tuning.turn_rate,
            MovementIntent::TurnRight => state.look_vel = tuning.turn_rate,
            MovementIntent::StopTurning => state.look_vel = 0.0,
            MovementIntent::Forward => state.vel = state.facing() * tuning.speed,
            MovementIntent::StopForward => state.vel = Vec2::ZERO,
        }
    }
}
