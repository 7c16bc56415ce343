//! Core game types and logic (map, kinematics, input intents).
//!
//! Re-exports:
//! - `maze`: Map grid, parsing and validation
//! - `player`: Vectors, angles and the viewer's kinematic state
//! - `movement`: Per-frame integration and collision
//! - `process_events`: Movement intents produced by the input layer

pub mod maze;
pub mod movement;
pub mod player;
pub mod process_events;
