//! First-person ray casting over a 2D tile maze.
//!
//! - `core`: map, kinematics, movement and input intents
//! - `render`: ray caster, column projector, framebuffer and minimap
//! - `session`: per-frame driver tying input, movement and rendering together
//! - `config` / `tuning`: runtime configuration and gameplay constants

pub mod config;
pub mod core;
pub mod render;
pub mod session;
pub mod tuning;

pub use crate::core::maze::{Cell, Map, MapError};
pub use crate::core::player::{KinematicState, Vec2};
pub use crate::core::process_events::{InputEvent, MovementIntent};
pub use crate::session::{LoopSignal, Session};
