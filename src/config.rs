//! Runtime configuration for the viewer, read from the environment.
//!
//! Gameplay constants live in `tuning`; this covers window, map source and policy.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::render::render3d::Viewport;
use crate::tuning::CollisionPolicy;

pub const SCREEN_WIDTH: &str = "RAYCAST_SCREEN_WIDTH";
pub const SCREEN_HEIGHT: &str = "RAYCAST_SCREEN_HEIGHT";
pub const FOV_DEG: &str = "RAYCAST_FOV_DEG";
pub const TARGET_FPS: &str = "RAYCAST_TARGET_FPS";
pub const MINIMAP_CELL: &str = "RAYCAST_MINIMAP_CELL";
pub const MAP_FILE: &str = "RAYCAST_MAP_FILE";
pub const SOLID_WALLS: &str = "RAYCAST_SOLID_WALLS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid value")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be {expected}")]
    OutOfRange {
        key: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub viewport: Viewport,
    pub target_fps: u32,
    /// Minimap pixels per cell; 0 hides the minimap.
    pub minimap_cell: u32,
    pub map_file: Option<PathBuf>,
    pub collision: CollisionPolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            target_fps: 60,
            minimap_cell: 4,
            map_file: None,
            collision: CollisionPolicy::BoundaryOnly,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let width = parse_or(&lookup, SCREEN_WIDTH, defaults.viewport.width)?;
        let height = parse_or(&lookup, SCREEN_HEIGHT, width)?;
        let fov = parse_or(&lookup, FOV_DEG, defaults.viewport.fov)?;
        let target_fps = parse_or(&lookup, TARGET_FPS, defaults.target_fps)?;
        let minimap_cell = parse_or(&lookup, MINIMAP_CELL, defaults.minimap_cell)?;
        let solid = parse_or(&lookup, SOLID_WALLS, false)?;
        let map_file = lookup(MAP_FILE)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        if width == 0 {
            return Err(ConfigError::OutOfRange {
                key: SCREEN_WIDTH,
                expected: "greater than 0",
            });
        }
        if height == 0 {
            return Err(ConfigError::OutOfRange {
                key: SCREEN_HEIGHT,
                expected: "greater than 0",
            });
        }
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::OutOfRange {
                key: FOV_DEG,
                expected: "between 0 and 180 degrees (exclusive)",
            });
        }
        if target_fps == 0 {
            return Err(ConfigError::OutOfRange {
                key: TARGET_FPS,
                expected: "greater than 0",
            });
        }
        if minimap_cell > width.min(height) {
            return Err(ConfigError::OutOfRange {
                key: MINIMAP_CELL,
                expected: "at most the screen size in pixels",
            });
        }

        let config = Self {
            viewport: Viewport { width, height, fov },
            target_fps,
            minimap_cell,
            map_file,
            collision: if solid {
                CollisionPolicy::SolidWalls
            } else {
                CollisionPolicy::BoundaryOnly
            },
        };
        debug!(?config, "viewer config");
        Ok(config)
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
