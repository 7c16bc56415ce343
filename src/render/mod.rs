//! Rendering: ray casting, column projection and the pixel buffer.
//!
//! Re-exports:
//! - `casters`: Stepped ray marcher with refinement and fisheye correction
//! - `render3d`: Column projector (height + shade per screen column)
//! - `framebuffer`: CPU framebuffer and the `PixelSink` writer trait
//! - `minimap`: Top-down map overlay

pub mod casters;
pub mod framebuffer;
pub mod minimap;
pub mod render3d;
