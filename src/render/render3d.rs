//! Column projector: one ray per screen column, distance to slice height and shade.
use tracing::trace;

use crate::core::maze::Map;
use crate::core::player::{KinematicState, wrap360};
use crate::render::casters::RayCaster;
use crate::render::framebuffer::{Color, PixelSink};
use crate::tuning::CasterTuning;

/// Screen size plus the angular span swept across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Field of view in degrees.
    pub fov: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            fov: 60.0,
        }
    }
}

/// One projected wall column. Rows `top..top + height` are wall, the rest background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSlice {
    pub x: u32,
    pub top: u32,
    pub height: u32,
    pub shade: u8,
    pub distance: f64,
}

// Too-close (or degenerate) distances would project taller than the screen.
#[inline]
fn guard_distance(distance: f64, projection: f64) -> f64 {
    if projection / distance > projection { 1.0 } else { distance }
}

/// Unclipped slice height for a wall `distance` away.
pub fn column_height(distance: f64, screen_width: u32) -> f64 {
    let w = f64::from(screen_width);
    let d = guard_distance(distance, w);
    (w / d).max(0.0)
}

/// Gray level for a wall `distance` away: near walls are white, far ones dark.
pub fn column_shade(distance: f64, screen_width: u32) -> u8 {
    let d = guard_distance(distance, f64::from(screen_width));
    (255.0 / d).clamp(0.0, 255.0) as u8
}

pub struct Projector<'a> {
    caster: RayCaster<'a>,
    viewport: Viewport,
}

impl<'a> Projector<'a> {
    pub fn new(map: &'a Map, tuning: CasterTuning, viewport: Viewport) -> Self {
        Self {
            caster: RayCaster::new(map, tuning),
            viewport,
        }
    }

    /// Heading of column `i`, wrapped to `[0, 360)`.
    #[inline]
    pub fn column_angle(&self, facing: f64, i: u32) -> f64 {
        let fov_step = self.viewport.fov / f64::from(self.viewport.width);
        wrap360(facing - self.viewport.fov / 2.0 + f64::from(i) * fov_step)
    }

    pub fn render_frame(&self, state: &KinematicState) -> Vec<ColumnSlice> {
        let slices: Vec<ColumnSlice> = (0..self.viewport.width)
            .map(|i| {
                let theta = self.column_angle(state.a, i);
                let distance = self.caster.cast(state.pos, state.a, theta);
                self.slice(i, distance)
            })
            .collect();
        trace!(columns = slices.len(), "frame projected");
        slices
    }

    /// Projects and paints the whole 3D view into `sink`.
    pub fn draw_frame(&self, state: &KinematicState, sink: &mut impl PixelSink, background: Color) {
        for slice in self.render_frame(state) {
            sink.draw_column(&slice, background);
        }
    }

    fn slice(&self, x: u32, distance: f64) -> ColumnSlice {
        let Viewport { width, height, .. } = self.viewport;
        let h = column_height(distance, width) as i64;
        let top = i64::from(height) / 2 - h / 2;
        let bottom = (top + h).min(i64::from(height));
        let top = top.max(0);

        ColumnSlice {
            x,
            top: top as u32,
            height: (bottom - top).max(0) as u32,
            shade: column_shade(distance, width),
            distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::render::casters::angle_offset;
    use crate::render::framebuffer::Framebuffer;

    #[rstest]
    #[case::guarded_zero(0.0, 400.0)]
    #[case::guarded_close(0.25, 400.0)]
    #[case::unit(1.0, 400.0)]
    #[case::two(2.0, 200.0)]
    #[case::max(10.0, 40.0)]
    fn heights(#[case] distance: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(column_height(distance, 400), expected);
    }

    #[rstest]
    #[case::close(0.5, 255)]
    #[case::unit(1.0, 255)]
    #[case::two(2.0, 127)]
    #[case::far(10.0, 25)]
    fn shades(#[case] distance: f64, #[case] expected: u8) {
        assert_eq!(column_shade(distance, 400), expected);
    }

    #[test]
    fn height_never_grows_with_distance() {
        let mut previous = f64::INFINITY;
        for i in 1..=2_000 {
            let d = f64::from(i) * 0.005;
            let h = column_height(d, 400);
            assert!(h <= previous, "height rose at d = {d}");
            previous = h;
        }
    }

    #[test]
    fn column_angles_sweep_the_fov() {
        let map = Map::reference();
        let projector = Projector::new(&map, CasterTuning::default(), Viewport::default());
        // compare as headings: 0 and 360 are the same column
        let cases = [(0.0, 0, 330.0), (0.0, 200, 0.0), (0.0, 399, 29.85), (725.0, 200, 5.0)];
        for (facing, i, expected) in cases {
            let theta = projector.column_angle(facing, i);
            assert!((0.0..360.0).contains(&theta));
            assert_abs_diff_eq!(angle_offset(theta, expected), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn spawn_frame_has_one_centered_slice_per_column() {
        let map = Map::reference();
        let projector = Projector::new(&map, CasterTuning::default(), Viewport::default());
        let frame = projector.render_frame(&KinematicState::spawn());

        assert_eq!(frame.len(), 400);
        for (i, slice) in frame.iter().enumerate() {
            assert_eq!(slice.x, i as u32);
            assert!(slice.top + slice.height <= 400);
            // centred: the gap above matches the gap below to within a pixel
            let below = 400 - (slice.top + slice.height);
            assert!(slice.top.abs_diff(below) <= 1, "column {i} off-centre");
        }

        // centre column looks down the open corridor at the far border (~7 units)
        let centre = frame[200];
        assert_eq!(centre.height, 57);
        assert_eq!(centre.shade, 36);
    }

    #[test]
    fn short_screens_clip_tall_slices() {
        let map = Map::reference();
        let viewport = Viewport {
            width: 400,
            height: 100,
            fov: 60.0,
        };
        let projector = Projector::new(&map, CasterTuning::default(), viewport);
        // right against the pillar at (2, 2)
        let state = KinematicState::new(2.5, 1.6, 0.0);
        let frame = projector.render_frame(&state);
        assert_eq!(frame[200].top, 0);
        assert_eq!(frame[200].height, 100);
    }

    #[test]
    fn draw_frame_fills_every_pixel() {
        let map = Map::reference();
        let viewport = Viewport {
            width: 40,
            height: 40,
            fov: 60.0,
        };
        let projector = Projector::new(&map, CasterTuning::default(), viewport);
        let mut fb = Framebuffer::new(40, 40);
        fb.color_buffer.fill(Color::RED);

        projector.draw_frame(&KinematicState::spawn(), &mut fb, Color::BACKGROUND);

        assert!(fb.color_buffer.iter().all(|&c| c != Color::RED));
        assert_eq!(fb.get_pixel(20, 0), Color::BACKGROUND);
    }
}
