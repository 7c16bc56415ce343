//! Top-down overlay: one square per cell plus the viewer marker.
use crate::core::maze::{Cell, Map};
use crate::core::player::KinematicState;
use crate::render::framebuffer::{Color, PixelSink};

fn draw_cell(sink: &mut impl PixelSink, xo: u32, yo: u32, block_size: u32, cell: Cell) {
    let color = match cell {
        Cell::Wall => Color::WHITE,
        Cell::Empty => Color::BLACK,
    };
    sink.fill_rect(
        xo,
        yo,
        xo.saturating_add(block_size),
        yo.saturating_add(block_size),
        color,
    );
}

/// Blits the map at the top-left corner with `block_size` pixels per cell.
/// A `block_size` of zero draws nothing.
pub fn draw_minimap(sink: &mut impl PixelSink, map: &Map, state: &KinematicState, block_size: u32) {
    if block_size == 0 {
        return;
    }

    for (x, y, cell) in map.iter() {
        let xo = (x as u32).saturating_mul(block_size);
        let yo = (y as u32).saturating_mul(block_size);
        draw_cell(sink, xo, yo, block_size, cell);
    }

    let px = (state.pos.x * f64::from(block_size)) as i64;
    let py = (state.pos.y * f64::from(block_size)) as i64;
    let half = i64::from(block_size / 2);
    let clip = |v: i64| v.clamp(0, i64::from(u32::MAX)) as u32;
    sink.fill_rect(
        clip(px - half),
        clip(py - half),
        clip(px + half),
        clip(py + half),
        Color::RED,
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::render::framebuffer::Framebuffer;

    #[test]
    fn blits_cells_and_marker() {
        let map = Map::reference();
        let mut fb = Framebuffer::new(100, 100);
        let state = KinematicState::spawn();
        draw_minimap(&mut fb, &map, &state, 4);

        // border wall, open floor, the (2, 2) pillar
        assert_eq!(fb.get_pixel(1, 1), Color::WHITE);
        assert_eq!(fb.get_pixel(5, 5), Color::BLACK);
        assert_eq!(fb.get_pixel(9, 9), Color::WHITE);
        // viewer at (2, 8) -> pixel (8, 32), marker spans 6..10
        assert_eq!(fb.get_pixel(8, 32), Color::RED);
        assert_eq!(fb.get_pixel(6, 30), Color::RED);
        assert_eq!(fb.get_pixel(10, 34), Color::BLACK);
        // nothing drawn past the 64px map
        assert_eq!(fb.get_pixel(70, 70), Color::BACKGROUND);
    }

    #[test]
    fn zero_block_size_is_disabled() {
        let map = Map::reference();
        let mut fb = Framebuffer::new(20, 20);
        draw_minimap(&mut fb, &map, &KinematicState::spawn(), 0);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::BACKGROUND));
    }

    #[test]
    fn oversized_blocks_fill_the_buffer_with_the_corner_cell() {
        let map = Map::reference();
        let mut fb = Framebuffer::new(4, 4);
        draw_minimap(&mut fb, &map, &KinematicState::spawn(), 400_000_000);
        assert!(fb.color_buffer.iter().all(|&c| c == Color::WHITE));
    }
}
