use crate::render::render3d::ColumnSlice;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);
    /// Light gray the 3D view is cleared to.
    pub const BACKGROUND: Color = Color::gray(200);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level, 255)
    }
}

/// Anything the renderer can write pixels into.
pub trait PixelSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, color: Color);

    /// Paints one full screen column: background, then the wall slice over it.
    fn draw_column(&mut self, slice: &ColumnSlice, background: Color) {
        let wall = Color::gray(slice.shade);
        let bottom = slice.top + slice.height;
        for y in 0..self.height() {
            let color = if y >= slice.top && y < bottom { wall } else { background };
            self.set_pixel(slice.x, y, color);
        }
    }

    /// Fills `[x0, x1) x [y0, y1)`, clipped to the sink.
    fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        let x1 = x1.min(self.width());
        let y1 = y1.min(self.height());
        for x in x0..x1 {
            for y in y0..y1 {
                self.set_pixel(x, y, color);
            }
        }
    }
}

/// CPU-side RGBA pixel buffer.
pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        let bg = Color::BACKGROUND;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[self.index(x, y)];
        }
        self.background_color
    }

    /// Packs the buffer as RGBA8 rows, top to bottom.
    pub fn to_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color_buffer.len() * 4);
        for c in &self.color_buffer {
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSink for Framebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.color_buffer[i] = color;
        }
    }
}
