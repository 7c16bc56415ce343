use std::ops::{Add, AddAssign, Mul, Sub};

/// Point or displacement in map units (one unit = one cell).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector for a heading in degrees. 0° points along +y, 90° along +x.
    #[inline]
    pub fn from_heading(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(sin, cos)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Reduces an angle in degrees to `[0, 360)`.
#[inline]
pub fn wrap360(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Viewer kinematics, integrated once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    pub pos: Vec2,
    /// Facing in degrees, not normalized between frames.
    pub a: f64,
    /// Map units per frame.
    pub vel: Vec2,
    /// Degrees per frame.
    pub look_vel: f64,
}

impl KinematicState {
    pub fn new(x: f64, y: f64, angle: f64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            a: angle,
            vel: Vec2::ZERO,
            look_vel: 0.0,
        }
    }

    /// Reference spawn: cell (2, 8) facing +y.
    pub fn spawn() -> Self {
        Self::new(2.0, 8.0, 0.0)
    }

    pub fn facing(&self) -> Vec2 {
        Vec2::from_heading(self.a)
    }
}

impl Default for KinematicState {
    fn default() -> Self {
        Self::spawn()
    }
}
