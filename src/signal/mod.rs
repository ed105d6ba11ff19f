//! Signal-processing core
//!
//! This module transforms raw normalized input samples into cursor velocity:
//! - Deadzone normalization (radial or per-axis)
//! - Power-law velocity curves with per-channel gain and exponent
//! - Named channel pipelines (deadzone → curve)
//! - Order-independent multi-source integration with fractional-pixel carry

pub mod channel;
pub mod curve;
pub mod deadzone;
pub mod integrator;

pub use channel::{CarryResponse, SourceChannel};
pub use curve::{ResponseCurve, VelocityCurve};
pub use deadzone::{Deadzone, DeadzoneMode};
pub use integrator::{sum_velocities, MotionIntegrator};

/// A 2D vector in normalized input space or velocity space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean magnitude
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scale both components by a factor
    pub fn scale(&self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    /// Component-wise clamp to [-1, 1]
    pub fn clamp_unit(&self) -> Vec2 {
        Vec2::new(self.x.clamp(-1.0, 1.0), self.y.clamp(-1.0, 1.0))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
