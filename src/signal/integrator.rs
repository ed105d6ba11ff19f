//! Multi-Source Integration
//!
//! Sums the per-tick velocity contributions of all active channels into one
//! cursor delta, then converts the floating-point delta into integer pixel
//! moves. Sub-pixel remainders are carried across ticks so slow, fine motion
//! is not truncated away.

use super::Vec2;

/// Sum channel velocities for one tick.
///
/// Pure vector addition: associative and order-independent, so channel
/// evaluation order never affects the cursor delta.
pub fn sum_velocities<I>(velocities: I) -> Vec2
where
    I: IntoIterator<Item = Vec2>,
{
    velocities
        .into_iter()
        .fold(Vec2::ZERO, |acc, v| acc + v)
}

/// Converts per-tick velocity into whole-pixel cursor moves, carrying the
/// fractional remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionIntegrator {
    accum: Vec2,
}

impl MotionIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add this tick's delta and return the whole pixels to move now.
    pub fn integrate(&mut self, delta: Vec2) -> (i32, i32) {
        self.accum += delta;

        let px = self.accum.x.trunc();
        let py = self.accum.y.trunc();
        self.accum.x -= px;
        self.accum.y -= py;

        (px as i32, py as i32)
    }

    /// Discard any accumulated sub-pixel remainder.
    pub fn reset(&mut self) {
        self.accum = Vec2::ZERO;
    }
}
