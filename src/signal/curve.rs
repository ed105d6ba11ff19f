//! Velocity Curves
//!
//! Two response shapes live here:
//!
//! - [`VelocityCurve`]: the per-channel power law `k * sign(d) * |d|^n` that
//!   converts normalized displacement into per-tick velocity. The exponent is
//!   odd so the curve is symmetric through the origin: soft near zero for
//!   fine control, steep at the edges for fast traversal.
//! - [`ResponseCurve`]: the shaping applied to absolute trackpad positions
//!   (`/trackpad`), selectable at runtime via the `/curve` address.

use super::Vec2;
use serde::{Deserialize, Serialize};

/// Power-law velocity curve with per-channel gain and exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCurve {
    gain: f64,
    exponent: u32,
}

impl VelocityCurve {
    /// Create a curve. Even exponents are rounded up to the next odd value so
    /// direction is always preserved; a zero exponent becomes 1.
    pub fn new(gain: f64, exponent: u32) -> Self {
        let exponent = if exponent == 0 {
            1
        } else if exponent % 2 == 0 {
            exponent + 1
        } else {
            exponent
        };
        Self { gain, exponent }
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// Replace the gain, keeping the exponent. Used by runtime gain trim.
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain;
    }

    /// Apply the curve to a single axis value in [-1, 1].
    pub fn apply(&self, d: f64) -> f64 {
        let d = d.clamp(-1.0, 1.0);
        self.gain * d.abs().powi(self.exponent as i32).copysign(d)
    }

    /// Apply the curve per axis.
    pub fn apply_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(self.apply(v.x), self.apply(v.y))
    }
}

impl Default for VelocityCurve {
    fn default() -> Self {
        Self::new(25.0, 3)
    }
}

/// Shaping for absolute trackpad positioning, centered on 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseCurve {
    /// Pass-through
    #[default]
    Linear,
    /// sign(v) * |v|^1.5 — slower center, faster edges
    Quadratic,
    /// Smoothstep over the full range
    Smooth,
}

impl ResponseCurve {
    /// Parse a curve name as sent over the wire. Unknown names fall back to
    /// linear rather than failing, per the lenient input policy.
    pub fn parse(name: &str) -> Self {
        match name {
            "quadratic" => ResponseCurve::Quadratic,
            "smooth" => ResponseCurve::Smooth,
            _ => ResponseCurve::Linear,
        }
    }

    /// Apply to a value centered on 0 in [-0.5, 0.5].
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            ResponseCurve::Linear => value,
            ResponseCurve::Quadratic => value.abs().powf(1.5).copysign(value),
            ResponseCurve::Smooth => {
                let v = (value + 0.5).clamp(0.0, 1.0);
                let v = v * v * (3.0 - 2.0 * v);
                v - 0.5
            }
        }
    }
}
