//! Deadzone Normalization
//!
//! Removes sensor noise near the rest position of an analog input and
//! rescales the remaining range so the output magnitude starts at zero on the
//! deadzone boundary and reaches 1.0 at full deflection. Direction is
//! preserved. Out-of-range inputs are clamped rather than rejected, because
//! live input streams routinely contain transient noise.

use super::Vec2;
use serde::{Deserialize, Serialize};

/// How the deadzone is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DeadzoneMode {
    /// Euclidean magnitude of the whole sample (stick-style input)
    #[default]
    Radial,
    /// Each axis gated independently
    PerAxis,
}

/// Deadzone filter for one input channel
#[derive(Debug, Clone, Copy)]
pub struct Deadzone {
    radius: f64,
    mode: DeadzoneMode,
}

impl Deadzone {
    /// Create a radial deadzone. The radius is clamped to [0, 1).
    pub fn radial(radius: f64) -> Self {
        Self::new(radius, DeadzoneMode::Radial)
    }

    /// Create a deadzone with an explicit mode. The radius is clamped to [0, 1).
    pub fn new(radius: f64, mode: DeadzoneMode) -> Self {
        Self {
            radius: clamp_radius(radius),
            mode,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Apply the deadzone to a raw sample.
    ///
    /// Returns the exact zero vector for any sample inside the deadzone.
    /// Outside it, magnitude is rebased so radius→0 and 1→1 while the
    /// direction of the input is unchanged.
    pub fn apply(&self, raw: Vec2) -> Vec2 {
        let raw = raw.clamp_unit();
        match self.mode {
            DeadzoneMode::Radial => self.apply_radial(raw),
            DeadzoneMode::PerAxis => Vec2::new(self.rebase(raw.x), self.rebase(raw.y)),
        }
    }

    fn apply_radial(&self, raw: Vec2) -> Vec2 {
        let magnitude = raw.magnitude().min(1.0);
        if magnitude <= self.radius || magnitude == 0.0 {
            return Vec2::ZERO;
        }
        let rebased = (magnitude - self.radius) / (1.0 - self.radius);
        raw.scale(rebased / magnitude)
    }

    fn rebase(&self, value: f64) -> f64 {
        let magnitude = value.abs();
        if magnitude <= self.radius {
            return 0.0;
        }
        ((magnitude - self.radius) / (1.0 - self.radius)).copysign(value)
    }
}

impl Default for Deadzone {
    fn default() -> Self {
        Self::radial(0.1)
    }
}

/// Radius 1.0 would make the rescale divide by zero; cap just below.
fn clamp_radius(radius: f64) -> f64 {
    if radius.is_nan() {
        return 0.0;
    }
    radius.clamp(0.0, 0.999)
}
