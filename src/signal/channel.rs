//! Source Channels
//!
//! A channel is one named input pipeline — deadzone, then power-law curve —
//! bound to a single logical source such as the coarse or fine joystick.
//! Channels hold configuration plus at most one pending sample for the
//! current tick; they carry no cursor state.

use super::curve::VelocityCurve;
use super::deadzone::Deadzone;
use super::Vec2;
use serde::{Deserialize, Serialize};

/// How carry (held-contact drag) motion through this channel is translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CarryResponse {
    /// Pointer moves 1:1 with touch displacement
    #[default]
    Direct,
    /// Carry deltas pass through the channel's velocity curve
    Curved,
}

/// One independently configured input pipeline.
#[derive(Debug, Clone)]
pub struct SourceChannel {
    name: String,
    deadzone: Deadzone,
    curve: VelocityCurve,
    carry_response: CarryResponse,
    /// Latest raw sample, consumed once per tick
    pending: Option<Vec2>,
}

impl SourceChannel {
    pub fn new(
        name: impl Into<String>,
        deadzone: Deadzone,
        curve: VelocityCurve,
        carry_response: CarryResponse,
    ) -> Self {
        Self {
            name: name.into(),
            deadzone,
            curve,
            carry_response,
            pending: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn carry_response(&self) -> CarryResponse {
        self.carry_response
    }

    /// Runtime gain trim (`/joy-left-gain` and friends).
    pub fn set_gain(&mut self, gain: f64) {
        self.curve.set_gain(gain);
    }

    pub fn gain(&self) -> f64 {
        self.curve.gain()
    }

    /// Record the latest raw sample for this tick, replacing any unconsumed one.
    pub fn feed(&mut self, raw: Vec2) {
        self.pending = Some(raw);
    }

    /// Run a raw sample through the full pipeline without touching the
    /// pending slot.
    pub fn velocity(&self, raw: Vec2) -> Vec2 {
        self.curve.apply_vec(self.deadzone.apply(raw))
    }

    /// Consume this tick's sample and return its velocity contribution.
    ///
    /// A channel with no fresh sample contributes zero — stale motion is
    /// never persisted across ticks.
    pub fn take_velocity(&mut self) -> Vec2 {
        match self.pending.take() {
            Some(raw) => self.velocity(raw),
            None => Vec2::ZERO,
        }
    }

    /// Translate a carry delta according to the channel's carry response.
    pub fn carry_delta(&self, delta: Vec2) -> Vec2 {
        match self.carry_response {
            CarryResponse::Direct => delta,
            CarryResponse::Curved => self.curve.apply_vec(delta),
        }
    }

    /// Drop any pending sample.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}
