//! Gesture Recognition
//!
//! A state machine over contact count and elapsed time. Single contacts
//! disambiguate into tap (quick release, little motion) or carry (held past
//! the tap window, then dragged); two contacts produce scroll, pinch, and
//! rotate intents from the relative motion of the pair.
//!
//! The tie-break policy favors carry over click: a contact that outlives the
//! tap window never produces a click, even on release, so slow lifts cannot
//! fire phantom clicks.

use super::intent::{Intent, MouseButton};
use super::touch::TouchFrame;
use crate::signal::Vec2;
use serde::{Deserialize, Serialize};

/// Timing and sensitivity thresholds, loaded from configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureThresholds {
    /// Maximum press duration that still counts as a tap (ms)
    pub tap_max_ms: u64,
    /// Displacement below which motion is treated as sensor jitter
    /// (normalized units)
    pub motion_noise_floor: f64,
    /// Minimum span change that registers as a pinch (normalized units)
    pub pinch_sensitivity: f64,
    /// Minimum bearing change that registers as rotation (radians)
    pub rotate_sensitivity: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            tap_max_ms: 250,
            motion_noise_floor: 0.01,
            pinch_sensitivity: 0.02,
            rotate_sensitivity: 0.05,
        }
    }
}

/// Current classification of the contact session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Carrying,
    TwoTouch,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    Pending {
        anchor: Vec2,
        last: Vec2,
        started_ms: u64,
        /// Cleared when displacement exceeds the noise floor, or when the
        /// contact survived a two-touch session (re-anchor must not tap).
        tap_eligible: bool,
    },
    Carrying {
        last: Vec2,
    },
    TwoTouch {
        centroid: Vec2,
        span: f64,
        bearing: f64,
    },
}

/// Multi-touch gesture recognizer.
///
/// Owns its state exclusively; callers feed it one [`TouchFrame`] at a time
/// and receive the intents recognized by that frame.
#[derive(Debug)]
pub struct GestureRecognizer {
    thresholds: GestureThresholds,
    state: State,
}

impl GestureRecognizer {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            state: State::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Pending { .. } => Phase::Pending,
            State::Carrying { .. } => Phase::Carrying,
            State::TwoTouch { .. } => Phase::TwoTouch,
        }
    }

    /// Force the state machine back to Idle (session loss, handler reset).
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Advance the state machine by one frame.
    pub fn update(&mut self, frame: &TouchFrame) -> Vec<Intent> {
        let mut intents = Vec::new();
        let count = frame.contact_count();
        let now = frame.timestamp_ms;

        self.state = match self.state {
            State::Idle => match count {
                0 => State::Idle,
                1 => pending(frame.contacts[0], now, true),
                _ => two_touch(frame),
            },

            State::Pending {
                anchor,
                started_ms,
                tap_eligible,
                ..
            } => match count {
                0 => {
                    let elapsed = now.saturating_sub(started_ms);
                    if tap_eligible && elapsed <= self.thresholds.tap_max_ms {
                        intents.push(Intent::Click(MouseButton::Left));
                    }
                    // A lift past the tap window emits nothing: carry wins
                    // the tie-break, and carry never began.
                    State::Idle
                }
                1 => {
                    let p = frame.contacts[0];
                    let moved = (p - anchor).magnitude() > self.thresholds.motion_noise_floor;
                    let elapsed = now.saturating_sub(started_ms);

                    if elapsed >= self.thresholds.tap_max_ms {
                        intents.push(Intent::CarryBegin);
                        State::Carrying { last: p }
                    } else {
                        State::Pending {
                            anchor,
                            last: p,
                            started_ms,
                            tap_eligible: tap_eligible && !moved,
                        }
                    }
                }
                _ => two_touch(frame),
            },

            State::Carrying { last } => match count {
                0 => {
                    intents.push(Intent::CarryEnd);
                    State::Idle
                }
                1 => {
                    let p = frame.contacts[0];
                    let delta = p - last;
                    if delta.x != 0.0 || delta.y != 0.0 {
                        intents.push(Intent::Move {
                            dx: delta.x,
                            dy: delta.y,
                        });
                    }
                    State::Carrying { last: p }
                }
                _ => {
                    // Close the open carry before the pair takes over.
                    intents.push(Intent::CarryEnd);
                    two_touch(frame)
                }
            },

            State::TwoTouch {
                centroid,
                span,
                bearing,
            } => match count {
                0 => State::Idle,
                1 => {
                    // One finger lingers: re-anchor with the tap suppressed so
                    // the leftover contact can never fire a spurious click.
                    pending(frame.contacts[0], now, false)
                }
                _ => {
                    self.emit_pair_intents(frame, centroid, span, bearing, &mut intents);
                    two_touch(frame)
                }
            },
        };

        intents
    }

    fn emit_pair_intents(
        &self,
        frame: &TouchFrame,
        prev_centroid: Vec2,
        prev_span: f64,
        prev_bearing: f64,
        intents: &mut Vec<Intent>,
    ) {
        let floor = self.thresholds.motion_noise_floor;

        if let Some(c) = frame.centroid() {
            let delta = c - prev_centroid;
            // Per-axis noise gate: a jittery axis contributes zero instead of
            // being amplified downstream.
            let dx = if delta.x.abs() > floor { delta.x } else { 0.0 };
            let dy = if delta.y.abs() > floor { delta.y } else { 0.0 };
            if dx != 0.0 || dy != 0.0 {
                intents.push(Intent::ScrollBy { dx, dy });
            }
        }

        if let Some(span) = frame.span() {
            if prev_span > f64::EPSILON
                && (span - prev_span).abs() > self.thresholds.pinch_sensitivity
            {
                intents.push(Intent::ZoomBy {
                    factor: span / prev_span,
                });
            }
        }

        if let Some(bearing) = frame.bearing() {
            let delta = wrap_angle(bearing - prev_bearing);
            if delta.abs() > self.thresholds.rotate_sensitivity {
                intents.push(Intent::RotateBy { radians: delta });
            }
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureThresholds::default())
    }
}

fn pending(contact: Vec2, now: u64, tap_eligible: bool) -> State {
    State::Pending {
        anchor: contact,
        last: contact,
        started_ms: now,
        tap_eligible,
    }
}

fn two_touch(frame: &TouchFrame) -> State {
    State::TwoTouch {
        centroid: frame.centroid().unwrap_or(Vec2::ZERO),
        span: frame.span().unwrap_or(0.0),
        bearing: frame.bearing().unwrap_or(0.0),
    }
}

/// Normalize an angle difference into (-π, π].
fn wrap_angle(radians: f64) -> f64 {
    use std::f64::consts::PI;
    let wrapped = (radians + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
