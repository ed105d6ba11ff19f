//! Gesture Intents
//!
//! The recognizer's classified output. Each intent is produced once and
//! consumed by exactly one handler; nothing downstream retains them.

use serde::{Deserialize, Serialize};

/// Mouse buttons addressable by handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Classified gesture output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Relative pointer motion in normalized units
    Move { dx: f64, dy: f64 },
    /// Discrete click
    Click(MouseButton),
    /// Two-finger scroll delta in normalized units
    ScrollBy { dx: f64, dy: f64 },
    /// Pinch: ratio of current to previous contact separation
    ZoomBy { factor: f64 },
    /// Rotation of the contact pair bearing, radians
    RotateBy { radians: f64 },
    /// Held contact crossed the hold threshold; drag begins
    CarryBegin,
    /// Held contact released; drag ends
    CarryEnd,
}

impl Intent {
    /// Whether this intent produces continuous motion (as opposed to a
    /// discrete state change).
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Intent::Move { .. } | Intent::ScrollBy { .. } | Intent::ZoomBy { .. } | Intent::RotateBy { .. }
        )
    }
}
