//! Multi-touch gesture recognition
//!
//! Consumes frames of normalized touch contacts and classifies them into
//! discrete intents: tap, hold/carry, two-finger scroll, pinch, and rotate.

pub mod intent;
pub mod recognizer;
pub mod touch;

pub use intent::{Intent, MouseButton};
pub use recognizer::{GestureRecognizer, GestureThresholds};
pub use touch::TouchFrame;
