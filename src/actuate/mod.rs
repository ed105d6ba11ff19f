//! OS actuation boundary
//!
//! Everything above this module computes *what* should happen to the desktop;
//! this module is the only place that touches the OS input stack. The
//! [`Actuator`] trait is the seam: the real implementation injects events
//! through `enigo`, and the recording implementation captures them for
//! dry-run mode and tests.

pub mod desktop;
pub mod recording;

pub use desktop::DesktopActuator;
pub use recording::{Action, RecordingActuator};

use crate::gesture::MouseButton;
use crate::Result;

/// Keyboard modifier for chords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Command,
    Control,
    Alt,
    Shift,
}

/// The OS input seam.
///
/// All methods are fallible; callers propagate errors to the dispatcher,
/// which logs and resets the offending handler.
pub trait Actuator {
    /// Move the pointer by whole pixels.
    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()>;

    /// Move the pointer to absolute screen coordinates.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;

    /// Press and release a button.
    fn click(&mut self, button: MouseButton) -> Result<()>;

    fn button_down(&mut self, button: MouseButton) -> Result<()>;

    fn button_up(&mut self, button: MouseButton) -> Result<()>;

    /// Scroll by whole lines; positive `dy` scrolls down.
    fn scroll_by(&mut self, dx: i32, dy: i32) -> Result<()>;

    /// Type a text string as keyboard input.
    fn type_text(&mut self, text: &str) -> Result<()>;

    /// Press a key with modifiers held (e.g. zoom shortcuts).
    fn key_chord(&mut self, modifiers: &[Modifier], key: char) -> Result<()>;

    /// Primary display size in pixels.
    fn screen_size(&mut self) -> Result<(i32, i32)>;
}
