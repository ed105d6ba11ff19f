//! Desktop Actuation via enigo
//!
//! Injects pointer and keyboard events into the running desktop session.
//! The enigo backend is initialized lazily on first use; if initialization
//! fails (headless CI, missing permissions), the actuator degrades to
//! logging what it would have done instead of erroring on every call.

use super::{Actuator, Modifier};
use crate::gesture::MouseButton;
use crate::{Error, Result};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use tracing::{debug, warn};

/// Screen size reported when the backend is unavailable.
const FALLBACK_SCREEN: (i32, i32) = (1920, 1080);

/// Real OS actuator backed by enigo.
pub struct DesktopActuator {
    enigo: Option<Enigo>,
    /// Set after a failed initialization so we only warn once.
    degraded: bool,
}

impl DesktopActuator {
    pub fn new() -> Self {
        Self {
            enigo: None,
            degraded: false,
        }
    }

    /// Lazily initialize the enigo backend.
    ///
    /// Returns the live instance, or None when running degraded.
    fn backend(&mut self) -> Option<&mut Enigo> {
        if self.enigo.is_none() && !self.degraded {
            match Enigo::new(&Settings::default()) {
                Ok(enigo) => {
                    debug!("Input injection backend initialized");
                    self.enigo = Some(enigo);
                }
                Err(err) => {
                    warn!(error = %err, "Input backend unavailable; actions will be logged only");
                    self.degraded = true;
                }
            }
        }
        self.enigo.as_mut()
    }
}

impl Default for DesktopActuator {
    fn default() -> Self {
        Self::new()
    }
}

fn map_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn map_modifier(modifier: Modifier) -> Key {
    match modifier {
        Modifier::Command => Key::Meta,
        Modifier::Control => Key::Control,
        Modifier::Alt => Key::Alt,
        Modifier::Shift => Key::Shift,
    }
}

fn input_err(err: impl std::fmt::Display) -> Error {
    Error::Actuation(err.to_string())
}

impl Actuator for DesktopActuator {
    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        match self.backend() {
            Some(enigo) => enigo.move_mouse(dx, dy, Coordinate::Rel).map_err(input_err),
            None => {
                debug!(dx, dy, "move_by (degraded)");
                Ok(())
            }
        }
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        match self.backend() {
            Some(enigo) => enigo.move_mouse(x, y, Coordinate::Abs).map_err(input_err),
            None => {
                debug!(x, y, "move_to (degraded)");
                Ok(())
            }
        }
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        match self.backend() {
            Some(enigo) => enigo
                .button(map_button(button), Direction::Click)
                .map_err(input_err),
            None => {
                debug!(?button, "click (degraded)");
                Ok(())
            }
        }
    }

    fn button_down(&mut self, button: MouseButton) -> Result<()> {
        match self.backend() {
            Some(enigo) => enigo
                .button(map_button(button), Direction::Press)
                .map_err(input_err),
            None => {
                debug!(?button, "button_down (degraded)");
                Ok(())
            }
        }
    }

    fn button_up(&mut self, button: MouseButton) -> Result<()> {
        match self.backend() {
            Some(enigo) => enigo
                .button(map_button(button), Direction::Release)
                .map_err(input_err),
            None => {
                debug!(?button, "button_up (degraded)");
                Ok(())
            }
        }
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        let enigo = match self.backend() {
            Some(enigo) => enigo,
            None => {
                debug!(dx, dy, "scroll_by (degraded)");
                return Ok(());
            }
        };
        if dx != 0 {
            enigo.scroll(dx, Axis::Horizontal).map_err(input_err)?;
        }
        if dy != 0 {
            enigo.scroll(dy, Axis::Vertical).map_err(input_err)?;
        }
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        match self.backend() {
            Some(enigo) => enigo.text(text).map_err(input_err),
            None => {
                debug!(len = text.len(), "type_text (degraded)");
                Ok(())
            }
        }
    }

    fn key_chord(&mut self, modifiers: &[Modifier], key: char) -> Result<()> {
        let enigo = match self.backend() {
            Some(enigo) => enigo,
            None => {
                debug!(?modifiers, key = %key, "key_chord (degraded)");
                return Ok(());
            }
        };
        for modifier in modifiers {
            enigo
                .key(map_modifier(*modifier), Direction::Press)
                .map_err(input_err)?;
        }
        let result = enigo.key(Key::Unicode(key), Direction::Click).map_err(input_err);
        // Release held modifiers even if the key itself failed
        for modifier in modifiers.iter().rev() {
            enigo
                .key(map_modifier(*modifier), Direction::Release)
                .map_err(input_err)?;
        }
        result
    }

    fn screen_size(&mut self) -> Result<(i32, i32)> {
        match self.backend() {
            Some(enigo) => enigo.main_display().map_err(input_err),
            None => Ok(FALLBACK_SCREEN),
        }
    }
}
