//! Recording Actuator
//!
//! Captures every action instead of injecting it. Used by dry-run mode and
//! by tests that assert on the exact action sequence a pipeline produces.

use super::{Actuator, Modifier};
use crate::gesture::MouseButton;
use crate::Result;

/// One recorded actuation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MoveBy { dx: i32, dy: i32 },
    MoveTo { x: i32, y: i32 },
    Click(MouseButton),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    ScrollBy { dx: i32, dy: i32 },
    TypeText(String),
    KeyChord { modifiers: Vec<Modifier>, key: char },
}

/// Actuator that records actions and tracks a virtual cursor.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    actions: Vec<Action>,
    cursor: (i32, i32),
    screen: (i32, i32),
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            cursor: (0, 0),
            screen: (1920, 1080),
        }
    }

    pub fn with_screen(width: i32, height: i32) -> Self {
        Self {
            screen: (width, height),
            ..Self::new()
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Position of the virtual cursor after all recorded moves.
    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// All text typed, in order.
    pub fn typed_text(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::TypeText(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Net pixel displacement across all relative moves.
    pub fn total_movement(&self) -> (i32, i32) {
        self.actions.iter().fold((0, 0), |(x, y), a| match a {
            Action::MoveBy { dx, dy } => (x + dx, y + dy),
            _ => (x, y),
        })
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

impl Actuator for RecordingActuator {
    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.cursor.0 += dx;
        self.cursor.1 += dy;
        self.actions.push(Action::MoveBy { dx, dy });
        Ok(())
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.cursor = (x, y);
        self.actions.push(Action::MoveTo { x, y });
        Ok(())
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.actions.push(Action::Click(button));
        Ok(())
    }

    fn button_down(&mut self, button: MouseButton) -> Result<()> {
        self.actions.push(Action::ButtonDown(button));
        Ok(())
    }

    fn button_up(&mut self, button: MouseButton) -> Result<()> {
        self.actions.push(Action::ButtonUp(button));
        Ok(())
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.actions.push(Action::ScrollBy { dx, dy });
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        self.actions.push(Action::TypeText(text.to_string()));
        Ok(())
    }

    fn key_chord(&mut self, modifiers: &[Modifier], key: char) -> Result<()> {
        self.actions.push(Action::KeyChord {
            modifiers: modifiers.to_vec(),
            key,
        });
        Ok(())
    }

    fn screen_size(&mut self) -> Result<(i32, i32)> {
        Ok(self.screen)
    }
}
