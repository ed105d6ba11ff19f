//! Click Handler
//!
//! Discrete button input. `/tap` clicks on a pressed value; `/left` and
//! `/right` track press/release state so repeated press messages never
//! produce duplicate button-downs.

use super::Handler;
use crate::actuate::Actuator;
use crate::dispatch::Message;
use crate::gesture::MouseButton;
use crate::Result;
use tracing::debug;

#[derive(Default)]
pub struct ClickHandler {
    left_held: bool,
    right_held: bool,
}

impl ClickHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle_hold(
        &mut self,
        button: MouseButton,
        pressed: bool,
        actuator: &mut dyn Actuator,
    ) -> Result<()> {
        let held = match button {
            MouseButton::Left => &mut self.left_held,
            MouseButton::Right => &mut self.right_held,
            MouseButton::Middle => return Ok(()),
        };
        match (pressed, *held) {
            (true, false) => {
                *held = true;
                actuator.button_down(button)
            }
            (false, true) => {
                *held = false;
                actuator.button_up(button)
            }
            // Repeated press or release: state already matches
            _ => Ok(()),
        }
    }
}

impl Handler for ClickHandler {
    fn name(&self) -> &str {
        "click"
    }

    fn patterns(&self) -> Vec<String> {
        vec!["/tap".to_string(), "/left".to_string(), "/right".to_string()]
    }

    fn handle(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()> {
        let Some(pressed) = message.arg_bool(0) else {
            debug!(address = %message.address, "Missing button state");
            return Ok(());
        };

        match message.address.as_str() {
            "/tap" => {
                if pressed {
                    actuator.click(MouseButton::Left)?;
                }
                Ok(())
            }
            "/left" => self.handle_hold(MouseButton::Left, pressed, actuator),
            "/right" => self.handle_hold(MouseButton::Right, pressed, actuator),
            _ => Ok(()),
        }
    }

    fn reset(&mut self, actuator: &mut dyn Actuator) {
        // Release anything still held; failures here are already logged at
        // the actuation boundary and there is nothing further to do.
        if self.left_held {
            self.left_held = false;
            let _ = actuator.button_up(MouseButton::Left);
        }
        if self.right_held {
            self.right_held = false;
            let _ = actuator.button_up(MouseButton::Right);
        }
    }
}
