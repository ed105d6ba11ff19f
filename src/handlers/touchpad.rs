//! Touchpad Handler
//!
//! Multi-touch frames arrive on `/multixy x1 y1 [x2 y2]` (an empty argument
//! list means all contacts lifted). Frames run through the
//! [`GestureRecognizer`]; the resulting intents are actuated here:
//!
//! - `Click` → button click
//! - `CarryBegin`/`CarryEnd` → drag via button down/up
//! - `Move` → relative pointer motion, translated by the touch channel's
//!   carry response and scaled to screen pixels with fractional carry
//! - `ScrollBy` → whole scroll lines with fractional carry
//! - `ZoomBy` → Cmd+= / Cmd+- key chords
//! - `RotateBy` → logged only; there is no OS rotation primitive
//!
//! `/multixy/tap` is the sender's explicit two-finger tap and maps to a
//! right click.

use super::Handler;
use crate::actuate::{Actuator, Modifier};
use crate::app::config::Config;
use crate::dispatch::Message;
use crate::gesture::{GestureRecognizer, GestureThresholds, Intent, MouseButton, TouchFrame};
use crate::signal::{CarryResponse, Deadzone, MotionIntegrator, SourceChannel, Vec2, VelocityCurve};
use crate::Result;
use std::time::Instant;
use tracing::debug;

pub struct TouchpadHandler {
    recognizer: GestureRecognizer,
    /// Translation for carry motion (direct or curved)
    touch_channel: SourceChannel,
    move_accum: MotionIntegrator,
    scroll_accum: MotionIntegrator,
    scroll_gain: f64,
    epoch: Instant,
    dragging: bool,
}

impl TouchpadHandler {
    pub fn new(config: &Config) -> Self {
        let thresholds = GestureThresholds {
            tap_max_ms: config.gesture.tap_max_ms,
            motion_noise_floor: config.gesture.motion_noise_floor,
            pinch_sensitivity: config.gesture.pinch_sensitivity,
            rotate_sensitivity: config.gesture.rotate_sensitivity,
        };
        // The optional "touch" channel configures carry translation; absent,
        // carry is direct 1:1.
        let touch_channel = match config.channels.get("touch") {
            Some(channel) => super::build_channel("touch", channel),
            None => SourceChannel::new(
                "touch",
                Deadzone::radial(0.0),
                VelocityCurve::new(1.0, 1),
                CarryResponse::Direct,
            ),
        };
        Self {
            recognizer: GestureRecognizer::new(thresholds),
            touch_channel,
            move_accum: MotionIntegrator::new(),
            scroll_accum: MotionIntegrator::new(),
            scroll_gain: config.gesture.scroll_gain,
            epoch: Instant::now(),
            dragging: false,
        }
    }

    fn parse_frame(&self, message: &Message) -> Option<TouchFrame> {
        let timestamp_ms = self.epoch.elapsed().as_millis() as u64;
        if message.args.is_empty() {
            return Some(TouchFrame::empty(timestamp_ms));
        }

        let mut contacts = Vec::new();
        let mut index = 0;
        while let (Some(x), Some(y)) = (message.arg_f64(index), message.arg_f64(index + 1)) {
            // Sender y points up, screen y points down
            contacts.push(Vec2::new(x, 1.0 - y));
            index += 2;
        }
        if contacts.is_empty() {
            debug!(args = message.args.len(), "Unparseable touch frame");
            return None;
        }
        Some(TouchFrame::new(contacts, timestamp_ms))
    }

    fn actuate(&mut self, intent: Intent, actuator: &mut dyn Actuator) -> Result<()> {
        match intent {
            Intent::Click(button) => actuator.click(button),
            Intent::CarryBegin => {
                self.dragging = true;
                actuator.button_down(MouseButton::Left)
            }
            Intent::CarryEnd => {
                self.dragging = false;
                actuator.button_up(MouseButton::Left)
            }
            Intent::Move { dx, dy } => {
                let (width, height) = actuator.screen_size()?;
                let translated = self.touch_channel.carry_delta(Vec2::new(dx, dy));
                let pixels = Vec2::new(
                    translated.x * width as f64,
                    translated.y * height as f64,
                );
                let (px, py) = self.move_accum.integrate(pixels);
                if px != 0 || py != 0 {
                    actuator.move_by(px, py)?;
                }
                Ok(())
            }
            Intent::ScrollBy { dx, dy } => {
                let (lx, ly) = self.scroll_accum.integrate(Vec2::new(
                    dx * self.scroll_gain,
                    dy * self.scroll_gain,
                ));
                if lx != 0 || ly != 0 {
                    actuator.scroll_by(lx, ly)?;
                }
                Ok(())
            }
            Intent::ZoomBy { factor } => {
                let key = if factor > 1.0 { '=' } else { '-' };
                actuator.key_chord(&[Modifier::Command], key)
            }
            Intent::RotateBy { radians } => {
                debug!(radians, "Rotation recognized (no actuation primitive)");
                Ok(())
            }
        }
    }
}

impl Handler for TouchpadHandler {
    fn name(&self) -> &str {
        "touchpad"
    }

    fn patterns(&self) -> Vec<String> {
        vec!["/multixy".to_string(), "/multixy/tap".to_string()]
    }

    fn handle(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()> {
        match message.address.as_str() {
            "/multixy" => {
                let Some(frame) = self.parse_frame(message) else {
                    return Ok(());
                };
                for intent in self.recognizer.update(&frame) {
                    self.actuate(intent, actuator)?;
                }
                Ok(())
            }
            "/multixy/tap" => actuator.click(MouseButton::Right),
            _ => Ok(()),
        }
    }

    fn reset(&mut self, actuator: &mut dyn Actuator) {
        self.recognizer.reset();
        if self.dragging {
            self.dragging = false;
            let _ = actuator.button_up(MouseButton::Left);
        }
        self.move_accum.reset();
        self.scroll_accum.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuate::{Action, RecordingActuator};
    use crate::dispatch::Value;
    use std::thread::sleep;
    use std::time::Duration;

    /// Config with a short tap window so carry tests stay fast.
    fn test_config() -> Config {
        let mut config = Config::default();
        config.gesture.tap_max_ms = 30;
        config
    }

    fn touch(x: f64, y: f64) -> Message {
        Message::new("/multixy", vec![Value::Float(x), Value::Float(y)])
    }

    fn touch2(a: (f64, f64), b: (f64, f64)) -> Message {
        Message::new(
            "/multixy",
            vec![
                Value::Float(a.0),
                Value::Float(a.1),
                Value::Float(b.0),
                Value::Float(b.1),
            ],
        )
    }

    fn release() -> Message {
        Message::new("/multixy", vec![])
    }

    #[test]
    fn test_quick_tap_clicks() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::new();

        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();
        h.handle(&release(), &mut actuator).unwrap();

        assert_eq!(actuator.actions(), &[Action::Click(MouseButton::Left)]);
    }

    #[test]
    fn test_hold_drag_release() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::with_screen(1000, 1000);

        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();
        sleep(Duration::from_millis(40));

        // Past the tap window: drag begins
        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();
        assert_eq!(actuator.actions(), &[Action::ButtonDown(MouseButton::Left)]);

        // 0.1 normalized → 100 px on a 1000 px screen; sender y up means the
        // cursor moves down when y decreases
        h.handle(&touch(0.6, 0.4), &mut actuator).unwrap();
        assert_eq!(actuator.total_movement(), (100, 100));

        h.handle(&release(), &mut actuator).unwrap();
        let last = actuator.actions().last().unwrap().clone();
        assert_eq!(last, Action::ButtonUp(MouseButton::Left));
    }

    #[test]
    fn test_two_finger_scroll() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::new();

        h.handle(&touch2((0.4, 0.5), (0.6, 0.5)), &mut actuator).unwrap();
        // Centroid rises by 0.1 in sender space → screen dy = +0.1 down?
        // No: sender y up, so moving fingers up (y 0.5→0.6) is screen dy -0.1.
        h.handle(&touch2((0.4, 0.6), (0.6, 0.6)), &mut actuator).unwrap();

        // 0.1 * scroll_gain 40 = 4 lines, upward
        assert_eq!(actuator.actions(), &[Action::ScrollBy { dx: 0, dy: -4 }]);
    }

    #[test]
    fn test_pinch_zoom_chord() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::new();

        h.handle(&touch2((0.4, 0.5), (0.6, 0.5)), &mut actuator).unwrap();
        h.handle(&touch2((0.3, 0.5), (0.7, 0.5)), &mut actuator).unwrap();

        assert_eq!(
            actuator.actions(),
            &[Action::KeyChord {
                modifiers: vec![Modifier::Command],
                key: '=',
            }]
        );

        // Pinching back in zooms out
        h.handle(&touch2((0.42, 0.5), (0.58, 0.5)), &mut actuator).unwrap();
        assert_eq!(
            actuator.actions().last().unwrap(),
            &Action::KeyChord {
                modifiers: vec![Modifier::Command],
                key: '-',
            }
        );
    }

    #[test]
    fn test_two_finger_tap_right_clicks() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::new();
        h.handle(&Message::new("/multixy/tap", vec![]), &mut actuator)
            .unwrap();
        assert_eq!(actuator.actions(), &[Action::Click(MouseButton::Right)]);
    }

    #[test]
    fn test_malformed_frame_ignored() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::new();
        h.handle(
            &Message::new("/multixy", vec![Value::Str("bad".into())]),
            &mut actuator,
        )
        .unwrap();
        assert!(actuator.actions().is_empty());
    }

    #[test]
    fn test_reset_releases_active_drag() {
        let mut h = TouchpadHandler::new(&test_config());
        let mut actuator = RecordingActuator::new();

        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();
        sleep(Duration::from_millis(40));
        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();
        assert_eq!(actuator.actions(), &[Action::ButtonDown(MouseButton::Left)]);

        h.reset(&mut actuator);
        assert_eq!(
            actuator.actions().last().unwrap(),
            &Action::ButtonUp(MouseButton::Left)
        );

        // Fully idle afterwards: a release frame emits nothing
        actuator.clear();
        h.handle(&release(), &mut actuator).unwrap();
        assert!(actuator.actions().is_empty());
    }

    #[test]
    fn test_curved_carry_translation() {
        let mut config = test_config();
        config.channels.insert(
            "touch".to_string(),
            crate::app::config::ChannelConfig {
                gain: 2.0,
                exponent: 1,
                deadzone: 0.0,
                carry_response: CarryResponse::Curved,
            },
        );
        let mut h = TouchpadHandler::new(&config);
        let mut actuator = RecordingActuator::with_screen(1000, 1000);

        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();
        sleep(Duration::from_millis(40));
        h.handle(&touch(0.5, 0.5), &mut actuator).unwrap();

        // 0.1 normalized through gain-2 linear curve → 0.2 → 200 px
        h.handle(&touch(0.6, 0.5), &mut actuator).unwrap();
        assert_eq!(actuator.total_movement(), (200, 0));
    }
}
