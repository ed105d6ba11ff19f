//! Cursor Handler
//!
//! Pointer positioning from two kinds of sources:
//!
//! - `/trackpad x y`: absolute positioning. The normalized contact point is
//!   shaped by the configured response curve around screen center, scaled by
//!   the speed multiplier, and clamped to the screen. The sender's y axis
//!   points up, so it is inverted here.
//! - `/<channel> x y` (one address per configured channel, e.g. `/joy-left`):
//!   velocity sources. Each sample runs through its channel's deadzone and
//!   power curve; per tick, all fresh contributions are summed and integrated
//!   into whole-pixel relative moves with fractional carry.
//!
//! Runtime trim addresses: `/speed`, `/curve`, and `/<channel>-gain`.

use super::Handler;
use crate::actuate::Actuator;
use crate::app::config::Config;
use crate::dispatch::Message;
use crate::signal::{sum_velocities, MotionIntegrator, ResponseCurve, SourceChannel, Vec2};
use crate::Result;
use tracing::debug;

pub struct CursorHandler {
    channels: Vec<SourceChannel>,
    integrator: MotionIntegrator,
    speed: f64,
    curve: ResponseCurve,
}

impl CursorHandler {
    pub fn new(config: &Config) -> Self {
        let channels = config
            .channels
            .iter()
            .map(|(name, channel)| super::build_channel(name, channel))
            .collect();
        Self {
            channels,
            integrator: MotionIntegrator::new(),
            speed: config.trackpad.speed,
            curve: config.trackpad.curve,
        }
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut SourceChannel> {
        self.channels.iter_mut().find(|c| c.name() == name)
    }

    fn handle_trackpad(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()> {
        let (Some(x), Some(y)) = (message.arg_f64(0), message.arg_f64(1)) else {
            debug!(address = %message.address, "Missing trackpad coordinates");
            return Ok(());
        };

        let (width, height) = actuator.screen_size()?;

        // Shape around center, apply speed, invert y, clamp to screen
        let sx = 0.5 + self.curve.apply(x.clamp(0.0, 1.0) - 0.5) * self.speed;
        let sy = 0.5 + self.curve.apply(0.5 - y.clamp(0.0, 1.0)) * self.speed;

        let px = (sx.clamp(0.0, 1.0) * (width - 1) as f64).round() as i32;
        let py = (sy.clamp(0.0, 1.0) * (height - 1) as f64).round() as i32;
        actuator.move_to(px, py)
    }

    fn feed_channel(&mut self, name: &str, message: &Message) {
        let (Some(x), Some(y)) = (message.arg_f64(0), message.arg_f64(1)) else {
            debug!(address = %message.address, "Missing channel sample");
            return;
        };
        if let Some(channel) = self.channel_mut(name) {
            // Stick y points up, cursor y points down
            channel.feed(Vec2::new(x, -y));
        }
    }

    fn trim_gain(&mut self, name: &str, message: &Message) {
        let Some(gain) = message.arg_f64(0) else {
            debug!(address = %message.address, "Missing gain value");
            return;
        };
        if gain <= 0.0 || !gain.is_finite() {
            debug!(channel = name, gain, "Ignoring non-positive gain");
            return;
        }
        if let Some(channel) = self.channel_mut(name) {
            channel.set_gain(gain);
            debug!(channel = name, gain, "Gain updated");
        }
    }
}

impl Handler for CursorHandler {
    fn name(&self) -> &str {
        "cursor"
    }

    fn patterns(&self) -> Vec<String> {
        let mut patterns = vec![
            "/trackpad".to_string(),
            "/speed".to_string(),
            "/curve".to_string(),
        ];
        for channel in &self.channels {
            patterns.push(format!("/{}", channel.name()));
            patterns.push(format!("/{}-gain", channel.name()));
        }
        patterns
    }

    fn handle(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()> {
        match message.address.as_str() {
            "/trackpad" => return self.handle_trackpad(message, actuator),
            "/speed" => {
                if let Some(speed) = message.arg_f64(0) {
                    if speed > 0.0 && speed.is_finite() {
                        self.speed = speed;
                        debug!(speed, "Speed updated");
                    }
                }
            }
            "/curve" => {
                if let Some(name) = message.arg_str(0) {
                    self.curve = ResponseCurve::parse(name);
                    debug!(curve = ?self.curve, "Response curve updated");
                }
            }
            address => {
                // "/joy-left" → channel, "/joy-left-gain" → trim
                let bare = &address[1..];
                if let Some(channel_name) = bare.strip_suffix("-gain") {
                    let channel_name = channel_name.to_string();
                    self.trim_gain(&channel_name, message);
                } else {
                    let channel_name = bare.to_string();
                    self.feed_channel(&channel_name, message);
                }
            }
        }
        Ok(())
    }

    fn tick(&mut self, actuator: &mut dyn Actuator) -> Result<()> {
        let total = sum_velocities(self.channels.iter_mut().map(|c| c.take_velocity()));
        let (dx, dy) = self.integrator.integrate(total);
        if dx != 0 || dy != 0 {
            actuator.move_by(dx, dy)?;
        }
        Ok(())
    }

    fn reset(&mut self, _actuator: &mut dyn Actuator) {
        for channel in &mut self.channels {
            channel.reset();
        }
        self.integrator.reset();
    }
}
