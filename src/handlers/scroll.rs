//! Scroll Handler
//!
//! `/scroll n` takes a normalized rate in [-1, 1], applies a noise deadzone
//! and the configured scroll gain, and accumulates fractional lines so slow
//! scrolling still progresses. `/scroll-wheel n` maps directly to whole
//! lines. `/scroll-pos` is accepted and ignored; some senders emit it
//! alongside `/scroll` and dropping it silently keeps their logs clean.

use super::Handler;
use crate::actuate::Actuator;
use crate::app::config::GestureConfig;
use crate::dispatch::Message;
use crate::signal::{MotionIntegrator, Vec2};
use crate::Result;
use tracing::debug;

pub struct ScrollHandler {
    gain: f64,
    deadzone: f64,
    accum: MotionIntegrator,
}

impl ScrollHandler {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            gain: config.scroll_gain,
            deadzone: config.scroll_deadzone,
            accum: MotionIntegrator::new(),
        }
    }
}

impl Handler for ScrollHandler {
    fn name(&self) -> &str {
        "scroll"
    }

    fn patterns(&self) -> Vec<String> {
        vec![
            "/scroll".to_string(),
            "/scroll-wheel".to_string(),
            "/scroll-pos".to_string(),
        ]
    }

    fn handle(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()> {
        match message.address.as_str() {
            "/scroll" => {
                let Some(rate) = message.arg_f64(0) else {
                    debug!("Missing scroll rate");
                    return Ok(());
                };
                let rate = rate.clamp(-1.0, 1.0);
                if rate.abs() < self.deadzone {
                    return Ok(());
                }
                let (_, lines) = self.accum.integrate(Vec2::new(0.0, rate * self.gain));
                if lines != 0 {
                    actuator.scroll_by(0, lines)?;
                }
                Ok(())
            }
            "/scroll-wheel" => {
                let Some(lines) = message.arg_f64(0) else {
                    debug!("Missing scroll-wheel value");
                    return Ok(());
                };
                let lines = lines.round() as i32;
                if lines != 0 {
                    actuator.scroll_by(0, lines)?;
                }
                Ok(())
            }
            // Positional scroll telemetry, intentionally unused
            "/scroll-pos" => Ok(()),
            _ => Ok(()),
        }
    }

    fn reset(&mut self, _actuator: &mut dyn Actuator) {
        self.accum.reset();
    }
}
