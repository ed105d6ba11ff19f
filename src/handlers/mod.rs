//! Pluggable behavior modules
//!
//! Each handler owns a set of address patterns and the state behind them.
//! Handlers are registered explicitly at startup; there is no discovery
//! mechanism and the registry never changes while the dispatch loop runs.

pub mod carry;
pub mod click;
pub mod cursor;
pub mod scroll;
pub mod touchpad;

pub use carry::CarryHandler;
pub use click::ClickHandler;
pub use cursor::CursorHandler;
pub use scroll::ScrollHandler;
pub use touchpad::TouchpadHandler;

use crate::actuate::Actuator;
use crate::app::config::{ChannelConfig, Config};
use crate::dispatch::Message;
use crate::signal::{Deadzone, SourceChannel, VelocityCurve};
use crate::Result;

/// The capability interface every behavior module implements.
///
/// `handle` and `tick` run on the dispatch thread only; a handler never sees
/// concurrent calls and may keep all of its state unsynchronized.
pub trait Handler {
    /// Stable name, used in logs and the `addresses` listing.
    fn name(&self) -> &str;

    /// Address patterns this handler owns.
    fn patterns(&self) -> Vec<String>;

    /// Process one routed message.
    fn handle(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()>;

    /// Periodic work at the configured tick rate.
    fn tick(&mut self, _actuator: &mut dyn Actuator) -> Result<()> {
        Ok(())
    }

    /// Return to a safe idle state: drop in-flight gesture state and release
    /// anything held down.
    fn reset(&mut self, actuator: &mut dyn Actuator);
}

/// Build a channel pipeline from its configuration.
pub(crate) fn build_channel(name: &str, config: &ChannelConfig) -> SourceChannel {
    SourceChannel::new(
        name,
        Deadzone::radial(config.deadzone),
        VelocityCurve::new(config.gain, config.exponent),
        config.carry_response,
    )
}

/// The standard handler set, configured and ready to register.
pub fn default_handlers(config: &Config) -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(CursorHandler::new(config)),
        Box::new(ClickHandler::new()),
        Box::new(ScrollHandler::new(&config.gesture)),
        Box::new(CarryHandler::new()),
        Box::new(TouchpadHandler::new(config)),
    ]
}
