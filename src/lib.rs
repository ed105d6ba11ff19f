//! # Reachpad
//!
//! An OSC virtual trackpad receiver that turns a phone or tablet running a
//! control surface into a pointing device for the host desktop.
//!
//! ## Overview
//!
//! Address-tagged OSC messages arrive over UDP and are routed to pluggable
//! handlers. The handlers run touch and joystick samples through a
//! signal-processing core (deadzone normalization, power-law velocity curves,
//! multi-source integration, multi-touch gesture recognition) and act on the
//! desktop through a small actuation boundary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reachpad::actuate::RecordingActuator;
//! use reachpad::app::config::Config;
//! use reachpad::dispatch::dispatcher::Dispatcher;
//! use reachpad::dispatch::message::{Message, Value};
//! use reachpad::handlers;
//!
//! let config = Config::default();
//! let mut dispatcher = Dispatcher::new();
//! for handler in handlers::default_handlers(&config) {
//!     dispatcher.register(handler).expect("no duplicate routes");
//! }
//!
//! let mut actuator = RecordingActuator::new();
//! let msg = Message::new("/tap", vec![Value::Int(1)]);
//! dispatcher.dispatch(&msg, &mut actuator);
//! ```
//!
//! ## Architecture
//!
//! - [`signal`]: deadzone normalization, velocity curves, channel pipelines,
//!   multi-source integration
//! - [`gesture`]: multi-touch frames, intents, and the gesture recognizer
//! - [`dispatch`]: address patterns, the message dispatcher, and the SPSC
//!   intake queue
//! - [`handlers`]: pluggable behavior modules (cursor, click, scroll, carry,
//!   touchpad)
//! - [`actuate`]: the OS-binding boundary (desktop and recording actuators)
//! - [`transport`]: the UDP/OSC intake thread
//! - [`app`]: CLI and configuration management
//!
//! ## Message Pipeline
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌────────────┐    ┌───────────┐
//! │ UDP/OSC  │───▶│ SPSC queue  │───▶│ Dispatcher │───▶│  Handler  │
//! │ (intake) │    │ (lock-free) │    │ (routing)  │    │ (signal / │
//! └──────────┘    └─────────────┘    └────────────┘    │  gesture) │
//!                                                      └─────┬─────┘
//!                                                            ▼
//!                                                      ┌───────────┐
//!                                                      │ Actuator  │
//!                                                      └───────────┘
//! ```

pub mod actuate;
pub mod app;
pub mod dispatch;
pub mod gesture;
pub mod handlers;
pub mod signal;
pub mod transport;

// Re-export commonly used types
pub use dispatch::dispatcher::Dispatcher;
pub use dispatch::message::{Message, Value};
pub use dispatch::queue::MessageQueue;
pub use gesture::intent::{Intent, MouseButton};
pub use gesture::recognizer::GestureRecognizer;
pub use signal::Vec2;

/// Result type alias for reachpad
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for reachpad
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Route registration error: {0}")]
    Route(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Actuation error: {0}")]
    Actuation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
