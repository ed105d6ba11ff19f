//! Message dispatch
//!
//! Decoded control messages flow through a lock-free queue into a serial
//! dispatch loop, which routes each message to the single best-matching
//! handler by address pattern.

pub mod dispatcher;
pub mod message;
pub mod pattern;
pub mod queue;

pub use dispatcher::Dispatcher;
pub use message::{Message, Value};
pub use pattern::AddressPattern;
pub use queue::{MessageConsumer, MessageProducer, MessageQueue, QueueStats};
