//! Control Messages
//!
//! A [`Message`] is one decoded control datagram: a slash-delimited address
//! plus a list of typed arguments. Senders are not uniform about argument
//! types (some emit integers where floats are expected, or 0/1 where booleans
//! are expected), so [`Value`] offers lenient coercion accessors and handlers
//! read arguments through those.

use serde::{Deserialize, Serialize};

/// One typed message argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i32),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Numeric view of this value.
    ///
    /// Integers widen, booleans map to 0.0/1.0, strings are not numbers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(_) => None,
        }
    }

    /// Boolean view of this value.
    ///
    /// Numeric values at or above 0.5 count as pressed; analog senders report
    /// button state as a float.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(v) => Some(*v != 0),
            Value::Float(v) => Some(*v >= 0.5),
            Value::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// One decoded control message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Slash-delimited address, e.g. `/cursor/pos`
    pub address: String,
    /// Positional arguments
    pub args: Vec<Value>,
}

impl Message {
    pub fn new(address: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Argument `index` as a float, if present and coercible.
    pub fn arg_f64(&self, index: usize) -> Option<f64> {
        self.args.get(index).and_then(Value::as_f64)
    }

    /// Argument `index` as a boolean, if present and coercible.
    pub fn arg_bool(&self, index: usize) -> Option<bool> {
        self.args.get(index).and_then(Value::as_bool)
    }

    /// Argument `index` as a string, if present.
    pub fn arg_str(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(Value::as_str)
    }
}
