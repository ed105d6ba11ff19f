//! Serial Dispatch
//!
//! The dispatcher owns every registered handler and routes messages to the
//! single best-matching route. All dispatch happens on one thread, in arrival
//! order; handlers never observe concurrent calls.

use super::message::Message;
use super::pattern::AddressPattern;
use crate::actuate::Actuator;
use crate::handlers::Handler;
use crate::{Error, Result};
use tracing::{debug, warn};

struct Route {
    pattern: AddressPattern,
    handler_index: usize,
}

/// Routes messages to handlers and drives periodic ticks.
///
/// The registry is append-only: handlers register at startup and are never
/// removed while the dispatch loop runs.
pub struct Dispatcher {
    handlers: Vec<Box<dyn Handler>>,
    routes: Vec<Route>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// Register a handler and all the patterns it declares.
    ///
    /// Registering a pattern that is already routed is a startup error;
    /// silently shadowing a route would make message flow ambiguous.
    pub fn register(&mut self, handler: Box<dyn Handler>) -> Result<()> {
        let handler_index = self.handlers.len();
        let name = handler.name().to_string();

        let mut new_routes = Vec::new();
        for pattern_str in handler.patterns() {
            let pattern = AddressPattern::new(&pattern_str)?;
            if let Some(existing) = self
                .routes
                .iter()
                .find(|r| r.pattern.as_str() == pattern.as_str())
            {
                return Err(Error::Route(format!(
                    "pattern {:?} already registered by '{}'",
                    pattern.as_str(),
                    self.handlers[existing.handler_index].name()
                )));
            }
            new_routes.push(Route {
                pattern,
                handler_index,
            });
        }

        debug!(handler = %name, routes = new_routes.len(), "Registered handler");
        self.routes.extend(new_routes);
        self.handlers.push(handler);
        Ok(())
    }

    /// Route one message to its best-matching handler.
    ///
    /// An unmatched address is a silent no-op (logged at debug). A handler
    /// error is logged, the handler is reset, and dispatch continues; one bad
    /// message never takes the loop down.
    pub fn dispatch(&mut self, message: &Message, actuator: &mut dyn Actuator) {
        let best = self
            .routes
            .iter()
            .filter(|r| r.pattern.matches(&message.address))
            .max_by_key(|r| r.pattern.specificity());

        let handler_index = match best {
            Some(route) => route.handler_index,
            None => {
                debug!(address = %message.address, "No route for message");
                return;
            }
        };

        let handler = &mut self.handlers[handler_index];
        if let Err(err) = handler.handle(message, actuator) {
            warn!(
                handler = handler.name(),
                address = %message.address,
                error = %err,
                "Handler failed; resetting"
            );
            handler.reset(actuator);
        }
    }

    /// Drive one periodic tick across all handlers.
    pub fn tick(&mut self, actuator: &mut dyn Actuator) {
        for handler in &mut self.handlers {
            if let Err(err) = handler.tick(actuator) {
                warn!(handler = handler.name(), error = %err, "Tick failed; resetting");
                handler.reset(actuator);
            }
        }
    }

    /// Reset every handler (session teardown).
    pub fn reset(&mut self, actuator: &mut dyn Actuator) {
        for handler in &mut self.handlers {
            handler.reset(actuator);
        }
    }

    /// All registered (pattern, handler name) pairs, in registration order.
    pub fn routes(&self) -> Vec<(String, String)> {
        self.routes
            .iter()
            .map(|r| {
                (
                    r.pattern.as_str().to_string(),
                    self.handlers[r.handler_index].name().to_string(),
                )
            })
            .collect()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuate::RecordingActuator;
    use crate::dispatch::message::Value;

    /// Minimal handler that does nothing with messages.
    struct Probe {
        name: &'static str,
        patterns: Vec<String>,
    }

    impl Probe {
        fn new(name: &'static str, patterns: &[&str]) -> Self {
            Self {
                name,
                patterns: patterns.iter().map(|p| p.to_string()).collect(),
            }
        }
    }

    impl Handler for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn patterns(&self) -> Vec<String> {
            self.patterns.clone()
        }

        fn handle(&mut self, _message: &Message, _actuator: &mut dyn Actuator) -> Result<()> {
            Ok(())
        }

        fn tick(&mut self, _actuator: &mut dyn Actuator) -> Result<()> {
            Ok(())
        }

        fn reset(&mut self, _actuator: &mut dyn Actuator) {}
    }

    #[test]
    fn test_duplicate_pattern_rejected() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(Box::new(Probe::new("a", &["/cursor/pos"])))
            .unwrap();
        let err = dispatcher
            .register(Box::new(Probe::new("b", &["/cursor/pos"])))
            .unwrap_err();
        assert!(matches!(err, Error::Route(_)));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut dispatcher = Dispatcher::new();
        let err = dispatcher
            .register(Box::new(Probe::new("a", &["no-slash"])))
            .unwrap_err();
        assert!(matches!(err, Error::Route(_)));
    }

    #[test]
    fn test_unmatched_address_is_noop() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(Box::new(Probe::new("a", &["/cursor/pos"])))
            .unwrap();

        let mut actuator = RecordingActuator::new();
        dispatcher.dispatch(&Message::new("/unknown", vec![]), &mut actuator);
        assert!(actuator.actions().is_empty());
    }

    #[test]
    fn test_exact_beats_wildcard() {
        struct Recorder {
            name: &'static str,
            patterns: Vec<String>,
        }
        impl Handler for Recorder {
            fn name(&self) -> &str {
                self.name
            }
            fn patterns(&self) -> Vec<String> {
                self.patterns.clone()
            }
            fn handle(&mut self, _m: &Message, actuator: &mut dyn Actuator) -> Result<()> {
                // Leave a fingerprint in the actuator log
                actuator.type_text(self.name)
            }
            fn tick(&mut self, _actuator: &mut dyn Actuator) -> Result<()> {
                Ok(())
            }
            fn reset(&mut self, _actuator: &mut dyn Actuator) {}
        }

        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(Box::new(Recorder {
                name: "wild",
                patterns: vec!["/joystick/*".into()],
            }))
            .unwrap();
        dispatcher
            .register(Box::new(Recorder {
                name: "exact",
                patterns: vec!["/joystick/left".into()],
            }))
            .unwrap();

        let mut actuator = RecordingActuator::new();
        dispatcher.dispatch(
            &Message::new("/joystick/left", vec![Value::Float(0.1)]),
            &mut actuator,
        );
        dispatcher.dispatch(
            &Message::new("/joystick/right", vec![Value::Float(0.1)]),
            &mut actuator,
        );

        let typed: Vec<String> = actuator.typed_text();
        assert_eq!(typed, vec!["exact".to_string(), "wild".to_string()]);
    }

    #[test]
    fn test_routes_listing() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(Box::new(Probe::new("a", &["/cursor/pos", "/tap"])))
            .unwrap();
        let routes = dispatcher.routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0], ("/cursor/pos".to_string(), "a".to_string()));
        assert_eq!(routes[1], ("/tap".to_string(), "a".to_string()));
    }
}
