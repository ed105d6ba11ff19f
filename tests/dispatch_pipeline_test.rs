//! Integration tests for the dispatch pipeline
//!
//! These tests verify the path from decoded messages through the queue and
//! dispatcher into handlers, observing the resulting actions through the
//! recording actuator.

use reachpad::actuate::{Action, RecordingActuator};
use reachpad::app::config::Config;
use reachpad::dispatch::{Dispatcher, Message, MessageQueue, Value};
use reachpad::handlers::default_handlers;
use reachpad::MouseButton;

/// Dispatcher with the full default handler set registered.
fn make_dispatcher(config: &Config) -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    for handler in default_handlers(config) {
        dispatcher
            .register(handler)
            .expect("default handlers must register cleanly");
    }
    dispatcher
}

#[test]
fn test_queue_to_handler_end_to_end() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    let (mut producer, mut consumer) = MessageQueue::with_capacity(64).split();
    producer.push(Message::new("/tap", vec![Value::Int(1)]));
    producer.push(Message::new(
        "/joy-left",
        vec![Value::Float(0.5), Value::Float(0.0)],
    ));

    for message in consumer.pop_batch(16) {
        dispatcher.dispatch(&message, &mut actuator);
    }
    dispatcher.tick(&mut actuator);

    assert_eq!(
        actuator.actions(),
        &[
            Action::Click(MouseButton::Left),
            Action::MoveBy { dx: 2, dy: 0 },
        ]
    );
}

#[test]
fn test_unmatched_address_leaves_state_unchanged() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    dispatcher.dispatch(
        &Message::new("/nonexistent/route", vec![Value::Int(1)]),
        &mut actuator,
    );
    dispatcher.tick(&mut actuator);

    assert!(actuator.actions().is_empty());
}

#[test]
fn test_per_address_ordering_preserved() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    // Press, release, press: the button state must follow in exactly that
    // order or the final state is wrong
    for pressed in [1, 0, 1] {
        dispatcher.dispatch(
            &Message::new("/left", vec![Value::Int(pressed)]),
            &mut actuator,
        );
    }

    assert_eq!(
        actuator.actions(),
        &[
            Action::ButtonDown(MouseButton::Left),
            Action::ButtonUp(MouseButton::Left),
            Action::ButtonDown(MouseButton::Left),
        ]
    );
}

#[test]
fn test_multiple_channels_integrate_on_one_tick() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    dispatcher.dispatch(
        &Message::new("/joy-left", vec![Value::Float(0.5), Value::Float(0.0)]),
        &mut actuator,
    );
    dispatcher.dispatch(
        &Message::new("/joy-right", vec![Value::Float(-0.5), Value::Float(0.0)]),
        &mut actuator,
    );
    dispatcher.tick(&mut actuator);

    // coarse ≈ +2.19, fine ≈ -0.44 → +1.75 → one whole pixel
    assert_eq!(actuator.total_movement(), (1, 0));
}

#[test]
fn test_sub_pixel_motion_accumulates_across_ticks() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    // joy-right at 0.5 deflection is ≈0.44 px/tick; two ticks stay below a
    // pixel, the third crosses it
    for _ in 0..3 {
        dispatcher.dispatch(
            &Message::new("/joy-right", vec![Value::Float(0.5), Value::Float(0.0)]),
            &mut actuator,
        );
        dispatcher.tick(&mut actuator);
    }

    assert_eq!(actuator.total_movement(), (1, 0));
}

#[test]
fn test_handler_error_does_not_stop_loop() {
    use reachpad::actuate::Actuator;
    use reachpad::handlers::Handler;

    struct Failing;
    impl Handler for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn patterns(&self) -> Vec<String> {
            vec!["/fail".to_string()]
        }
        fn handle(
            &mut self,
            _message: &Message,
            _actuator: &mut dyn Actuator,
        ) -> reachpad::Result<()> {
            Err(reachpad::Error::Dispatch("always fails".into()))
        }
        fn reset(&mut self, _actuator: &mut dyn Actuator) {}
    }

    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    dispatcher.register(Box::new(Failing)).unwrap();

    let mut actuator = RecordingActuator::new();
    dispatcher.dispatch(&Message::new("/fail", vec![]), &mut actuator);

    // The loop survives and later messages still dispatch
    dispatcher.dispatch(&Message::new("/tap", vec![Value::Int(1)]), &mut actuator);
    assert_eq!(actuator.actions(), &[Action::Click(MouseButton::Left)]);
}

#[test]
fn test_duplicate_registration_fails_at_startup() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);

    // The cursor handler already owns /trackpad
    let duplicates = default_handlers(&config)
        .into_iter()
        .next()
        .expect("at least one handler");
    let err = dispatcher.register(duplicates).unwrap_err();
    assert!(matches!(err, reachpad::Error::Route(_)));
}

#[test]
fn test_runtime_trim_addresses() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    // Double the coarse gain, then check the tick output doubles too
    dispatcher.dispatch(
        &Message::new("/joy-left-gain", vec![Value::Float(50.0)]),
        &mut actuator,
    );
    dispatcher.dispatch(
        &Message::new("/joy-left", vec![Value::Float(0.5), Value::Float(0.0)]),
        &mut actuator,
    );
    dispatcher.tick(&mut actuator);

    assert_eq!(actuator.total_movement(), (4, 0));
}

#[test]
fn test_reset_releases_everything() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    dispatcher.dispatch(&Message::new("/left", vec![Value::Int(1)]), &mut actuator);
    dispatcher.dispatch(
        &Message::new("/joy-left", vec![Value::Float(1.0), Value::Float(0.0)]),
        &mut actuator,
    );

    dispatcher.reset(&mut actuator);

    // Held button released, pending joystick motion discarded
    assert_eq!(
        actuator.actions().last().unwrap(),
        &Action::ButtonUp(MouseButton::Left)
    );
    let before = actuator.actions().len();
    dispatcher.tick(&mut actuator);
    assert_eq!(actuator.actions().len(), before);
}

#[test]
fn test_carry_and_drop_through_dispatcher() {
    let config = Config::default();
    let mut dispatcher = make_dispatcher(&config);
    let mut actuator = RecordingActuator::new();

    dispatcher.dispatch(
        &Message::new("/carry", vec![Value::Str("dropped text".into())]),
        &mut actuator,
    );
    dispatcher.dispatch(&Message::new("/drop", vec![]), &mut actuator);

    assert_eq!(actuator.typed_text(), vec!["dropped text".to_string()]);
}

#[test]
fn test_addresses_listing_is_complete() {
    let config = Config::default();
    let dispatcher = make_dispatcher(&config);

    let routes = dispatcher.routes();
    let patterns: Vec<&str> = routes.iter().map(|(p, _)| p.as_str()).collect();

    for expected in [
        "/trackpad",
        "/speed",
        "/curve",
        "/joy-left",
        "/joy-left-gain",
        "/joy-right",
        "/joy-right-gain",
        "/tap",
        "/left",
        "/right",
        "/scroll",
        "/scroll-wheel",
        "/scroll-pos",
        "/carry",
        "/drop",
        "/drop-keep",
        "/carry-status",
        "/multixy",
        "/multixy/tap",
    ] {
        assert!(patterns.contains(&expected), "missing route {expected}");
    }
}
