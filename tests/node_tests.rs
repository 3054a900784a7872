#![no_std]

use core::cell::Cell;

use vwire::{
    config::LinkConfig,
    link::LinkError,
    node::{Receiver, Transmitter},
};

mod mock;
use mock::{MockBus, MockPin, MockRadio};

#[test]
fn test_transmitter_sends_payload() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut transmitter = Transmitter::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    transmitter.init().unwrap();

    transmitter.send(b"hello").unwrap();

    // The payload reaches the radio byte for byte
    assert_eq!(bus.last_tx().unwrap().as_slice(), b"hello");
}

#[test]
fn test_transmitter_lowers_indicator_after_send() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut transmitter = Transmitter::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    transmitter.init().unwrap();

    transmitter.send(b"hello").unwrap();

    assert!(!led.get());
}

#[test]
fn test_transmitter_rejects_oversized_payload() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut transmitter = Transmitter::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    transmitter.init().unwrap();

    let oversized = [0u8; 81];
    let result = transmitter.send(&oversized);

    assert!(matches!(result, Err(LinkError::PayloadTooLong)));
    assert!(bus.last_tx().is_none());
}

#[test]
fn test_transmitter_interval_from_config() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let transmitter = Transmitter::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default().with_tx_interval_ms(250),
    );

    assert_eq!(transmitter.interval_ms(), 250);
}

#[test]
fn test_receiver_poll_empty() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut receiver = Receiver::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    receiver.init().unwrap();

    // Init started continuous reception
    assert!(bus.is_listening());

    // Nothing pending: poll returns immediately with nothing
    assert!(receiver.poll().unwrap().is_none());
}

#[test]
fn test_receiver_poll_yields_message() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut receiver = Receiver::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    receiver.init().unwrap();

    bus.set_rx_data(b"hello");
    let message = receiver.poll().unwrap().unwrap();

    assert_eq!(message.as_bytes(), b"hello");
    assert_eq!(message.as_text(), Some("hello"));
    assert!(!led.get());
}

#[test]
fn test_receiver_poll_consumes_message() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut receiver = Receiver::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    receiver.init().unwrap();

    bus.set_rx_data(b"hello");
    assert!(receiver.poll().unwrap().is_some());
    assert!(receiver.poll().unwrap().is_none());
}

#[test]
fn test_receiver_reports_rssi() {
    let bus = MockBus::new();
    let led = Cell::new(false);

    let mut receiver = Receiver::new(
        MockRadio::new(&bus),
        MockPin::new(&led),
        LinkConfig::default(),
    );
    receiver.init().unwrap();

    assert_eq!(receiver.rssi().unwrap(), -50);
}
