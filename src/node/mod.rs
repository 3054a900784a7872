//! Transmitter and receiver nodes
//!
//! One node per end of the link. The transmitter repeatedly sends a
//! short message and blocks until each one has physically left; the
//! receiver polls non-blockingly and hands complete messages to the
//! application. Both pulse a status indicator while the radio is
//! active.

/// Transmitter node implementation
pub mod transmitter;
pub use transmitter::Transmitter;

/// Receiver node implementation
pub mod receiver;
pub use receiver::Receiver;

use embedded_hal::digital::v2::OutputPin;

/// Node role on the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Sends messages
    Transmitter,
    /// Polls for messages
    Receiver,
}

/// Status indicator lamp
///
/// Driven high while the radio is active, restored low afterwards.
/// The lamp is advisory; pin errors are ignored so a broken LED can
/// never take the link down.
pub struct Indicator<LED: OutputPin> {
    led: LED,
}

impl<LED: OutputPin> Indicator<LED> {
    /// Wrap an output pin as the status indicator
    pub fn new(led: LED) -> Self {
        Self { led }
    }

    /// Raise the indicator
    pub fn on(&mut self) {
        self.led.set_high().ok();
    }

    /// Lower the indicator
    pub fn off(&mut self) {
        self.led.set_low().ok();
    }
}
