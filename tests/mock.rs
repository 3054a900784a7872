use core::cell::{Cell, RefCell};

use heapless::Vec;
use vwire::message::MAX_MESSAGE_LEN;
use vwire::radio::traits::{Radio, RxConfig, TxConfig};

/// Mock radio error type
#[derive(Debug)]
pub enum MockError {
    /// Generic error
    Error,
}

/// Shared radio state, observable while a node owns the radio
pub struct MockBus {
    last_tx: RefCell<Option<Vec<u8, MAX_MESSAGE_LEN>>>,
    rx_data: RefCell<Option<Vec<u8, MAX_MESSAGE_LEN>>>,
    listening: Cell<bool>,
}

impl MockBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            last_tx: RefCell::new(None),
            rx_data: RefCell::new(None),
            listening: Cell::new(false),
        }
    }

    /// Whether continuous reception was started
    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }

    /// Set data to be returned by the next receive call
    pub fn set_rx_data(&self, data: &[u8]) {
        let mut rx_data = Vec::new();
        rx_data.extend_from_slice(data).unwrap();
        *self.rx_data.borrow_mut() = Some(rx_data);
    }

    /// Get last transmitted data
    pub fn last_tx(&self) -> Option<Vec<u8, MAX_MESSAGE_LEN>> {
        self.last_tx.borrow().clone()
    }
}

/// Mock radio for testing
pub struct MockRadio<'a> {
    bus: &'a MockBus,
    frequency: u32,
    bitrate: u32,
    power: i8,
}

impl<'a> MockRadio<'a> {
    /// Create new mock radio on the given bus
    pub fn new(bus: &'a MockBus) -> Self {
        Self {
            bus,
            frequency: 0,
            bitrate: 0,
            power: 0,
        }
    }
}

impl Radio for MockRadio<'_> {
    type Error = MockError;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error> {
        self.frequency = freq;
        Ok(())
    }

    fn set_bitrate(&mut self, bitrate: u32) -> Result<(), Self::Error> {
        self.bitrate = bitrate;
        Ok(())
    }

    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error> {
        self.power = power;
        Ok(())
    }

    fn configure_tx(&mut self, config: TxConfig) -> Result<(), Self::Error> {
        self.frequency = config.frequency;
        self.bitrate = config.bitrate;
        self.power = config.power;
        Ok(())
    }

    fn configure_rx(&mut self, config: RxConfig) -> Result<(), Self::Error> {
        self.frequency = config.frequency;
        self.bitrate = config.bitrate;
        self.bus.listening.set(true);
        Ok(())
    }

    fn transmit(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut tx_data = Vec::new();
        tx_data.extend_from_slice(data).map_err(|_| MockError::Error)?;
        *self.bus.last_tx.borrow_mut() = Some(tx_data);
        Ok(())
    }

    fn payload_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.bus.rx_data.borrow().is_some())
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        if let Some(rx_data) = self.bus.rx_data.borrow_mut().take() {
            let len = rx_data.len().min(buffer.len());
            buffer[..len].copy_from_slice(&rx_data[..len]);
            Ok(len)
        } else {
            Ok(0)
        }
    }

    fn get_rssi(&mut self) -> Result<i16, Self::Error> {
        Ok(-50) // Mock RSSI value
    }

    fn is_transmitting(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Mock indicator pin, observable while a node owns it
pub struct MockPin<'a> {
    state: &'a Cell<bool>,
}

impl<'a> MockPin<'a> {
    /// Create a pin reflecting its level into the given cell
    pub fn new(state: &'a Cell<bool>) -> Self {
        Self { state }
    }
}

impl embedded_hal::digital::v2::OutputPin for MockPin<'_> {
    type Error = ();

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state.set(true);
        Ok(())
    }
}

/// Mock serial port capturing console output
pub struct MockSerial<'a> {
    out: &'a RefCell<Vec<u8, 256>>,
}

impl<'a> MockSerial<'a> {
    /// Create a serial port capturing into the given buffer
    pub fn new(out: &'a RefCell<Vec<u8, 256>>) -> Self {
        Self { out }
    }
}

impl embedded_hal::serial::Write<u8> for MockSerial<'_> {
    type Error = ();

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.out
            .borrow_mut()
            .push(word)
            .map_err(|_| nb::Error::Other(()))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}
