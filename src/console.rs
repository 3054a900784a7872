//! Serial console output
//!
//! Human-readable startup and per-message log lines over a serial
//! port: one line of space-separated hex and one line of text per
//! received message.

use core::fmt::{self, Write as _};

use embedded_hal::serial::Write;
use nb::block;

use crate::message::Message;

/// Console write error
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Serial write failed
    Write,
}

/// Serial console
///
/// Wraps a serial transmitter and renders link messages. Lines end
/// in `\r\n`.
pub struct Console<W: Write<u8>> {
    serial: W,
}

impl<W: Write<u8>> Console<W> {
    /// Create a console over a serial transmitter
    pub fn new(serial: W) -> Self {
        Self { serial }
    }

    /// Print a startup line
    pub fn banner(&mut self, text: &str) -> Result<(), ConsoleError> {
        let mut writer = Writer(&mut self.serial);
        write!(writer, "{}\r\n", text).map_err(|_| ConsoleError::Write)
    }

    /// Dump a message as space-separated hex bytes
    ///
    /// One group per received byte: `Got: 68 65 6C 6C 6F`.
    pub fn print_hex(&mut self, message: &Message) -> Result<(), ConsoleError> {
        let mut writer = Writer(&mut self.serial);
        write!(writer, "Got: {}\r\n", message.hex()).map_err(|_| ConsoleError::Write)
    }

    /// Print a message as text
    ///
    /// `Got string: hello`. Payloads that are not valid UTF-8 are
    /// rendered byte-wise, with non-printable bytes as `\xNN`
    /// escapes.
    pub fn print_string(&mut self, message: &Message) -> Result<(), ConsoleError> {
        let mut writer = Writer(&mut self.serial);
        writer
            .write_str("Got string: ")
            .map_err(|_| ConsoleError::Write)?;

        match message.as_text() {
            Some(text) => writer.write_str(text).map_err(|_| ConsoleError::Write)?,
            None => {
                for &byte in message.as_bytes() {
                    if (0x20..=0x7E).contains(&byte) {
                        writer
                            .write_char(byte as char)
                            .map_err(|_| ConsoleError::Write)?;
                    } else {
                        write!(writer, "\\x{:02X}", byte).map_err(|_| ConsoleError::Write)?;
                    }
                }
            }
        }

        writer.write_str("\r\n").map_err(|_| ConsoleError::Write)
    }
}

/// `core::fmt` adapter over a non-blocking serial transmitter
struct Writer<'a, W: Write<u8>>(&'a mut W);

impl<W: Write<u8>> fmt::Write for Writer<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            block!(self.0.write(byte)).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}
