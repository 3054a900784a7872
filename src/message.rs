use core::fmt;

use heapless::Vec;

/// Maximum message length in bytes
///
/// Messages are short status strings; the capacity matches the
/// classic virtual-wire buffer size.
pub const MAX_MESSAGE_LEN: usize = 80;

/// A received or outgoing link message
///
/// Fixed-capacity byte buffer owned by the loop iteration that
/// produced it. A fresh `Message` is built for every packet; nothing
/// is retained across iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Vec<u8, MAX_MESSAGE_LEN>,
}

impl Message {
    /// Create an empty message
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create a message from a byte slice
    ///
    /// Fails when the slice exceeds [`MAX_MESSAGE_LEN`].
    pub fn from_slice(data: &[u8]) -> Result<Self, ()> {
        Ok(Self {
            bytes: Vec::from_slice(data)?,
        })
    }

    /// Message payload as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the message is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload as text, if it is valid UTF-8
    ///
    /// The view is delimited by the received length; no terminator
    /// byte is needed or consumed.
    pub fn as_text(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Hex rendering of the payload
    pub fn hex(&self) -> HexBytes<'_> {
        HexBytes(&self.bytes)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

/// Displays bytes as space-separated uppercase hex
///
/// One group per byte, without zero padding: `68 65 6C 6C 6F`.
pub struct HexBytes<'a>(&'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for byte in self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{:X}", byte)?;
            first = false;
        }
        Ok(())
    }
}
