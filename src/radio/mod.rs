/// Radio trait and shared parameter types
pub mod traits;

/// SX1276-family OOK driver
pub mod sx127x;

/// RFM69 OOK driver
#[cfg(feature = "rfm69")]
pub mod rfm69;

pub use traits::{Radio, RadioError};
pub use sx127x::SX127x;
#[cfg(feature = "rfm69")]
pub use rfm69::RFM69;
