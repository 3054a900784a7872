use embedded_hal::{
    blocking::spi::{Transfer, Write},
    digital::v2::{InputPin, OutputPin},
};

use crate::radio::traits::{Radio, RadioError, RxConfig, TxConfig};

// RFM69 register map
const REG_FIFO: u8 = 0x00;
const REG_OP_MODE: u8 = 0x01;
const REG_DATA_MODUL: u8 = 0x02;
const REG_BITRATE_MSB: u8 = 0x03;
const REG_BITRATE_LSB: u8 = 0x04;
const REG_FRF_MSB: u8 = 0x07;
const REG_FRF_MID: u8 = 0x08;
const REG_FRF_LSB: u8 = 0x09;
const REG_VERSION: u8 = 0x10;
const REG_PA_LEVEL: u8 = 0x11;
const REG_LNA: u8 = 0x18;
const REG_OOK_PEAK: u8 = 0x1B;
const REG_RSSI_VALUE: u8 = 0x24;
const REG_DIO_MAPPING_1: u8 = 0x25;
const REG_IRQ_FLAGS_2: u8 = 0x28;
const REG_PREAMBLE_MSB: u8 = 0x2C;
const REG_PREAMBLE_LSB: u8 = 0x2D;
const REG_SYNC_CONFIG: u8 = 0x2E;
const REG_SYNC_VALUE_1: u8 = 0x2F;
const REG_SYNC_VALUE_2: u8 = 0x30;
const REG_PACKET_CONFIG_1: u8 = 0x37;
const REG_PAYLOAD_LENGTH: u8 = 0x38;
const REG_FIFO_THRESH: u8 = 0x3C;
const REG_PACKET_CONFIG_2: u8 = 0x3D;

// Operating Mode bits (bits 4:2)
const MODE_SLEEP: u8 = 0x00;
const MODE_STDBY: u8 = 0x04;
const MODE_TX: u8 = 0x0C;
const MODE_RX: u8 = 0x10;
const MODE_MASK: u8 = 0x1C;

// Data modulation: packet mode, OOK
const DATA_MODUL_OOK: u8 = 0x08;

// IRQ Flags 2
const IRQ2_FIFO_OVERRUN_MASK: u8 = 0x10;
const IRQ2_PAYLOAD_READY_MASK: u8 = 0x04;

// Crystal oscillator frequency
const FXOSC: u32 = 32_000_000;

/// FIFO size of the RFM69 packet engine
pub const FIFO_SIZE: usize = 66;

/// RFM69 driver in OOK packet mode
///
/// Same link contract as [`SX127x`](crate::radio::sx127x::SX127x) on
/// the RFM69 register map.
pub struct RFM69<SPI, CS, RESET, DIO0>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DIO0: InputPin,
{
    spi: SPI,
    cs: CS,
    reset: RESET,
    dio0: DIO0,
    frequency: u32,
}

impl<SPI, CS, RESET, DIO0> RFM69<SPI, CS, RESET, DIO0>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DIO0: InputPin,
{
    /// Create new instance of RFM69 driver
    pub fn new(spi: SPI, cs: CS, reset: RESET, dio0: DIO0) -> Result<Self, RadioError> {
        let mut radio = Self {
            spi,
            cs,
            reset,
            dio0,
            frequency: 0,
        };

        // Perform hardware reset (reset line is active high)
        radio.reset.set_high().map_err(|_| RadioError::Gpio)?;
        for _ in 0..1000 {
            core::hint::spin_loop();
        }
        radio.reset.set_low().map_err(|_| RadioError::Gpio)?;
        // Wait for chip to start
        for _ in 0..10_000 {
            core::hint::spin_loop();
        }

        // Check version
        let version = radio.read_register(REG_VERSION)?;
        if version != 0x24 {
            return Err(RadioError::Hardware);
        }

        Ok(radio)
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, RadioError> {
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let mut buffer = [addr & 0x7F, 0];
        self.spi.transfer(&mut buffer).map_err(|_| RadioError::Spi)?;
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;
        Ok(buffer[1])
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), RadioError> {
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let buffer = [addr | 0x80, value];
        self.spi.write(&buffer).map_err(|_| RadioError::Spi)?;
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;
        Ok(())
    }

    fn set_mode(&mut self, mode: u8) -> Result<(), RadioError> {
        let op_mode = self.read_register(REG_OP_MODE)?;
        self.write_register(REG_OP_MODE, (op_mode & !MODE_MASK) | mode)
    }

    fn wait_packet_sent(&mut self) -> Result<(), RadioError> {
        for _ in 0..1_000_000 {
            if self.dio0.is_high().map_err(|_| RadioError::Gpio)? {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(RadioError::Timeout)
    }

    fn flush_fifo(&mut self) -> Result<(), RadioError> {
        self.write_register(REG_IRQ_FLAGS_2, IRQ2_FIFO_OVERRUN_MASK)
    }
}

impl<SPI, CS, RESET, DIO0> Radio for RFM69<SPI, CS, RESET, DIO0>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DIO0: InputPin,
{
    type Error = RadioError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_STDBY)?;

        // Packet mode, OOK modulation, no shaping
        self.write_register(REG_DATA_MODUL, DATA_MODUL_OOK)?;

        // Packet engine: variable length, CRC on, auto clear on CRC
        // failure so bad frames never raise PayloadReady
        self.write_register(REG_PACKET_CONFIG_1, 0x90)?;
        self.write_register(REG_PAYLOAD_LENGTH, FIFO_SIZE as u8)?;
        self.write_register(REG_PACKET_CONFIG_2, 0x02)?; // Auto RX restart

        // Start TX as soon as the FIFO holds a byte
        self.write_register(REG_FIFO_THRESH, 0x8F)?;

        // Preamble: 4 bytes
        self.write_register(REG_PREAMBLE_MSB, 0x00)?;
        self.write_register(REG_PREAMBLE_LSB, 0x04)?;

        // Sync word: on, 2 bytes
        self.write_register(REG_SYNC_CONFIG, 0x88)?;
        self.write_register(REG_SYNC_VALUE_1, 0x2D)?;
        self.write_register(REG_SYNC_VALUE_2, 0xD4)?;

        // OOK demodulator in peak threshold mode
        self.write_register(REG_OOK_PEAK, 0x40)?;

        // LNA: 50 ohm input, automatic gain
        self.write_register(REG_LNA, 0x88)?;

        // DIO0: PacketSent in TX, CrcOk/PayloadReady in RX
        self.write_register(REG_DIO_MAPPING_1, 0x00)?;

        Ok(())
    }

    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error> {
        self.frequency = freq;

        let frf = (freq as u64 * (1 << 19) / FXOSC as u64) as u32;

        self.write_register(REG_FRF_MSB, ((frf >> 16) & 0xFF) as u8)?;
        self.write_register(REG_FRF_MID, ((frf >> 8) & 0xFF) as u8)?;
        self.write_register(REG_FRF_LSB, (frf & 0xFF) as u8)?;

        Ok(())
    }

    fn set_bitrate(&mut self, bitrate: u32) -> Result<(), Self::Error> {
        if bitrate == 0 {
            return Err(RadioError::Config);
        }

        let divider = FXOSC / bitrate;
        if divider > 0xFFFF {
            return Err(RadioError::Config);
        }

        self.write_register(REG_BITRATE_MSB, ((divider >> 8) & 0xFF) as u8)?;
        self.write_register(REG_BITRATE_LSB, (divider & 0xFF) as u8)?;

        Ok(())
    }

    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error> {
        // PA0 output: -18 dBm + level
        let level = (power.clamp(-18, 13) + 18) as u8;
        self.write_register(REG_PA_LEVEL, 0x80 | level)?;
        Ok(())
    }

    fn configure_tx(&mut self, config: TxConfig) -> Result<(), Self::Error> {
        self.set_mode(MODE_STDBY)?;
        self.set_frequency(config.frequency)?;
        self.set_bitrate(config.bitrate)?;
        self.set_tx_power(config.power)?;
        Ok(())
    }

    fn configure_rx(&mut self, config: RxConfig) -> Result<(), Self::Error> {
        self.set_mode(MODE_STDBY)?;
        self.set_frequency(config.frequency)?;
        self.set_bitrate(config.bitrate)?;

        // Start continuous reception
        self.set_mode(MODE_RX)?;

        Ok(())
    }

    fn transmit(&mut self, buffer: &[u8]) -> Result<(), Self::Error> {
        // Length byte plus payload must fit the FIFO
        if buffer.is_empty() || buffer.len() >= FIFO_SIZE {
            return Err(RadioError::Config);
        }

        self.set_mode(MODE_STDBY)?;

        // Write length byte and payload to FIFO
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let header = [REG_FIFO | 0x80, buffer.len() as u8];
        self.spi.write(&header).map_err(|_| RadioError::Spi)?;
        self.spi.write(buffer).map_err(|_| RadioError::Spi)?;
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;

        // Start transmission and wait until the packet is gone
        self.set_mode(MODE_TX)?;
        self.wait_packet_sent()?;

        self.set_mode(MODE_STDBY)?;

        Ok(())
    }

    fn payload_ready(&mut self) -> Result<bool, Self::Error> {
        let flags = self.read_register(REG_IRQ_FLAGS_2)?;
        Ok((flags & IRQ2_PAYLOAD_READY_MASK) != 0)
    }

    fn receive(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.payload_ready()? {
            return Ok(0);
        }

        // First FIFO byte is the payload length
        let len = self.read_register(REG_FIFO)? as usize;
        if len > buffer.len() {
            self.flush_fifo()?;
            return Err(RadioError::Config);
        }

        // Read payload
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let addr = [REG_FIFO & 0x7F];
        self.spi.write(&addr).map_err(|_| RadioError::Spi)?;
        self.spi
            .transfer(&mut buffer[..len])
            .map_err(|_| RadioError::Spi)?;
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;

        Ok(len)
    }

    fn get_rssi(&mut self) -> Result<i16, Self::Error> {
        let rssi_value = self.read_register(REG_RSSI_VALUE)?;
        Ok(-(rssi_value as i16) / 2)
    }

    fn is_transmitting(&mut self) -> Result<bool, Self::Error> {
        let op_mode = self.read_register(REG_OP_MODE)?;
        Ok((op_mode & MODE_MASK) == MODE_TX)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_STDBY)
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_SLEEP)
    }
}
