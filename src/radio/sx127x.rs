use embedded_hal::{
    blocking::spi::{Transfer, Write},
    digital::v2::{InputPin, OutputPin},
};

use crate::radio::traits::{Radio, RadioError, RxConfig, TxConfig};

// SX127x register map, FSK/OOK page
const REG_FIFO: u8 = 0x00;
const REG_OP_MODE: u8 = 0x01;
const REG_BITRATE_MSB: u8 = 0x02;
const REG_BITRATE_LSB: u8 = 0x03;
const REG_FRF_MSB: u8 = 0x06;
const REG_FRF_MID: u8 = 0x07;
const REG_FRF_LSB: u8 = 0x08;
const REG_PA_CONFIG: u8 = 0x09;
const REG_LNA: u8 = 0x0C;
const REG_RX_CONFIG: u8 = 0x0D;
const REG_RSSI_VALUE: u8 = 0x11;
const REG_OOK_PEAK: u8 = 0x14;
const REG_PREAMBLE_DETECT: u8 = 0x1F;
const REG_PREAMBLE_MSB: u8 = 0x25;
const REG_PREAMBLE_LSB: u8 = 0x26;
const REG_SYNC_CONFIG: u8 = 0x27;
const REG_SYNC_VALUE_1: u8 = 0x28;
const REG_SYNC_VALUE_2: u8 = 0x29;
const REG_PACKET_CONFIG_1: u8 = 0x30;
const REG_PACKET_CONFIG_2: u8 = 0x31;
const REG_PAYLOAD_LENGTH: u8 = 0x32;
const REG_FIFO_THRESH: u8 = 0x35;
const REG_IRQ_FLAGS_2: u8 = 0x3F;
const REG_DIO_MAPPING_1: u8 = 0x40;
const REG_VERSION: u8 = 0x42;
const REG_PA_DAC: u8 = 0x4D;

// Operating Mode bits
const MODE_OOK: u8 = 0x20;
const MODE_SLEEP: u8 = 0x00;
const MODE_STDBY: u8 = 0x01;
const MODE_TX: u8 = 0x03;
const MODE_RX: u8 = 0x05;

// PA Config
const PA_BOOST: u8 = 0x80;

// IRQ Flags 2
const IRQ2_FIFO_OVERRUN_MASK: u8 = 0x10;
const IRQ2_PAYLOAD_READY_MASK: u8 = 0x04;

// Crystal oscillator frequency
const FXOSC: u32 = 32_000_000;

/// FIFO size in FSK/OOK mode
pub const FIFO_SIZE: usize = 64;

/// SX1276-family driver in OOK packet mode
///
/// The modem's packet engine handles preamble, sync word, length
/// framing and CRC; frames failing the CRC are discarded by the chip
/// before `PayloadReady` is raised.
pub struct SX127x<SPI, CS, RESET, DIO0>
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

impl<SPI, CS, RESET, DIO0> SX127x<SPI, CS, RESET, DIO0>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DIO0: InputPin,
{
    /// Create new instance of SX127x driver
    pub fn new(spi: SPI, cs: CS, reset: RESET, dio0: DIO0) -> Result<Self, RadioError> {
        let mut radio = Self {
            spi,
            cs,
            reset,
            dio0,
            frequency: 0,
        };

        // Perform hardware reset (reset line is active low)
        radio.reset.set_low().map_err(|_| RadioError::Gpio)?;
        for _ in 0..1000 {
            core::hint::spin_loop();
        }
        radio.reset.set_high().map_err(|_| RadioError::Gpio)?;
        // Wait for chip to start
        for _ in 0..10_000 {
            core::hint::spin_loop();
        }

        // Check version
        let version = radio.read_register(REG_VERSION)?;
        if version != 0x12 {
            return Err(RadioError::Hardware);
        }

        Ok(radio)
    }

    /// Read a radio register
    fn read_register(&mut self, addr: u8) -> Result<u8, RadioError> {
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let mut buffer = [addr & 0x7F, 0];
        self.spi.transfer(&mut buffer).map_err(|_| RadioError::Spi)?;
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;
        Ok(buffer[1])
    }

    /// Write to a radio register
    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), RadioError> {
        self.cs.set_low().map_err(|_| RadioError::Gpio)?;
        let buffer = [addr | 0x80, value];
        self.spi.write(&buffer).map_err(|_| RadioError::Spi)?;
        self.cs.set_high().map_err(|_| RadioError::Gpio)?;
        Ok(())
    }

    /// Set operating mode, keeping OOK modulation selected
    fn set_mode(&mut self, mode: u8) -> Result<(), RadioError> {
        self.write_register(REG_OP_MODE, MODE_OOK | mode)
    }

    /// Wait for the PacketSent interrupt on DIO0
    fn wait_packet_sent(&mut self) -> Result<(), RadioError> {
        for _ in 0..1_000_000 {
            if self.dio0.is_high().map_err(|_| RadioError::Gpio)? {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(RadioError::Timeout)
    }

    /// Discard a pending packet by flushing the FIFO
    fn flush_fifo(&mut self) -> Result<(), RadioError> {
        self.write_register(REG_IRQ_FLAGS_2, IRQ2_FIFO_OVERRUN_MASK)
    }
}

impl<SPI, CS, RESET, DIO0> Radio for SX127x<SPI, CS, RESET, DIO0>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    RESET: OutputPin,
    DIO0: InputPin,
{
    type Error = RadioError;

    fn init(&mut self) -> Result<(), Self::Error> {
        // Modulation can only be changed in sleep mode
        self.set_mode(MODE_SLEEP)?;

        // Packet engine: variable length, CRC on, no whitening.
        // CRC auto clear stays enabled, so a frame failing the CRC
        // never raises PayloadReady.
        self.write_register(REG_PACKET_CONFIG_1, 0x90)?;
        self.write_register(REG_PACKET_CONFIG_2, 0x40)?; // Packet mode
        self.write_register(REG_PAYLOAD_LENGTH, FIFO_SIZE as u8)?;

        // Start TX as soon as the FIFO holds a byte
        self.write_register(REG_FIFO_THRESH, 0x8F)?;

        // Preamble: 4 bytes out, detector on 2 bytes with 0x0A chip errors
        self.write_register(REG_PREAMBLE_MSB, 0x00)?;
        self.write_register(REG_PREAMBLE_LSB, 0x04)?;
        self.write_register(REG_PREAMBLE_DETECT, 0xCA)?;

        // Sync word: on, 2 bytes
        self.write_register(REG_SYNC_CONFIG, 0x51)?;
        self.write_register(REG_SYNC_VALUE_1, 0x2D)?;
        self.write_register(REG_SYNC_VALUE_2, 0xD4)?;

        // OOK demodulator in peak threshold mode
        self.write_register(REG_OOK_PEAK, 0x28)?;

        // AGC auto, restart RX on preamble detect
        self.write_register(REG_RX_CONFIG, 0x0E)?;

        // Set LNA boost
        let lna = self.read_register(REG_LNA)?;
        self.write_register(REG_LNA, lna | 0x03)?;

        // DIO0: PacketSent in TX, PayloadReady in RX
        self.write_register(REG_DIO_MAPPING_1, 0x00)?;

        self.set_mode(MODE_STDBY)?;

        Ok(())
    }

    fn set_frequency(&mut self, freq: u32) -> Result<(), Self::Error> {
        self.frequency = freq;

        // Calculate register values
        let frf = (freq as u64 * (1 << 19) / FXOSC as u64) as u32;

        // Write frequency registers
        self.write_register(REG_FRF_MSB, ((frf >> 16) & 0xFF) as u8)?;
        self.write_register(REG_FRF_MID, ((frf >> 8) & 0xFF) as u8)?;
        self.write_register(REG_FRF_LSB, (frf & 0xFF) as u8)?;

        Ok(())
    }

    fn set_bitrate(&mut self, bitrate: u32) -> Result<(), Self::Error> {
        if bitrate == 0 {
            return Err(RadioError::Config);
        }

        // Bit rate divider from the crystal frequency
        let divider = FXOSC / bitrate;
        if divider > 0xFFFF {
            return Err(RadioError::Config);
        }

        self.write_register(REG_BITRATE_MSB, ((divider >> 8) & 0xFF) as u8)?;
        self.write_register(REG_BITRATE_LSB, (divider & 0xFF) as u8)?;

        Ok(())
    }

    fn set_tx_power(&mut self, power: i8) -> Result<(), Self::Error> {
        let power = power.clamp(2, 17) as u8;
        self.write_register(REG_PA_CONFIG, PA_BOOST | (power - 2))?;
        self.write_register(REG_PA_DAC, 0x84)?;
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
        Ok((op_mode & 0x07) == MODE_TX)
    }

    fn standby(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_STDBY)
    }

    fn sleep(&mut self) -> Result<(), Self::Error> {
        self.set_mode(MODE_SLEEP)
    }
}
