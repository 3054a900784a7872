//! Transmitter node for the STM32F411
//!
//! Sends the constant message once per interval over an SX1276-family
//! module wired to SPI1, flashing the status LED while each packet is
//! on the air. Console output goes to USART2 at 9600 baud.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use stm32f4xx_hal as hal;

use hal::{pac, prelude::*, serial::Config, spi::Spi};

use vwire::{
    config::LinkConfig,
    console::Console,
    device::LinkDevice,
    node::Role,
    radio::sx127x::SX127x,
};

const MESSAGE: &[u8] = b"hello";

#[entry]
fn main() -> ! {
    // Get peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Set up clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut delay = cp.SYST.delay(&clocks);

    // Configure GPIO pins
    let gpioa = dp.GPIOA.split();
    let gpiob = dp.GPIOB.split();
    let gpioc = dp.GPIOC.split();

    // Serial console on USART2
    let tx_pin = gpioa.pa2.into_alternate();
    let serial = dp
        .USART2
        .tx(tx_pin, Config::default().baudrate(9600.bps()), &clocks)
        .unwrap();
    let mut console = Console::new(serial);
    console.banner("Starting...").ok();

    // SPI for the radio
    let sck = gpioa.pa5.into_alternate();
    let miso = gpioa.pa6.into_alternate();
    let mosi = gpioa.pa7.into_alternate();
    let spi = Spi::new(
        dp.SPI1,
        (sck, miso, mosi),
        hal::spi::Mode {
            polarity: hal::spi::Polarity::IdleLow,
            phase: hal::spi::Phase::CaptureOnFirstTransition,
        },
        1.MHz(),
        &clocks,
    );

    // Radio control pins
    let cs = gpiob.pb6.into_push_pull_output();
    let reset = gpioc.pc7.into_push_pull_output();
    let dio0 = gpioc.pc8.into_floating_input();

    // Status LED
    let mut led = gpiob.pb0.into_push_pull_output();

    // Initialize radio
    let radio = match SX127x::new(spi, cs, reset, dio0) {
        Ok(radio) => radio,
        Err(_) => {
            // Rapid blink on radio init error
            loop {
                led.toggle();
                delay.delay_ms(100u32);
            }
        }
    };

    // Create link device in the transmitter role
    let config = LinkConfig::default();
    let mut device = match LinkDevice::new(radio, led, config, Role::Transmitter) {
        Ok(device) => device,
        Err(_) => {
            console.banner("radio setup failed").ok();
            loop {
                delay.delay_ms(1000u32);
            }
        }
    };

    let interval = device.tx_interval_ms().unwrap_or(1000);

    // Main loop - send the message once per interval
    loop {
        if device.send(MESSAGE).is_err() {
            console.banner("send failed").ok();
        }
        delay.delay_ms(interval);
    }
}
