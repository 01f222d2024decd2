//! Pinwire - Remote GPIO Server Firmware
//!
//! Lets a host drive the GPIO pins of an RP2040 board over a serial link,
//! one command byte at a time. The pin table comes from `board.toml`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pinwire_core::{PinTable, Server};
use pinwire_hal_rp2040::{split_peripherals, uart_config};

use crate::board::PinStore;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

mod board;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Pin handles borrowed by the serve task's table
static PINS: StaticCell<PinStore> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pinwire firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut bank, serial) = split_peripherals(p);
    info!("Peripherals initialized");

    let mut config = board::load_config(EMBEDDED_CONFIG);

    let pins = PINS.init(board::claim_pins(&mut bank, &mut config));
    let mut table = PinTable::new();
    for pin in pins.iter_mut() {
        // Store capacity matches the table's
        if table.push(pin).is_err() {
            break;
        }
    }
    info!("Pin table ready: {} of {} slots", table.len(), table.capacity());

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(serial.uart, serial.tx, serial.rx, uart_config(&config.serial));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART0 initialized at {} baud", config.serial.baudrate);

    // Give the host time to open the port before bytes are consumed
    Timer::after_millis(config.startup_delay_ms as u64).await;

    spawner
        .spawn(tasks::serve_task(Server::new(table), rx, tx))
        .unwrap();

    info!("Serve task spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
