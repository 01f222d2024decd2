//! RP2040-specific HAL for the Pinwire GPIO server
//!
//! This crate provides RP2040 implementations of the shared `pinwire-hal`
//! traits:
//!
//! - [`gpio::FlexGpio`] - `RawGpio` over an embassy `Flex` pin
//! - [`pins::PinBank`] - take GPIO pins by number for config-driven tables
//! - [`uart`] - UART0 line settings from the board configuration

#![no_std]

pub mod gpio;
pub mod pins;
pub mod uart;

pub use gpio::{FlexGpio, RpPin};
pub use pins::{check_slot, split_peripherals, PinBank, PinError, SerialPeripherals};
pub use uart::uart_config;
