//! Pinwire Hardware Abstraction Layer
//!
//! This crate defines the capabilities the GPIO server consumes from the
//! board: pin handles with buffered direction/value changes, and a
//! byte-oriented serial transport. Chip-specific HALs (RP2040, ...) only
//! have to provide immediate register access through [`gpio::RawGpio`];
//! the staging and flush semantics live here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pinwire-core (dispatcher, server loop) │
//! └─────────────────────────────────────────┘
//!                     │  GpioPin, UartRx, UartTx
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinwire-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │  RawGpio, embedded-io
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinwire-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioPin`] - Buffered pin handle (direction, value, refresh, flush)
//! - [`gpio::RawGpio`] - Immediate hardware access behind a [`gpio::BufferedPin`]
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod io;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{BufferedPin, Direction, GpioPin, RawGpio};
pub use io::{IoError, IoRx, IoTx};
pub use uart::{SerialConfig, UartRx, UartTx};
