//! Pinwire GPIO Command Protocol
//!
//! This crate defines the serial protocol between a host and the GPIO
//! server running on a microcontroller board. Every command is a single
//! byte; there is no framing, no acknowledgement and no checksum.
//!
//! # Protocol Overview
//!
//! ```text
//! host → board             board → host (read only)
//! ┌──────────┬───────────┐  ┌─────────────┐
//! │ OP [7:5] │ PIN [4:0] │  │ '0' or '1'  │
//! │ 3 bits   │ 5 bits    │  │ 1 ASCII byte│
//! └──────────┴───────────┘  └─────────────┘
//! ```
//!
//! | Code | Operation  | Reply |
//! |------|------------|-------|
//! | 0    | input mode | none  |
//! | 1    | output mode| none  |
//! | 2    | drive high | none  |
//! | 3    | drive low  | none  |
//! | 4    | read       | `'0'` / `'1'` |
//! | 5-7  | reserved   | none, ignored |
//!
//! Every byte value decodes; interpreting reserved codes and pin indices
//! beyond the board's table as no-ops is up to the dispatcher.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod reply;

pub use command::{Command, Operation, MAX_PIN_INDEX, OP_SHIFT, PIN_MASK};
pub use reply::{Reply, REPLY_HIGH, REPLY_LOW};

/// Errors raised when building or interpreting protocol bytes on the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Pin index does not fit in the 5-bit field
    PinOutOfRange(u8),
    /// Read reply was neither `'0'` nor `'1'`
    InvalidReply(u8),
}
