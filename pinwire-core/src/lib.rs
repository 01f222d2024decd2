//! Board-agnostic core of the Pinwire GPIO server
//!
//! This crate contains everything that does not depend on a specific chip:
//!
//! - Pin table holding the board's pin handles by logical index
//! - Command dispatch onto [`pinwire_hal::GpioPin`] handles
//! - The one-byte-at-a-time server loop
//! - Built-in board descriptors and the `board.toml` parser
//! - A host-side client speaking the same protocol

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod board;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod server;
pub mod table;

pub use board::{BoardDescriptor, PinAssignment};
pub use client::{Client, ClientError, RemotePin};
pub use dispatch::{dispatch, dispatch_byte, execute};
pub use server::{ServeError, Server};
pub use table::{PinTable, TableError, MAX_PINS};
