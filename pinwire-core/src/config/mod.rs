//! Board configuration
//!
//! Boards are described by a small TOML file compiled into the firmware.
//! Parsing happens on the device, without an allocator, into heapless
//! types.

pub mod parse;
pub mod types;

pub use parse::{parse_board_config, parse_pin};
pub use types::{BoardConfig, InputPull, PinSlot, MAX_LABEL_LEN, MAX_NAME_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key not recognised in its section
    UnknownKey,
    /// `[board] name` is not a built-in board and no pins were listed
    UnknownBoard,
    /// More pins than the protocol can address
    TooManyPins,
    /// Pin designator could not be parsed
    InvalidPin,
    /// Neither a built-in board nor a pin list was given
    MissingPins,
}
