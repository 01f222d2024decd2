//! Command byte encoding and decoding
//!
//! Bit layout: `[7:5]` operation code, `[4:0]` pin index.

use crate::ProtocolError;

/// Mask selecting the pin index bits
pub const PIN_MASK: u8 = 0x1F;

/// Shift of the operation code field
pub const OP_SHIFT: u8 = 5;

/// Mask of the operation code after shifting
const OP_MASK: u8 = 0x07;

/// Highest pin index the 5-bit field can carry
pub const MAX_PIN_INDEX: u8 = PIN_MASK;

// Wire format operation codes
const OP_SET_INPUT: u8 = 0;
const OP_SET_OUTPUT: u8 = 1;
const OP_SET_HIGH: u8 = 2;
const OP_SET_LOW: u8 = 3;
const OP_READ: u8 = 4;

/// Pin operation carried in the top three bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation {
    /// Make the pin an input
    SetInput,
    /// Make the pin an output
    SetOutput,
    /// Drive the pin high
    SetHigh,
    /// Drive the pin low
    SetLow,
    /// Sample the pin and reply with its level
    Read,
    /// Codes 5-7: accepted on the wire, never acted on
    Reserved(u8),
}

impl Operation {
    /// Map a 3-bit code to an operation
    ///
    /// Only the low three bits of `code` are considered.
    pub const fn from_code(code: u8) -> Self {
        match code & OP_MASK {
            OP_SET_INPUT => Operation::SetInput,
            OP_SET_OUTPUT => Operation::SetOutput,
            OP_SET_HIGH => Operation::SetHigh,
            OP_SET_LOW => Operation::SetLow,
            OP_READ => Operation::Read,
            other => Operation::Reserved(other),
        }
    }

    /// The 3-bit wire code
    pub const fn code(self) -> u8 {
        match self {
            Operation::SetInput => OP_SET_INPUT,
            Operation::SetOutput => OP_SET_OUTPUT,
            Operation::SetHigh => OP_SET_HIGH,
            Operation::SetLow => OP_SET_LOW,
            Operation::Read => OP_READ,
            Operation::Reserved(code) => code & OP_MASK,
        }
    }

    /// Returns true if the board answers this operation
    pub const fn expects_reply(self) -> bool {
        matches!(self, Operation::Read)
    }

    /// Returns true for the unassigned codes 5-7
    pub const fn is_reserved(self) -> bool {
        matches!(self, Operation::Reserved(_))
    }
}

/// A decoded command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Operation to perform
    pub op: Operation,
    /// Logical pin index (0-31)
    pub pin: u8,
}

impl Command {
    /// Build a command, masking the pin index into the 5-bit field
    pub const fn new(op: Operation, pin: u8) -> Self {
        Self {
            op,
            pin: pin & PIN_MASK,
        }
    }

    /// Build a command, rejecting pin indices that do not fit
    pub const fn try_new(op: Operation, pin: u8) -> Result<Self, ProtocolError> {
        if pin > MAX_PIN_INDEX {
            return Err(ProtocolError::PinOutOfRange(pin));
        }
        Ok(Self { op, pin })
    }

    /// Split a received byte into operation and pin index
    ///
    /// Total: every byte value decodes.
    pub const fn decode(byte: u8) -> Self {
        Self {
            op: Operation::from_code(byte >> OP_SHIFT),
            pin: byte & PIN_MASK,
        }
    }

    /// Wire byte for this command
    pub const fn encode(self) -> u8 {
        (self.op.code() << OP_SHIFT) | (self.pin & PIN_MASK)
    }
}

impl From<u8> for Command {
    fn from(byte: u8) -> Self {
        Command::decode(byte)
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_read_pin_11() {
        // 100_01011
        let cmd = Command::decode(0x8B);
        assert_eq!(cmd.op, Operation::Read);
        assert_eq!(cmd.pin, 11);
    }

    #[test]
    fn test_output_pin_13() {
        // 001_01101
        let cmd = Command::decode(0x2D);
        assert_eq!(cmd.op, Operation::SetOutput);
        assert_eq!(cmd.pin, 13);
    }

    #[test]
    fn test_operation_codes() {
        assert_eq!(Operation::from_code(0), Operation::SetInput);
        assert_eq!(Operation::from_code(1), Operation::SetOutput);
        assert_eq!(Operation::from_code(2), Operation::SetHigh);
        assert_eq!(Operation::from_code(3), Operation::SetLow);
        assert_eq!(Operation::from_code(4), Operation::Read);
        for code in 5..8 {
            let op = Operation::from_code(code);
            assert_eq!(op, Operation::Reserved(code));
            assert!(op.is_reserved());
            assert!(!op.expects_reply());
        }
    }

    #[test]
    fn test_only_read_expects_reply() {
        assert!(Operation::Read.expects_reply());
        assert!(!Operation::SetInput.expects_reply());
        assert!(!Operation::SetOutput.expects_reply());
        assert!(!Operation::SetHigh.expects_reply());
        assert!(!Operation::SetLow.expects_reply());
    }

    #[test]
    fn test_encode_host_commands() {
        assert_eq!(Command::new(Operation::SetInput, 0).encode(), 0x00);
        assert_eq!(Command::new(Operation::SetOutput, 13).encode(), 0x2D);
        assert_eq!(Command::new(Operation::SetHigh, 31).encode(), 0x5F);
        assert_eq!(Command::new(Operation::Read, 11).encode(), 0x8B);
        assert_eq!(u8::from(Command::new(Operation::Reserved(7), 1)), 0xE1);
    }

    #[test]
    fn test_try_new_rejects_wide_pin() {
        assert_eq!(
            Command::try_new(Operation::SetHigh, 32),
            Err(ProtocolError::PinOutOfRange(32))
        );
        assert!(Command::try_new(Operation::SetHigh, 31).is_ok());
    }

    proptest! {
        #[test]
        fn prop_decode_splits_fields(byte in any::<u8>()) {
            let cmd = Command::decode(byte);
            prop_assert_eq!(cmd.pin, byte & 0x1F);
            prop_assert_eq!(cmd.op.code(), (byte >> 5) & 0x07);
        }

        #[test]
        fn prop_decode_encode_identity(byte in any::<u8>()) {
            prop_assert_eq!(Command::from(byte).encode(), byte);
        }
    }
}
