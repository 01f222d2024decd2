//! Read reply byte

use crate::ProtocolError;

/// Reply byte for a pin reading low
pub const REPLY_LOW: u8 = b'0';

/// Reply byte for a pin reading high
pub const REPLY_HIGH: u8 = b'1';

/// The single ASCII byte answering a read command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    Low,
    High,
}

impl Reply {
    pub const fn from_level(high: bool) -> Self {
        if high {
            Reply::High
        } else {
            Reply::Low
        }
    }

    /// Parse a reply received by the host
    pub const fn from_byte(byte: u8) -> Result<Self, ProtocolError> {
        match byte {
            REPLY_LOW => Ok(Reply::Low),
            REPLY_HIGH => Ok(Reply::High),
            other => Err(ProtocolError::InvalidReply(other)),
        }
    }

    /// Convert to wire format byte
    pub const fn to_byte(self) -> u8 {
        match self {
            Reply::Low => REPLY_LOW,
            Reply::High => REPLY_HIGH,
        }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Reply::High)
    }
}

impl From<bool> for Reply {
    fn from(high: bool) -> Self {
        Reply::from_level(high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_bytes() {
        assert_eq!(Reply::from_level(true).to_byte(), 0x31);
        assert_eq!(Reply::from_level(false).to_byte(), 0x30);
    }

    #[test]
    fn test_parse_reply() {
        assert_eq!(Reply::from_byte(b'1'), Ok(Reply::High));
        assert_eq!(Reply::from_byte(b'0'), Ok(Reply::Low));
        assert!(Reply::from_byte(b'1').unwrap().is_high());
        assert!(!Reply::from_byte(b'0').unwrap().is_high());
    }

    #[test]
    fn test_invalid_reply() {
        assert_eq!(Reply::from_byte(0x00), Err(ProtocolError::InvalidReply(0x00)));
        assert_eq!(Reply::from_byte(b'\n'), Err(ProtocolError::InvalidReply(b'\n')));
    }
}
