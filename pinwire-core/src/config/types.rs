//! Board configuration types

use heapless::{String, Vec};
use pinwire_hal::SerialConfig;

use crate::board::BoardDescriptor;
use crate::table::MAX_PINS;

use super::ParseError;

/// Maximum board name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum pin label length
pub const MAX_LABEL_LEN: usize = 8;

/// Default delay before the server starts reading commands
pub const DEFAULT_STARTUP_DELAY_MS: u32 = 100;

/// Bias applied when a pin is switched to input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputPull {
    #[default]
    None,
    Up,
    Down,
}

/// One slot of the configured pin table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSlot {
    /// Designator as written in the config
    pub label: String<MAX_LABEL_LEN>,
    /// GPIO port (0 on single-bank chips)
    pub port: u8,
    /// Pin number within the port
    pub pin: u8,
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Board name
    pub name: String<MAX_NAME_LEN>,
    /// Delay before serving, in milliseconds
    pub startup_delay_ms: u32,
    /// Bias for input pins
    pub input_pull: InputPull,
    /// Serial line settings
    pub serial: SerialConfig,
    /// Pin table, in logical index order
    pub pins: Vec<PinSlot, MAX_PINS>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            startup_delay_ms: DEFAULT_STARTUP_DELAY_MS,
            input_pull: InputPull::None,
            serial: SerialConfig::default(),
            pins: Vec::new(),
        }
    }
}

impl BoardConfig {
    /// Configuration reproducing a built-in board with default settings
    pub fn from_descriptor(board: &BoardDescriptor) -> Result<Self, ParseError> {
        let mut config = Self {
            name: bounded(board.name)?,
            ..Self::default()
        };
        config.load_descriptor_pins(board)?;
        Ok(config)
    }

    /// Replace the pin table with a descriptor's pins
    pub(crate) fn load_descriptor_pins(&mut self, board: &BoardDescriptor) -> Result<(), ParseError> {
        self.pins.clear();
        for assignment in board.pins {
            let slot = PinSlot {
                label: bounded(assignment.label)?,
                port: assignment.port,
                pin: assignment.pin,
            };
            self.pins.push(slot).map_err(|_| ParseError::TooManyPins)?;
        }
        Ok(())
    }

    /// Logical index of a slot label, case-insensitive
    pub fn index_of(&self, label: &str) -> Option<u8> {
        self.pins
            .iter()
            .position(|slot| slot.label.eq_ignore_ascii_case(label))
            .map(|i| i as u8)
    }
}

/// Copy a str into a bounded heapless string
pub(crate) fn bounded<const N: usize>(s: &str) -> Result<String<N>, ParseError> {
    let mut out = String::new();
    out.push_str(s).map_err(|_| ParseError::InvalidValue)?;
    Ok(out)
}
