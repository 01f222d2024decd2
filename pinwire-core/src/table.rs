//! Pin table
//!
//! Maps logical pin indices to the board's pin handles. The handles are
//! borrowed from whoever owns the hardware; the table is filled once at
//! startup and only read (through `get_mut`) afterwards.

use heapless::Vec;
use pinwire_hal::GpioPin;

/// Capacity of a pin table: every index the 5-bit protocol field can carry
pub const MAX_PINS: usize = 32;

/// Errors while building a pin table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// More than [`MAX_PINS`] handles supplied
    Full,
}

/// Ordered, fixed-capacity table of pin handles
///
/// Use `P = dyn GpioPin` to mix pin types on one board.
pub struct PinTable<'a, P: ?Sized> {
    pins: Vec<&'a mut P, MAX_PINS>,
}

impl<'a, P: GpioPin + ?Sized> Default for PinTable<'a, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, P: GpioPin + ?Sized> PinTable<'a, P> {
    /// Create an empty table
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Append a handle at the next logical index
    pub fn push(&mut self, pin: &'a mut P) -> Result<(), TableError> {
        self.pins.push(pin).map_err(|_| TableError::Full)
    }

    /// Number of usable slots on this board
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn capacity(&self) -> usize {
        MAX_PINS
    }

    /// Resolve a logical index to its handle
    ///
    /// Returns `None` for any index at or beyond `len()`.
    pub fn get_mut(&mut self, index: u8) -> Option<&mut P> {
        self.pins.get_mut(index as usize).map(|pin| &mut **pin)
    }
}

impl<'a, P: GpioPin> PinTable<'a, P> {
    /// Build a table over a slice of handles, in slice order
    pub fn from_slice(pins: &'a mut [P]) -> Result<Self, TableError> {
        let mut table = Self::new();
        for pin in pins.iter_mut() {
            table.push(pin)?;
        }
        Ok(table)
    }
}
