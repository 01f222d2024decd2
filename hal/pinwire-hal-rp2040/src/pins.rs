//! Pin allocation for config-driven pin tables
//!
//! Provides a way to get GPIO pins by number at runtime, so the pin table
//! can come from `board.toml` rather than being hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_0, PIN_1, UART0};
use embassy_rp::{Peri, Peripherals};

use pinwire_core::config::PinSlot;

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// GPIO carrying UART0 TX (host link)
pub const UART0_TX_GPIO: u8 = 0;

/// GPIO carrying UART0 RX (host link)
pub const UART0_RX_GPIO: u8 = 1;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid, single port)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the serial link
    Reserved,
}

/// Validate a configured slot against the RP2040 pin space
///
/// Returns the GPIO number on success.
pub fn check_slot(port: u8, pin: u8) -> Result<u8, PinError> {
    if port != 0 || pin as usize >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    if pin == UART0_TX_GPIO || pin == UART0_RX_GPIO {
        return Err(PinError::Reserved);
    }
    Ok(pin)
}

/// Pin bank holding every GPIO not used by the serial link
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Take a pin by number
    pub fn take(&mut self, gpio: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        let gpio = check_slot(0, gpio)?;
        self.pins[gpio as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Take the pin a configured slot refers to
    pub fn take_slot(&mut self, slot: &PinSlot) -> Result<Peri<'static, AnyPin>, PinError> {
        let gpio = check_slot(slot.port, slot.pin)?;
        self.take(gpio)
    }

    /// Check if a pin is available
    pub fn is_available(&self, gpio: u8) -> bool {
        self.pins
            .get(gpio as usize)
            .is_some_and(|pin| pin.is_some())
    }
}

/// UART0 and its pins, kept out of the bank
pub struct SerialPeripherals {
    pub uart: Peri<'static, UART0>,
    pub tx: Peri<'static, PIN_0>,
    pub rx: Peri<'static, PIN_1>,
}

/// Split the chip's peripherals into the pin bank and the host link
pub fn split_peripherals(p: Peripherals) -> (PinBank, SerialPeripherals) {
    let mut pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT] = core::array::from_fn(|_| None);

    macro_rules! bank {
        ($($n:literal => $pin:ident),* $(,)?) => {
            $( pins[$n] = Some(p.$pin.into()); )*
        };
    }

    bank! {
        2 => PIN_2, 3 => PIN_3, 4 => PIN_4, 5 => PIN_5, 6 => PIN_6, 7 => PIN_7,
        8 => PIN_8, 9 => PIN_9, 10 => PIN_10, 11 => PIN_11, 12 => PIN_12,
        13 => PIN_13, 14 => PIN_14, 15 => PIN_15, 16 => PIN_16, 17 => PIN_17,
        18 => PIN_18, 19 => PIN_19, 20 => PIN_20, 21 => PIN_21, 22 => PIN_22,
        23 => PIN_23, 24 => PIN_24, 25 => PIN_25, 26 => PIN_26, 27 => PIN_27,
        28 => PIN_28, 29 => PIN_29,
    }

    let serial = SerialPeripherals {
        uart: p.UART0,
        tx: p.PIN_0,
        rx: p.PIN_1,
    };

    (PinBank { pins }, serial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_slot() {
        assert_eq!(check_slot(0, 2), Ok(2));
        assert_eq!(check_slot(0, 29), Ok(29));

        assert_eq!(check_slot(0, 0), Err(PinError::Reserved));
        assert_eq!(check_slot(0, 1), Err(PinError::Reserved));
        assert_eq!(check_slot(0, 30), Err(PinError::InvalidPin));
        assert_eq!(check_slot(1, 4), Err(PinError::InvalidPin));
    }
}
