//! Board bring-up
//!
//! Turns the embedded `board.toml` into a claimed, ordered pin store.

use defmt::*;
use heapless::Vec;

use pinwire_core::board::RPI_PICO;
use pinwire_core::config::{parse_board_config, BoardConfig, PinSlot};
use pinwire_core::MAX_PINS;
use pinwire_hal_rp2040::{check_slot, FlexGpio, PinBank, PinError, RpPin};

/// Backing storage for the pin table, in logical index order
pub type PinStore = Vec<RpPin<'static>, MAX_PINS>;

/// Parse the embedded configuration, falling back to the Pico table
pub fn load_config(source: &str) -> BoardConfig {
    match parse_board_config(source) {
        Ok(config) => {
            info!(
                "Board '{}': {} pins, {} baud",
                config.name.as_str(),
                config.pins.len(),
                config.serial.baudrate
            );
            config
        }
        Err(e) => {
            error!("Failed to parse board.toml: {:?}", e);
            error!("Using built-in {} pin table", RPI_PICO.name);
            pico_config()
        }
    }
}

/// Claim every configured pin from the bank
///
/// A slot list the RP2040 cannot provide is replaced by the Pico table
/// before anything is claimed, so logical indices never shift.
pub fn claim_pins(bank: &mut PinBank, config: &mut BoardConfig) -> PinStore {
    if let Err(e) = check_slots(&config.pins) {
        error!("Configured pins unusable on RP2040: {:?}", e);
        error!("Using built-in {} pin table", RPI_PICO.name);
        config.pins = pico_config().pins;
    }

    let mut store = PinStore::new();
    for (index, slot) in config.pins.iter().enumerate() {
        let pin = match bank.take_slot(slot) {
            Ok(pin) => pin,
            Err(e) => {
                // Only reachable if the bank was already drawn from
                error!("Pin {} ({}) unavailable: {:?}", index, slot.label.as_str(), e);
                break;
            }
        };
        debug!("Pin {} -> {} (gpio{})", index, slot.label.as_str(), slot.pin);
        if store.push(FlexGpio::new(pin, config.input_pull).buffered()).is_err() {
            break;
        }
    }
    store
}

/// Check a slot list against the RP2040 pin space without claiming anything
fn check_slots(slots: &[PinSlot]) -> Result<(), PinError> {
    let mut used: u32 = 0;
    for slot in slots {
        let gpio = check_slot(slot.port, slot.pin)?;
        let bit = 1u32 << gpio;
        if used & bit != 0 {
            return Err(PinError::AlreadyTaken);
        }
        used |= bit;
    }
    Ok(())
}

fn pico_config() -> BoardConfig {
    // Pico labels fit the bounded config strings
    BoardConfig::from_descriptor(&RPI_PICO).unwrap_or_default()
}
