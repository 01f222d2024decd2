//! GPIO backend
//!
//! Wraps an embassy `Flex` pin so it can switch direction at runtime. The
//! staging/flush behaviour comes from `pinwire_hal::BufferedPin`.

use embassy_rp::gpio::{AnyPin, Flex, Level, Pull};
use embassy_rp::Peri;

use pinwire_core::config::InputPull;
use pinwire_hal::{BufferedPin, Direction, RawGpio};

/// Buffered pin handle used in the RP2040 pin table
pub type RpPin<'d> = BufferedPin<FlexGpio<'d>>;

/// Raw RP2040 GPIO with runtime-switchable direction
pub struct FlexGpio<'d> {
    flex: Flex<'d>,
    /// Bias applied whenever the pin becomes an input
    input_pull: Pull,
}

impl<'d> FlexGpio<'d> {
    /// Take over a pin, leaving it as an input
    pub fn new(pin: Peri<'d, AnyPin>, input_pull: InputPull) -> Self {
        let mut gpio = Self {
            flex: Flex::new(pin),
            input_pull: pull_for(input_pull),
        };
        gpio.apply_direction(Direction::Input);
        gpio
    }

    /// Wrap into the buffered handle the dispatcher drives
    pub fn buffered(self) -> RpPin<'d> {
        BufferedPin::new(self)
    }
}

impl RawGpio for FlexGpio<'_> {
    fn apply_direction(&mut self, direction: Direction) {
        match direction {
            Direction::Input => {
                self.flex.set_pull(self.input_pull);
                self.flex.set_as_input();
            }
            Direction::Output => {
                self.flex.set_pull(Pull::None);
                self.flex.set_as_output();
            }
        }
    }

    fn apply_level(&mut self, high: bool) {
        self.flex.set_level(Level::from(high));
    }

    fn sample(&self) -> bool {
        self.flex.is_high()
    }
}

/// Map the configured input bias to the embassy pull setting
pub fn pull_for(pull: InputPull) -> Pull {
    match pull {
        InputPull::None => Pull::None,
        InputPull::Up => Pull::Up,
        InputPull::Down => Pull::Down,
    }
}
