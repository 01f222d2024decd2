//! Built-in board descriptors
//!
//! A board is just data: an ordered list of physical pins. The position of
//! a pin in the list is its logical index on the wire. On the Arduino-style
//! boards d0/d1 carry the serial link, so the table starts at d2.

/// One physical pin in a board's table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// Designator printed on the board (e.g. "d13", "a0", "gpio25")
    pub label: &'static str,
    /// GPIO port (0 on chips with a single bank)
    pub port: u8,
    /// Pin number within the port
    pub pin: u8,
}

impl PinAssignment {
    pub const fn new(label: &'static str, port: u8, pin: u8) -> Self {
        Self { label, port, pin }
    }
}

/// Board-specific pin table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardDescriptor {
    /// Short name used in `board.toml`
    pub name: &'static str,
    /// Pins in logical index order
    pub pins: &'static [PinAssignment],
}

impl BoardDescriptor {
    /// Number of logical pins
    pub const fn len(&self) -> usize {
        self.pins.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Physical pin behind a logical index
    pub fn assignment(&self, index: u8) -> Option<&PinAssignment> {
        self.pins.get(index as usize)
    }

    /// Logical index of a designator, case-insensitive
    pub fn index_of(&self, label: &str) -> Option<u8> {
        self.pins
            .iter()
            .position(|p| p.label.eq_ignore_ascii_case(label))
            .map(|i| i as u8)
    }
}

const fn p(label: &'static str, port: u8, pin: u8) -> PinAssignment {
    PinAssignment::new(label, port, pin)
}

/// DB103 (LPC1114) board: 12 slots
pub const DB103: BoardDescriptor = BoardDescriptor {
    name: "db103",
    pins: &[
        p("scl", 0, 4),
        p("sda", 0, 5),
        p("p0_6", 0, 6),
        p("p0_7", 0, 7),
        p("p1_0", 1, 0),
        p("p1_1", 1, 1),
        p("p1_2", 1, 2),
        p("p1_3", 1, 3),
        p("p1_4", 1, 4),
        p("p1_5", 1, 5),
        p("p1_8", 1, 8),
        p("p1_9", 1, 9),
    ],
};

/// Arduino Uno: d2-d13, a0-a5 (18 slots)
pub const ARDUINO_UNO: BoardDescriptor = BoardDescriptor {
    name: "arduino-uno",
    pins: &[
        p("d2", 0, 2),
        p("d3", 0, 3),
        p("d4", 0, 4),
        p("d5", 0, 5),
        p("d6", 0, 6),
        p("d7", 0, 7),
        p("d8", 0, 8),
        p("d9", 0, 9),
        p("d10", 0, 10),
        p("d11", 0, 11),
        p("d12", 0, 12),
        p("d13", 0, 13),
        p("a0", 0, 14),
        p("a1", 0, 15),
        p("a2", 0, 16),
        p("a3", 0, 17),
        p("a4", 0, 18),
        p("a5", 0, 19),
    ],
};

/// Arduino Due: d2-d25, a0-a7 (32 slots)
pub const ARDUINO_DUE: BoardDescriptor = BoardDescriptor {
    name: "arduino-due",
    pins: &[
        p("d2", 0, 2),
        p("d3", 0, 3),
        p("d4", 0, 4),
        p("d5", 0, 5),
        p("d6", 0, 6),
        p("d7", 0, 7),
        p("d8", 0, 8),
        p("d9", 0, 9),
        p("d10", 0, 10),
        p("d11", 0, 11),
        p("d12", 0, 12),
        p("d13", 0, 13),
        p("d14", 0, 14),
        p("d15", 0, 15),
        p("d16", 0, 16),
        p("d17", 0, 17),
        p("d18", 0, 18),
        p("d19", 0, 19),
        p("d20", 0, 20),
        p("d21", 0, 21),
        p("d22", 0, 22),
        p("d23", 0, 23),
        p("d24", 0, 24),
        p("d25", 0, 25),
        p("a0", 0, 54),
        p("a1", 0, 55),
        p("a2", 0, 56),
        p("a3", 0, 57),
        p("a4", 0, 58),
        p("a5", 0, 59),
        p("a6", 0, 60),
        p("a7", 0, 61),
    ],
};

/// Raspberry Pi Pico: gpio2-gpio22, the LED on gpio25, gpio26-gpio28 (25 slots)
///
/// gpio0/gpio1 are UART0 and not part of the table.
pub const RPI_PICO: BoardDescriptor = BoardDescriptor {
    name: "rpi-pico",
    pins: &[
        p("gpio2", 0, 2),
        p("gpio3", 0, 3),
        p("gpio4", 0, 4),
        p("gpio5", 0, 5),
        p("gpio6", 0, 6),
        p("gpio7", 0, 7),
        p("gpio8", 0, 8),
        p("gpio9", 0, 9),
        p("gpio10", 0, 10),
        p("gpio11", 0, 11),
        p("gpio12", 0, 12),
        p("gpio13", 0, 13),
        p("gpio14", 0, 14),
        p("gpio15", 0, 15),
        p("gpio16", 0, 16),
        p("gpio17", 0, 17),
        p("gpio18", 0, 18),
        p("gpio19", 0, 19),
        p("gpio20", 0, 20),
        p("gpio21", 0, 21),
        p("gpio22", 0, 22),
        p("gpio25", 0, 25),
        p("gpio26", 0, 26),
        p("gpio27", 0, 27),
        p("gpio28", 0, 28),
    ],
};

/// Every built-in board
pub const BOARDS: &[BoardDescriptor] = &[DB103, ARDUINO_UNO, ARDUINO_DUE, RPI_PICO];

/// Look up a built-in board by name, case-insensitive
pub fn find_board(name: &str) -> Option<&'static BoardDescriptor> {
    BOARDS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MAX_PINS;

    #[test]
    fn test_table_sizes() {
        assert_eq!(DB103.len(), 12);
        assert_eq!(ARDUINO_UNO.len(), 18);
        assert_eq!(ARDUINO_DUE.len(), 32);
        assert_eq!(RPI_PICO.len(), 25);
        assert!(BOARDS.iter().all(|b| b.len() <= MAX_PINS));
    }

    #[test]
    fn test_serial_pins_excluded() {
        // d0/d1 are the serial link, so d2 is logical pin 0
        assert_eq!(ARDUINO_UNO.index_of("d2"), Some(0));
        assert_eq!(ARDUINO_UNO.index_of("d13"), Some(11));
        assert_eq!(ARDUINO_UNO.index_of("d0"), None);
        assert_eq!(ARDUINO_DUE.index_of("a7"), Some(31));
        assert_eq!(RPI_PICO.index_of("gpio1"), None);
    }

    #[test]
    fn test_index_of_ignores_case() {
        assert_eq!(DB103.index_of("SCL"), Some(0));
        assert_eq!(DB103.index_of("P1_9"), Some(11));
        assert_eq!(RPI_PICO.index_of("GPIO25"), Some(21));
    }

    #[test]
    fn test_assignment_lookup() {
        let led = RPI_PICO.assignment(21).unwrap();
        assert_eq!(led.label, "gpio25");
        assert_eq!((led.port, led.pin), (0, 25));
        assert!(DB103.assignment(12).is_none());
    }

    #[test]
    fn test_labels_unique() {
        for board in BOARDS {
            for (i, pin) in board.pins.iter().enumerate() {
                assert_eq!(board.index_of(pin.label), Some(i as u8), "{}", board.name);
            }
        }
    }

    #[test]
    fn test_find_board() {
        assert_eq!(find_board("rpi-pico"), Some(&RPI_PICO));
        assert_eq!(find_board("Arduino-Uno"), Some(&ARDUINO_UNO));
        assert!(find_board("esp32").is_none());
    }
}
