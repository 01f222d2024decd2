//! Command dispatch
//!
//! Validates a decoded command against the pin table and performs it on
//! the resolved handle. Reserved operation codes and indices beyond the
//! table are dropped without touching any handle and without a reply.

use pinwire_hal::{GpioPin, UartTx};
use pinwire_protocol::{Command, Operation, Reply};

use crate::table::PinTable;

/// Perform one operation on a pin handle
///
/// Every mutation is followed by its flush; a read always refreshes first.
pub fn execute<P: GpioPin + ?Sized>(pin: &mut P, op: Operation) -> Option<Reply> {
    match op {
        Operation::SetInput => {
            pin.set_direction_input();
            pin.flush_direction();
            None
        }
        Operation::SetOutput => {
            pin.set_direction_output();
            pin.flush_direction();
            None
        }
        Operation::SetHigh => {
            pin.write(true);
            pin.flush_value();
            None
        }
        Operation::SetLow => {
            pin.write(false);
            pin.flush_value();
            None
        }
        Operation::Read => {
            pin.refresh();
            Some(Reply::from_level(pin.read()))
        }
        Operation::Reserved(_) => None,
    }
}

/// Validate and perform a decoded command
///
/// Returns the reply byte to send, if any.
pub fn dispatch<P: GpioPin + ?Sized>(table: &mut PinTable<'_, P>, command: Command) -> Option<Reply> {
    if command.op.is_reserved() {
        return None;
    }
    let pin = table.get_mut(command.pin)?;
    execute(pin, command.op)
}

/// Decode a received byte, dispatch it and write any reply to `tx`
///
/// Only transport failures are reported.
pub fn dispatch_byte<P, T>(
    table: &mut PinTable<'_, P>,
    byte: u8,
    tx: &mut T,
) -> Result<Option<Reply>, T::Error>
where
    P: GpioPin + ?Sized,
    T: UartTx + ?Sized,
{
    let reply = dispatch(table, Command::decode(byte));
    if let Some(reply) = reply {
        tx.write_byte(reply.to_byte())?;
        tx.flush()?;
    }
    Ok(reply)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use proptest::prelude::*;

    /// Every call a pin handle observes
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PinEvent {
        DirectionInput,
        DirectionOutput,
        FlushDirection,
        Write(bool),
        FlushValue,
        Refresh,
        Read,
    }

    /// Mock pin handle recording every call
    #[derive(Default)]
    pub struct RecordingPin {
        pub events: RefCell<Vec<PinEvent>>,
        /// Level the hardware would report on refresh
        pub input: bool,
        cached: bool,
        pub staged: Option<bool>,
        pub level: bool,
    }

    impl RecordingPin {
        pub fn reporting(input: bool) -> Self {
            Self {
                input,
                ..Self::default()
            }
        }

        pub fn events(&self) -> Vec<PinEvent> {
            self.events.borrow().clone()
        }

        fn record(&self, event: PinEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    impl GpioPin for RecordingPin {
        fn set_direction_input(&mut self) {
            self.record(PinEvent::DirectionInput);
        }

        fn set_direction_output(&mut self) {
            self.record(PinEvent::DirectionOutput);
        }

        fn flush_direction(&mut self) {
            self.record(PinEvent::FlushDirection);
        }

        fn write(&mut self, high: bool) {
            self.record(PinEvent::Write(high));
            self.staged = Some(high);
        }

        fn flush_value(&mut self) {
            self.record(PinEvent::FlushValue);
            if let Some(high) = self.staged.take() {
                self.level = high;
            }
        }

        fn refresh(&mut self) {
            self.record(PinEvent::Refresh);
            self.cached = self.input;
        }

        fn read(&self) -> bool {
            self.record(PinEvent::Read);
            self.cached
        }
    }

    /// Transmitter collecting written bytes
    #[derive(Default)]
    pub struct VecTx {
        pub bytes: Vec<u8>,
        pub flushes: usize,
    }

    impl UartTx for VecTx {
        type Error = Infallible;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.bytes.extend_from_slice(data);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn board(len: usize) -> Vec<RecordingPin> {
        (0..len).map(|_| RecordingPin::default()).collect()
    }

    fn no_events(pins: &[RecordingPin]) -> bool {
        pins.iter().all(|pin| pin.events.borrow().is_empty())
    }

    #[test]
    fn test_set_input_flushes_direction() {
        let mut pin = RecordingPin::default();
        assert_eq!(execute(&mut pin, Operation::SetInput), None);
        assert_eq!(
            pin.events(),
            [PinEvent::DirectionInput, PinEvent::FlushDirection]
        );
    }

    #[test]
    fn test_set_low_flushes_value() {
        let mut pin = RecordingPin::default();
        pin.level = true;
        assert_eq!(execute(&mut pin, Operation::SetLow), None);
        assert_eq!(pin.events(), [PinEvent::Write(false), PinEvent::FlushValue]);
        assert!(!pin.level);
    }

    #[test]
    fn test_output_then_high_ordering() {
        let mut pins = board(4);
        {
            let mut table = PinTable::from_slice(&mut pins).unwrap();
            assert_eq!(dispatch(&mut table, Command::new(Operation::SetOutput, 2)), None);
            assert_eq!(dispatch(&mut table, Command::new(Operation::SetHigh, 2)), None);
        }
        assert_eq!(
            pins[2].events(),
            [
                PinEvent::DirectionOutput,
                PinEvent::FlushDirection,
                PinEvent::Write(true),
                PinEvent::FlushValue,
            ]
        );
        assert!(pins[2].level);
        assert!(no_events(&pins[..2]));
        assert!(no_events(&pins[3..]));
    }

    #[test]
    fn test_read_refreshes_before_reading() {
        for (input, expected) in [(true, b'1'), (false, b'0')] {
            let mut pins = [RecordingPin::reporting(input)];
            let mut tx = VecTx::default();
            {
                let mut table = PinTable::from_slice(&mut pins).unwrap();
                let byte = Command::new(Operation::Read, 0).encode();
                dispatch_byte(&mut table, byte, &mut tx).unwrap();
            }
            assert_eq!(pins[0].events(), [PinEvent::Refresh, PinEvent::Read]);
            assert_eq!(tx.bytes, [expected]);
            assert_eq!(tx.flushes, 1);
        }
    }

    #[test]
    fn test_read_pin_11_on_full_board() {
        let mut pins = board(32);
        pins[11].input = true;
        let mut tx = VecTx::default();
        {
            let mut table = PinTable::from_slice(&mut pins).unwrap();
            let reply = dispatch_byte(&mut table, 0x8B, &mut tx).unwrap();
            assert_eq!(reply, Some(Reply::High));
        }
        assert_eq!(tx.bytes, [0x31]);
        assert_eq!(pins[11].events(), [PinEvent::Refresh, PinEvent::Read]);
    }

    #[test]
    fn test_out_of_range_on_small_board_is_noop() {
        let mut pins = board(12);
        let mut tx = VecTx::default();
        {
            let mut table = PinTable::from_slice(&mut pins).unwrap();
            assert_eq!(dispatch_byte(&mut table, 0x2D, &mut tx).unwrap(), None);
        }
        assert!(tx.bytes.is_empty());
        assert_eq!(tx.flushes, 0);
        assert!(no_events(&pins));
    }

    #[test]
    fn test_repeated_high_is_stable() {
        let mut pins = board(1);
        {
            let mut table = PinTable::from_slice(&mut pins).unwrap();
            for _ in 0..5 {
                dispatch(&mut table, Command::new(Operation::SetHigh, 0));
            }
        }
        assert!(pins[0].level);
        let events = pins[0].events();
        assert_eq!(events.len(), 10);
        assert!(events
            .chunks(2)
            .all(|pair| pair == [PinEvent::Write(true), PinEvent::FlushValue]));
    }

    #[test]
    fn test_empty_table_ignores_everything() {
        let mut pins: [RecordingPin; 0] = [];
        let mut tx = VecTx::default();
        let mut table = PinTable::from_slice(&mut pins).unwrap();
        for byte in 0..=u8::MAX {
            assert_eq!(dispatch_byte(&mut table, byte, &mut tx).unwrap(), None);
        }
        assert!(tx.bytes.is_empty());
    }

    proptest! {
        #[test]
        fn prop_out_of_range_is_silent(len in 0usize..32, byte in any::<u8>()) {
            prop_assume!((byte & 0x1F) as usize >= len);
            let mut pins = board(len);
            let mut tx = VecTx::default();
            {
                let mut table = PinTable::from_slice(&mut pins).unwrap();
                prop_assert_eq!(dispatch_byte(&mut table, byte, &mut tx).unwrap(), None);
            }
            prop_assert!(tx.bytes.is_empty());
            prop_assert!(no_events(&pins));
        }

        #[test]
        fn prop_reserved_codes_are_silent(code in 5u8..8, pin in 0u8..32) {
            let mut pins = board(32);
            let mut tx = VecTx::default();
            {
                let mut table = PinTable::from_slice(&mut pins).unwrap();
                let byte = (code << 5) | pin;
                prop_assert_eq!(dispatch_byte(&mut table, byte, &mut tx).unwrap(), None);
            }
            prop_assert!(tx.bytes.is_empty());
            prop_assert!(no_events(&pins));
        }
    }
}
