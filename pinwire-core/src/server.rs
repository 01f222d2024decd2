//! Server loop
//!
//! Reads one byte, dispatches it completely, and only then asks for the
//! next one. The blocking byte read is the only place the loop waits.

use pinwire_hal::{GpioPin, UartRx, UartTx};
use pinwire_protocol::{Command, Reply};

use crate::dispatch::dispatch;
use crate::table::PinTable;

/// Transport failure that stopped the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServeError<R, T> {
    /// Receiving the next command byte failed
    Rx(R),
    /// Sending a read reply failed
    Tx(T),
}

/// GPIO command server over a fixed pin table
pub struct Server<'a, P: ?Sized> {
    table: PinTable<'a, P>,
    handled: u32,
}

impl<'a, P: GpioPin + ?Sized> Server<'a, P> {
    /// Create a server that owns the board's pin table for its lifetime
    pub fn new(table: PinTable<'a, P>) -> Self {
        Self { table, handled: 0 }
    }

    pub fn table(&self) -> &PinTable<'a, P> {
        &self.table
    }

    /// Number of command bytes processed so far (wraps)
    pub fn commands_handled(&self) -> u32 {
        self.handled
    }

    /// Decode and dispatch one received byte
    pub fn handle_byte(&mut self, byte: u8) -> Option<Reply> {
        self.handled = self.handled.wrapping_add(1);
        dispatch(&mut self.table, Command::decode(byte))
    }

    /// Wait for one command byte, execute it, and send any reply
    pub fn serve_one<Rx, Tx>(
        &mut self,
        rx: &mut Rx,
        tx: &mut Tx,
    ) -> Result<(), ServeError<Rx::Error, Tx::Error>>
    where
        Rx: UartRx + ?Sized,
        Tx: UartTx + ?Sized,
    {
        let byte = rx.read_byte().map_err(ServeError::Rx)?;
        if let Some(reply) = self.handle_byte(byte) {
            tx.write_byte(reply.to_byte()).map_err(ServeError::Tx)?;
            tx.flush().map_err(ServeError::Tx)?;
        }
        Ok(())
    }

    /// Serve commands until the transport fails
    pub fn run<Rx, Tx>(&mut self, rx: &mut Rx, tx: &mut Tx) -> ServeError<Rx::Error, Tx::Error>
    where
        Rx: UartRx + ?Sized,
        Tx: UartTx + ?Sized,
    {
        loop {
            if let Err(e) = self.serve_one(rx, tx) {
                return e;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::tests::{PinEvent, RecordingPin, VecTx};
    use pinwire_hal::{IoError, IoRx};
    use pinwire_protocol::Operation;

    fn cmd(op: Operation, pin: u8) -> u8 {
        Command::new(op, pin).encode()
    }

    #[test]
    fn test_run_processes_stream_in_order() {
        let mut pins: Vec<RecordingPin> = (0..18).map(|_| RecordingPin::default()).collect();
        pins[5].input = true;

        let stream = [
            cmd(Operation::SetOutput, 3),
            cmd(Operation::SetHigh, 3),
            cmd(Operation::SetInput, 5),
            cmd(Operation::Read, 5),
            cmd(Operation::Read, 6),
            cmd(Operation::SetHigh, 20), // beyond 18 slots
            0xE3,                        // reserved code 7
        ];
        let mut rx = IoRx::new(&stream[..]);
        let mut tx = VecTx::default();

        let handled = {
            let table = PinTable::from_slice(&mut pins).unwrap();
            let mut server = Server::new(table);
            let err = server.run(&mut rx, &mut tx);
            assert_eq!(err, ServeError::Rx(IoError::Eof));
            server.commands_handled()
        };

        assert_eq!(handled, 7);
        assert_eq!(tx.bytes, b"10");
        assert_eq!(
            pins[3].events(),
            [
                PinEvent::DirectionOutput,
                PinEvent::FlushDirection,
                PinEvent::Write(true),
                PinEvent::FlushValue,
            ]
        );
        assert_eq!(
            pins[5].events(),
            [
                PinEvent::DirectionInput,
                PinEvent::FlushDirection,
                PinEvent::Refresh,
                PinEvent::Read,
            ]
        );
        assert_eq!(pins[6].events(), [PinEvent::Refresh, PinEvent::Read]);
    }

    #[test]
    fn test_serve_one_without_reply_does_not_touch_tx() {
        let mut pins = [RecordingPin::default()];
        let stream = [cmd(Operation::SetLow, 0)];
        let mut rx = IoRx::new(&stream[..]);
        let mut tx = VecTx::default();

        let table = PinTable::from_slice(&mut pins).unwrap();
        let mut server = Server::new(table);
        assert_eq!(server.serve_one(&mut rx, &mut tx), Ok(()));
        assert!(tx.bytes.is_empty());
        assert_eq!(tx.flushes, 0);
        assert_eq!(server.table().len(), 1);
    }

    #[test]
    fn test_handle_byte_counts_ignored_commands() {
        let mut pins = [RecordingPin::default()];
        let table = PinTable::from_slice(&mut pins).unwrap();
        let mut server = Server::new(table);

        assert_eq!(server.handle_byte(0xFF), None);
        assert_eq!(server.handle_byte(cmd(Operation::Read, 1)), None);
        assert_eq!(server.handle_byte(cmd(Operation::Read, 0)), Some(Reply::Low));
        assert_eq!(server.commands_handled(), 3);
    }
}
