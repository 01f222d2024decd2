//! Host-side client
//!
//! Drives a remote board over any [`UartRx`]/[`UartTx`] pair. Commands
//! other than read are fire-and-forget; a read blocks for the one reply
//! byte.

use pinwire_hal::{UartRx, UartTx};
use pinwire_protocol::{Command, Operation, ProtocolError, Reply};

/// Client-side failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClientError<R, T> {
    /// Receiving the reply failed
    Rx(R),
    /// Sending the command failed
    Tx(T),
    /// Bad pin index or unexpected reply byte
    Protocol(ProtocolError),
}

type Result<V, Rx, Tx> =
    core::result::Result<V, ClientError<<Rx as UartRx>::Error, <Tx as UartTx>::Error>>;

/// Remote GPIO client
pub struct Client<Rx, Tx> {
    rx: Rx,
    tx: Tx,
}

impl<Rx: UartRx, Tx: UartTx> Client<Rx, Tx> {
    pub fn new(rx: Rx, tx: Tx) -> Self {
        Self { rx, tx }
    }

    /// Release the transport halves
    pub fn into_parts(self) -> (Rx, Tx) {
        (self.rx, self.tx)
    }

    /// Handle for one remote pin
    pub fn pin(&mut self, index: u8) -> RemotePin<'_, Rx, Tx> {
        RemotePin {
            client: self,
            index,
        }
    }

    pub fn make_input(&mut self, pin: u8) -> Result<(), Rx, Tx> {
        self.send(Operation::SetInput, pin)
    }

    pub fn make_output(&mut self, pin: u8) -> Result<(), Rx, Tx> {
        self.send(Operation::SetOutput, pin)
    }

    /// Drive an output pin high or low
    pub fn write(&mut self, pin: u8, high: bool) -> Result<(), Rx, Tx> {
        let op = if high {
            Operation::SetHigh
        } else {
            Operation::SetLow
        };
        self.send(op, pin)
    }

    /// Sample a pin on the board
    ///
    /// Blocks until the board answers. A pin index beyond the board's table
    /// gets no answer, so only read pins the board actually has.
    pub fn read(&mut self, pin: u8) -> Result<bool, Rx, Tx> {
        self.send(Operation::Read, pin)?;
        let byte = self.rx.read_byte().map_err(ClientError::Rx)?;
        let reply = Reply::from_byte(byte).map_err(ClientError::Protocol)?;
        Ok(reply.is_high())
    }

    fn send(&mut self, op: Operation, pin: u8) -> Result<(), Rx, Tx> {
        let command = Command::try_new(op, pin).map_err(ClientError::Protocol)?;
        self.tx
            .write_byte(command.encode())
            .map_err(ClientError::Tx)?;
        self.tx.flush().map_err(ClientError::Tx)
    }
}

/// One pin on the remote board, borrowed from a [`Client`]
pub struct RemotePin<'c, Rx, Tx> {
    client: &'c mut Client<Rx, Tx>,
    index: u8,
}

impl<Rx: UartRx, Tx: UartTx> RemotePin<'_, Rx, Tx> {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn make_input(&mut self) -> Result<(), Rx, Tx> {
        self.client.make_input(self.index)
    }

    pub fn make_output(&mut self) -> Result<(), Rx, Tx> {
        self.client.make_output(self.index)
    }

    pub fn write(&mut self, high: bool) -> Result<(), Rx, Tx> {
        self.client.write(self.index, high)
    }

    pub fn read(&mut self) -> Result<bool, Rx, Tx> {
        self.client.read(self.index)
    }
}
