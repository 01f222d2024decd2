//! Adapters from `embedded-io` byte streams to the UART traits
//!
//! Any blocking [`embedded_io::Read`] / [`embedded_io::Write`] (an RP2040
//! UART half, a USB-serial port on the host, an in-memory buffer in tests)
//! can drive the server loop through these wrappers.

use embedded_io::{Read, ReadExactError, Write};

use crate::uart::{UartRx, UartTx};

/// Error from an adapted byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError<E> {
    /// The underlying stream failed
    Io(E),
    /// The stream ended before a byte arrived
    Eof,
}

impl<E> From<ReadExactError<E>> for IoError<E> {
    fn from(e: ReadExactError<E>) -> Self {
        match e {
            ReadExactError::UnexpectedEof => IoError::Eof,
            ReadExactError::Other(e) => IoError::Io(e),
        }
    }
}

/// [`UartRx`] over an `embedded-io` reader
pub struct IoRx<T> {
    inner: T,
}

impl<T: Read> IoRx<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> UartRx for IoRx<T> {
    type Error = IoError<T::Error>;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.inner.read(buf).map_err(IoError::Io)? {
            0 => Err(IoError::Eof),
            n => Ok(n),
        }
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}

/// [`UartTx`] over an `embedded-io` writer
pub struct IoTx<T> {
    inner: T,
}

impl<T: Write> IoTx<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Write> UartTx for IoTx<T> {
    type Error = IoError<T::Error>;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data).map_err(IoError::Io)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush().map_err(IoError::Io)
    }
}
