//! UART line settings
//!
//! Translates the board's serial configuration into embassy's UART config.

use embassy_rp::uart::{Config, DataBits as RpDataBits, Parity as RpParity, StopBits as RpStopBits};
use pinwire_hal::uart::{DataBits, Parity, SerialConfig, StopBits};

/// Build the embassy UART config for the host link
pub fn uart_config(serial: &SerialConfig) -> Config {
    let mut config = Config::default();
    config.baudrate = serial.baudrate;
    config.data_bits = match serial.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    config.parity = match serial.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    config.stop_bits = match serial.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    config
}
