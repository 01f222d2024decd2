//! Command serve task
//!
//! Waits for one command byte on the host UART, runs it to completion
//! against the pin table, then waits for the next. Awaiting the byte is
//! the only point where this task yields.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::Read;

use pinwire_core::Server;
use pinwire_hal::{IoTx, UartTx};
use pinwire_hal_rp2040::RpPin;

/// Serve task - owns the pin table for the lifetime of the firmware
#[embassy_executor::task]
pub async fn serve_task(
    mut server: Server<'static, RpPin<'static>>,
    mut rx: BufferedUartRx,
    tx: BufferedUartTx,
) {
    info!("Serve task started, {} pins", server.table().len());

    let mut tx = IoTx::new(tx);
    let mut byte = [0u8; 1];

    loop {
        match rx.read(&mut byte).await {
            Ok(1) => {}
            Ok(_) => continue,
            Err(e) => {
                warn!(
                    "UART read error after {} commands: {:?}",
                    server.commands_handled(),
                    e
                );
                continue;
            }
        }

        let Some(reply) = server.handle_byte(byte[0]) else {
            continue;
        };

        // Blocking write: the reply is out before the next byte is read
        if let Err(e) = tx.write_byte(reply.to_byte()).and_then(|()| tx.flush()) {
            warn!("UART write error: {:?}", e);
        }
    }
}
