//! Chunked command/data transport to the display controller.
//!
//! The SSD1306 I2C protocol prefixes every write with a control byte that
//! tells the controller whether the following bytes are commands or GDDRAM
//! data. Payloads are split into writes of at most [`CHUNK_SIZE`] bytes and
//! the control byte is repeated at the head of every one of them, so each
//! chunk is a complete addressed write on its own.

use embedded_hal::i2c::I2c;

/// Control byte announcing command bytes.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing display RAM data.
pub const CONTROL_DATA: u8 = 0x40;

/// Maximum payload bytes carried by a single bus transaction.
pub const CHUNK_SIZE: usize = 32;

const FRAME_LEN: usize = CHUNK_SIZE + 1;

/// Blocking addressed-write capability consumed by the driver.
///
/// Implemented for every blocking [`embedded_hal::i2c::I2c`] bus, so any HAL
/// I2C peripheral can be handed to [`OledDriver`](crate::OledDriver)
/// directly.
pub trait Bus {
    /// Transport error surfaced through [`OledError::Bus`](crate::OledError::Bus).
    type Error;

    /// Write `bytes` to the 7-bit `address` as one transaction, blocking
    /// until it completes or fails.
    fn send(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<I2C> Bus for I2C
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn send(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.write(address, bytes)
    }
}

/// Send `control` followed by `data`, chunked into bounded transactions.
///
/// Stops at the first failing chunk and returns its error; later chunks are
/// not sent. An empty `data` slice produces no bus traffic.
pub fn send_chunked<B>(bus: &mut B, address: u8, control: u8, data: &[u8]) -> Result<(), B::Error>
where
    B: Bus,
{
    let mut frame = [0u8; FRAME_LEN];
    frame[0] = control;

    for chunk in data.chunks(CHUNK_SIZE) {
        frame[1..=chunk.len()].copy_from_slice(chunk);
        bus.send(address, &frame[..=chunk.len()])?;
    }

    Ok(())
}

/// Send a command payload (control byte [`CONTROL_COMMAND`]).
pub fn send_commands<B: Bus>(bus: &mut B, address: u8, commands: &[u8]) -> Result<(), B::Error> {
    send_chunked(bus, address, CONTROL_COMMAND, commands)
}

/// Send a display RAM payload (control byte [`CONTROL_DATA`]).
pub fn send_data<B: Bus>(bus: &mut B, address: u8, data: &[u8]) -> Result<(), B::Error> {
    send_chunked(bus, address, CONTROL_DATA, data)
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeI2c;
    use embedded_hal::i2c::ErrorKind;

    #[test]
    fn short_payload_is_one_transaction() {
        let mut bus = FakeI2c::new();
        send_commands(&mut bus, 0x3C, &[0xAE, 0xAF]).unwrap();

        assert_eq!(bus.writes.len(), 1);
        assert_eq!(bus.writes[0].address, 0x3C);
        assert_eq!(bus.writes[0].bytes, [0x00, 0xAE, 0xAF]);
    }

    #[test]
    fn long_payload_repeats_control_byte_per_chunk() {
        let mut bus = FakeI2c::new();
        let data: [u8; 70] = core::array::from_fn(|i| i as u8);
        send_data(&mut bus, 0x3D, &data).unwrap();

        let lens: std::vec::Vec<usize> = bus.writes.iter().map(|w| w.bytes.len()).collect();
        assert_eq!(lens, [33, 33, 7]);
        for write in &bus.writes {
            assert_eq!(write.address, 0x3D);
            assert_eq!(write.bytes[0], CONTROL_DATA);
        }
        assert_eq!(bus.writes[1].bytes[1], 32);
        assert_eq!(bus.writes[2].bytes[6], 69);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_chunk() {
        let mut bus = FakeI2c::new();
        send_data(&mut bus, 0x3C, &[0xFF; 64]).unwrap();
        assert_eq!(bus.writes.len(), 2);
    }

    #[test]
    fn empty_payload_sends_nothing() {
        let mut bus = FakeI2c::new();
        send_data(&mut bus, 0x3C, &[]).unwrap();
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn failure_stops_remaining_chunks() {
        let mut bus = FakeI2c::failing_at(1);
        let result = send_data(&mut bus, 0x3C, &[0u8; 100]);

        assert_eq!(result, Err(ErrorKind::Bus));
        // Chunk 0 went out, chunk 1 failed, chunks 2 and 3 never attempted.
        assert_eq!(bus.writes.len(), 1);
        assert_eq!(bus.attempts, 2);
    }
}
