//! Host-side fake I2C bus for unit tests.

use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// One recorded write transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub address: u8,
    pub bytes: Vec<u8>,
}

/// Records every successful write; optionally fails the Nth attempt
/// (zero-based) with [`ErrorKind::Bus`].
#[derive(Debug, Default)]
pub struct FakeI2c {
    pub writes: Vec<Write>,
    pub attempts: usize,
    pub fail_at: Option<usize>,
}

impl FakeI2c {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    /// Concatenated payloads (control bytes stripped) of all writes whose
    /// first byte equals `control`.
    pub fn payload(&self, control: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|w| w.bytes.first() == Some(&control))
            .flat_map(|w| w.bytes[1..].iter().copied())
            .collect()
    }
}

impl ErrorType for FakeI2c {
    type Error = ErrorKind;
}

impl I2c for FakeI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(ErrorKind::Bus);
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => self.writes.push(Write {
                    address,
                    bytes: bytes.to_vec(),
                }),
                Operation::Read(buf) => buf.fill(0),
            }
        }
        Ok(())
    }
}
