pub mod delay;
pub mod lcd;
pub mod raw;
pub mod soft;

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum PortError {
    #[error("invalid argument")]
    InvalidArgument,
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for PortError {
    fn from(err: std::io::Error) -> Self {
        PortError::Io(err.kind())
    }
}

pub type PortResult<T> = Result<T, PortError>;

/// A handle to the single 8-bit output port all display lines are wired to.
///
/// Bit assignments within the register are up to the consumer; the LCD driver
/// keeps its control lines in the low nibble and the data bus in bits 4–7.
/// Implementations only have to expose the raw register value, read-modify-write
/// helpers are provided on the trait object.
pub trait PortRegister: Debug {
    /// Configures all 8 lines of the port as outputs.
    ///
    /// Intended to run once, before the first write. There is no input mode,
    /// the port is write-only for its whole lifetime.
    fn set_output(&self) -> PortResult<()>;

    /// Reads the current register value.
    fn read(&self) -> PortResult<u8>;

    /// Writes the register value, replacing all 8 lines at once.
    fn write(&self, value: u8) -> PortResult<()>;
}

impl dyn PortRegister + '_ {
    /// Sets a single line of the port, leaving the other lines untouched.
    ///
    /// # Errors
    /// - `PortError::InvalidArgument` if `bit` is not in `0..8`.
    pub fn set_bit(&self, bit: u8, value: bool) -> PortResult<()> {
        if bit >= 8 {
            return Err(PortError::InvalidArgument);
        }

        let current = self.read()?;
        let mask = 1 << bit;
        let next = if value { current | mask } else { current & !mask };
        self.write(next)
    }

    /// Merges `bits & 0xF0` into the high nibble of the register.
    ///
    /// The low nibble is carried over from the current register value, so
    /// control lines living there survive every data-bus update.
    pub fn merge_high_nibble(&self, bits: u8) -> PortResult<()> {
        let current = self.read()?;
        self.write((current & 0x0F) | (bits & 0xF0))
    }
}

/// A busy-wait delay capability.
///
/// The display protocol is timing-driven, with no busy-flag read-back, so every
/// transition is followed by a fixed pause. Injecting the pause keeps the
/// drivers testable without real elapsed time.
pub trait Delay: Debug {
    /// Blocks for at least `ms` milliseconds.
    fn delay_ms(&self, ms: u64);
}
