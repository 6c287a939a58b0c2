use crate::{Delay, PortRegister, PortResult};
use std::cell::{Cell, RefCell};

/// An in-memory stand-in for the memory-mapped port register.
///
/// Every write is recorded in order, so the exact line transitions a driver
/// produces can be asserted on afterwards.
#[derive(Debug, Default)]
pub struct SoftPortRegister {
    value: Cell<u8>,
    output: Cell<bool>,
    writes: RefCell<Vec<u8>>,
}

impl SoftPortRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// All values written so far, oldest first.
    pub fn writes(&self) -> Vec<u8> {
        self.writes.borrow().clone()
    }

    /// Whether [PortRegister::set_output] has been called.
    pub fn is_output(&self) -> bool {
        self.output.get()
    }
}

impl PortRegister for SoftPortRegister {
    fn set_output(&self) -> PortResult<()> {
        self.output.set(true);
        Ok(())
    }

    fn read(&self) -> PortResult<u8> {
        Ok(self.value.get())
    }

    fn write(&self, value: u8) -> PortResult<()> {
        self.value.set(value);
        self.writes.borrow_mut().push(value);
        Ok(())
    }
}

/// A delay that elapses no real time, only recording what was requested.
#[derive(Debug, Default)]
pub struct SoftDelay {
    requests: RefCell<Vec<u64>>,
}

impl SoftDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requested delays so far, in milliseconds, oldest first.
    pub fn requests(&self) -> Vec<u64> {
        self.requests.borrow().clone()
    }
}

impl Delay for SoftDelay {
    fn delay_ms(&self, ms: u64) {
        self.requests.borrow_mut().push(ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PortError, PortRegister};

    #[test]
    fn records_writes_in_order() {
        let port = SoftPortRegister::new();

        port.write(0xA0).unwrap();
        port.write(0xA2).unwrap();
        port.write(0x00).unwrap();

        assert_eq!(port.writes(), vec![0xA0, 0xA2, 0x00]);
        assert_eq!(port.read().unwrap(), 0x00);
    }

    #[test]
    fn set_bit_touches_only_one_line() {
        let port = SoftPortRegister::new();
        let port: &dyn PortRegister = &port;

        port.write(0b1010_0000).unwrap();
        port.set_bit(1, true).unwrap();
        assert_eq!(port.read().unwrap(), 0b1010_0010);

        port.set_bit(1, false).unwrap();
        assert_eq!(port.read().unwrap(), 0b1010_0000);

        assert_eq!(port.set_bit(8, true), Err(PortError::InvalidArgument));
    }

    #[test]
    fn merge_high_nibble_preserves_control_lines() {
        let port = SoftPortRegister::new();
        let port: &dyn PortRegister = &port;

        port.write(0x0B).unwrap();
        port.merge_high_nibble(0xA5).unwrap();

        assert_eq!(port.read().unwrap(), 0xAB);
    }

    #[test]
    fn set_output_is_recorded() {
        let port = SoftPortRegister::new();
        assert!(!port.is_output());
        port.set_output().unwrap();
        assert!(port.is_output());
    }
}
