use crate::{PortError, PortRegister, PortResult};
use memmap2::{MmapOptions, MmapRaw};
use std::fmt::{Debug, Formatter};
use std::fs::OpenOptions;

const MAP_LEN: usize = 4096;

/// A memory-mapped port register pair, AVR style: one data register driving the
/// output lines and one direction register selecting output mode per line.
pub struct RawPortRegister {
    mmap: MmapRaw,
    data_offset: usize,
    dir_offset: usize,
}

impl RawPortRegister {
    fn create(path: &str, base: u64, data_offset: usize, dir_offset: usize) -> PortResult<Self> {
        if data_offset >= MAP_LEN || dir_offset >= MAP_LEN {
            return Err(PortError::InvalidArgument);
        }

        let file = OpenOptions::new().read(true).write(true).open(path)?;

        let mmap = MmapOptions::new()
            .offset(base)
            .len(MAP_LEN)
            .map_raw(&file)?;

        Ok(RawPortRegister {
            mmap,
            data_offset,
            dir_offset,
        })
    }

    /// Maps the register page from `/dev/mem` at the given physical base.
    pub fn new_mem(base: u64, data_offset: usize, dir_offset: usize) -> PortResult<Self> {
        Self::create("/dev/mem", base, data_offset, dir_offset)
    }

    /// Maps the register page from an arbitrary device path.
    pub fn new_at(path: &str, base: u64, data_offset: usize, dir_offset: usize) -> PortResult<Self> {
        Self::create(path, base, data_offset, dir_offset)
    }
}

impl Debug for RawPortRegister {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawPortRegister({:?})", self.mmap.as_ptr().addr())
    }
}

impl PortRegister for RawPortRegister {
    fn set_output(&self) -> PortResult<()> {
        let register_ptr = unsafe { self.mmap.as_mut_ptr().add(self.dir_offset) };
        unsafe { register_ptr.write_volatile(0xFF) };
        Ok(())
    }

    fn read(&self) -> PortResult<u8> {
        let register_ptr = unsafe { self.mmap.as_ptr().add(self.data_offset) };
        Ok(unsafe { register_ptr.read_volatile() })
    }

    fn write(&self, value: u8) -> PortResult<()> {
        let register_ptr = unsafe { self.mmap.as_mut_ptr().add(self.data_offset) };
        unsafe { register_ptr.write_volatile(value) };
        Ok(())
    }
}
