//! In-memory stand-in for a target process.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// Sparse fake address space.
///
/// A read succeeds only if every requested byte was written, which models
/// unmapped or partially mapped ranges. All reads are logged.
pub struct MockMemoryReader {
    memory: HashMap<u64, u8>,
    base_address: u64,
    reads: RefCell<Vec<(u64, usize)>>,
}

impl MockMemoryReader {
    /// Number of `read_bytes` calls so far
    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    /// Sizes of all reads, in order
    pub fn read_sizes(&self) -> Vec<usize> {
        self.reads.borrow().iter().map(|&(_, size)| size).collect()
    }

    /// Every `(address, size)` read so far
    pub fn read_log(&self) -> Vec<(u64, usize)> {
        self.reads.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.reads.borrow_mut().clear();
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.reads.borrow_mut().push((address, size));

        if address == 0 {
            return Err(Error::NullAddress);
        }

        (0..size as u64)
            .map(|i| {
                address
                    .checked_add(i)
                    .and_then(|a| self.memory.get(&a).copied())
                    .ok_or_else(|| Error::MemoryReadFailed {
                        address,
                        message: format!("unmapped byte at +0x{:X}", i),
                    })
            })
            .collect()
    }

    fn base_address(&self) -> u64 {
        self.base_address
    }
}

/// Builder for [`MockMemoryReader`]
#[derive(Default)]
pub struct MockMemoryBuilder {
    memory: HashMap<u64, u8>,
    base_address: u64,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_address(mut self, base: u64) -> Self {
        self.base_address = base;
        self
    }

    pub fn write_bytes(mut self, address: u64, bytes: &[u8]) -> Self {
        for (i, &b) in bytes.iter().enumerate() {
            self.memory.insert(address + i as u64, b);
        }
        self
    }

    pub fn write_u8(self, address: u64, value: u8) -> Self {
        self.write_bytes(address, &[value])
    }

    pub fn write_u16(self, address: u64, value: u16) -> Self {
        self.write_bytes(address, &value.to_ne_bytes())
    }

    pub fn write_u32(self, address: u64, value: u32) -> Self {
        self.write_bytes(address, &value.to_ne_bytes())
    }

    pub fn write_u64(self, address: u64, value: u64) -> Self {
        self.write_bytes(address, &value.to_ne_bytes())
    }

    /// Map `size` zero bytes
    pub fn zeroed(self, address: u64, size: usize) -> Self {
        self.write_bytes(address, &vec![0; size])
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            memory: self.memory,
            base_address: self.base_address,
            reads: RefCell::new(Vec::new()),
        }
    }
}
