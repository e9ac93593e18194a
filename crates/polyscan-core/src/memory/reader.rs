//! Remote memory reading.
//!
//! [`ReadMemory`] is the single primitive every decoder is built on. The live
//! implementation, [`MemoryReader`], copies byte ranges out of another process
//! with `process_vm_readv`; tests use the in-memory mock instead.

use tracing::trace;

use crate::error::{Error, Result};
use crate::memory::chain::resolve_chain;
use crate::memory::pacing::{NoPacing, ReadPacing};
use crate::memory::process::ProcessHandle;

/// Fixed-width value that can be decoded from native-order bytes
pub trait Primitive: Sized + Copy {
    const SIZE: usize;

    /// Decode from the first `SIZE` bytes of `bytes`
    fn from_ne_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_primitive {
    ($($ty:ty),*) => {
        $(
            impl Primitive for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_ne_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_primitive!(u8, u16, u32, u64, i32);

impl Primitive for bool {
    const SIZE: usize = 1;

    fn from_ne_slice(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Read access to a foreign address space
pub trait ReadMemory {
    /// Read exactly `size` bytes at `address`.
    ///
    /// A short read is a failure, never partial data.
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Load address of the target module
    fn base_address(&self) -> u64;

    /// Read a `T` at `address` in native byte order
    fn read_value<T: Primitive>(&self, address: u64) -> Result<T> {
        let bytes = self.read_bytes(address, T::SIZE)?;
        Ok(T::from_ne_slice(&bytes))
    }

    fn read_u8(&self, address: u64) -> Result<u8> {
        self.read_value(address)
    }

    fn read_u16(&self, address: u64) -> Result<u16> {
        self.read_value(address)
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        self.read_value(address)
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        self.read_value(address)
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        self.read_value(address)
    }

    fn read_bool(&self, address: u64) -> Result<bool> {
        self.read_value(address)
    }

    /// Follow a pointer chain, returning 0 if any hop fails
    fn resolve(&self, base: u64, offsets: &[u64]) -> u64 {
        resolve_chain(self, base, offsets)
    }
}

/// Reads memory of a live process
pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
    pacing: Box<dyn ReadPacing>,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self::with_pacing(process, Box::new(NoPacing))
    }

    pub fn with_pacing(process: &'a ProcessHandle, pacing: Box<dyn ReadPacing>) -> Self {
        Self { process, pacing }
    }

    pub fn process(&self) -> &ProcessHandle {
        self.process
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        if address == 0 {
            return Err(Error::NullAddress);
        }
        if size == 0 {
            return Ok(Vec::new());
        }

        self.pacing.before_read();
        trace!("read {} bytes at 0x{:X}", size, address);
        read_remote(self.process.pid, address, size)
    }

    fn base_address(&self) -> u64 {
        self.process.base_address
    }
}

#[cfg(target_os = "linux")]
fn read_remote(pid: i32, address: u64, size: usize) -> Result<Vec<u8>> {
    use std::io::IoSliceMut;

    use nix::sys::uio::{RemoteIoVec, process_vm_readv};
    use nix::unistd::Pid;

    let mut buffer = vec![0u8; size];
    let remote = [RemoteIoVec {
        base: address as usize,
        len: size,
    }];

    let bytes_read = {
        let mut local = [IoSliceMut::new(&mut buffer)];
        process_vm_readv(Pid::from_raw(pid), &mut local, &remote).map_err(|e| {
            Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            }
        })?
    };

    if bytes_read != size {
        return Err(Error::MemoryReadFailed {
            address,
            message: format!("short read: {} of {} bytes", bytes_read, size),
        });
    }

    Ok(buffer)
}

#[cfg(not(target_os = "linux"))]
fn read_remote(_pid: i32, address: u64, _size: usize) -> Result<Vec<u8>> {
    Err(Error::MemoryReadFailed {
        address,
        message: "remote reads are only supported on Linux".to_string(),
    })
}
