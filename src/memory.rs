//! Byte addressable memory. The decoder never touches this, it only ever sees a [`ByteStream`]; memory is what the
//! execution side reads instruction bytes out of (via `fetch_into`) and applies load/store events to.
//!
//! Indexing out of bounds is a bug in the caller, not a runtime condition, so accesses are checked with debug
//! assertions (the slice indexing underneath still panics in release builds) rather than returning errors.

use crate::stream::ByteStream;
use byteorder::{ByteOrder, LittleEndian};

pub trait Memory {
    fn size(&self) -> usize;
    fn read_byte(&self, addr: usize) -> u8;
    fn write_byte(&mut self, addr: usize, v: u8);
    fn read_bytes(&self, addr: usize, len: usize) -> &[u8];
    fn write_bytes(&mut self, addr: usize, bytes: &[u8]);

    fn read_u16(&self, addr: usize) -> u16 {
        LittleEndian::read_u16(self.read_bytes(addr, 2))
    }

    fn write_u16(&mut self, addr: usize, v: u16) {
        let mut buf = [0; 2];
        LittleEndian::write_u16(&mut buf, v);
        self.write_bytes(addr, &buf);
    }

    /// Appends `count` bytes starting at `addr` to the stream, the same way the CPU would fetch them by walking PC
    /// forward.
    fn fetch_into(&self, stream: &mut ByteStream, addr: usize, count: usize) {
        stream.add_bytes(self.read_bytes(addr, count));
    }
}

/// A fixed size block of zero-initialised RAM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticRam<const N: usize> {
    bytes: Box<[u8]>,
}

impl<const N: usize> StaticRam<N> {
    pub fn new() -> StaticRam<N> {
        StaticRam {
            bytes: vec![0; N].into_boxed_slice(),
        }
    }
}

impl<const N: usize> Default for StaticRam<N> {
    fn default() -> StaticRam<N> {
        StaticRam::new()
    }
}

impl<const N: usize> Memory for StaticRam<N> {
    fn size(&self) -> usize {
        N
    }

    fn read_byte(&self, addr: usize) -> u8 {
        debug_assert!(addr < N, "read of ${:04X} outside {} bytes of RAM", addr, N);
        self.bytes[addr]
    }

    fn write_byte(&mut self, addr: usize, v: u8) {
        debug_assert!(addr < N, "write of ${:04X} outside {} bytes of RAM", addr, N);
        self.bytes[addr] = v;
    }

    fn read_bytes(&self, addr: usize, len: usize) -> &[u8] {
        debug_assert!(addr + len <= N, "read of {} bytes at ${:04X} outside {} bytes of RAM", len, addr, N);
        &self.bytes[addr..addr + len]
    }

    fn write_bytes(&mut self, addr: usize, bytes: &[u8]) {
        debug_assert!(
            addr + bytes.len() <= N,
            "write of {} bytes at ${:04X} outside {} bytes of RAM",
            bytes.len(),
            addr,
            N
        );
        self.bytes[addr..addr + bytes.len()].copy_from_slice(bytes);
    }
}
