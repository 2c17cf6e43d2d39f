//! A FIFO queue of opcode bytes sitting between whatever fetches instructions (normally the CPU walking memory with
//! its PC register) and the decoder. Keeping the decoder on the far side of this queue means it never needs to know
//! about the memory bus, so the same decode logic serves the execution engine, a disassembler and the tests.

use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::collections::VecDeque;
use std::iter::FromIterator;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteStream {
    queue: VecDeque<u8>,
}

impl ByteStream {
    pub fn new() -> ByteStream {
        Default::default()
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Result<u8> {
        self.peek_at(0)
    }

    /// Returns the byte `offset` places from the front of the queue without consuming anything.
    pub fn peek_at(&self, offset: usize) -> Result<u8> {
        self.queue.get(offset).copied().ok_or(Error::StreamUnderflow {
            requested: offset + 1,
            available: self.queue.len(),
        })
    }

    /// Consumes and returns the next byte.
    pub fn get(&mut self) -> Result<u8> {
        self.queue.pop_front().ok_or(Error::StreamUnderflow {
            requested: 1,
            available: 0,
        })
    }

    /// Consumes exactly N bytes in order. If fewer than N are queued, nothing is consumed.
    pub fn get_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        if self.queue.len() < N {
            return Err(Error::StreamUnderflow {
                requested: N,
                available: self.queue.len(),
            });
        }

        let mut buf = [0; N];
        for (slot, b) in buf.iter_mut().zip(self.queue.drain(..N)) {
            *slot = b;
        }
        Ok(buf)
    }

    /// Consumes two bytes and assembles them LSB first, which is how the CPU encodes all of its 16-bit immediates.
    pub fn get_u16(&mut self) -> Result<u16> {
        let bytes = self.get_bytes::<2>()?;
        Ok(LittleEndian::read_u16(&bytes))
    }

    pub fn add(&mut self, byte: u8) {
        self.queue.push_back(byte);
    }

    pub fn add_bytes(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes.iter().copied());
    }

    /// How many unconsumed bytes are queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(bytes: Vec<u8>) -> ByteStream {
        ByteStream { queue: bytes.into() }
    }
}

impl From<&[u8]> for ByteStream {
    fn from(bytes: &[u8]) -> ByteStream {
        bytes.iter().copied().collect()
    }
}

impl FromIterator<u8> for ByteStream {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> ByteStream {
        ByteStream {
            queue: iter.into_iter().collect(),
        }
    }
}

impl Extend<u8> for ByteStream {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_at_reports_how_far_short_the_stream_is() {
        let stream = ByteStream::from(vec![1, 2]);
        assert_eq!(stream.peek_at(1), Ok(2));
        assert_eq!(
            stream.peek_at(4),
            Err(Error::StreamUnderflow {
                requested: 5,
                available: 2
            })
        );
    }

    #[test]
    fn failed_bulk_get_leaves_queue_untouched() {
        let mut stream = ByteStream::from(vec![1, 2, 3]);
        assert!(stream.get_bytes::<4>().is_err());
        assert_eq!(stream.len(), 3);
        assert_eq!(stream.get_bytes::<3>(), Ok([1, 2, 3]));
    }
}
