use crate::flags::Flag;
use thiserror::Error;

/// Errors surfaced while pulling instructions out of a [`ByteStream`](crate::ByteStream).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// More bytes were requested than the stream holds. Either the input was truncated mid-instruction, or the caller
    /// asked for more instructions than it fed in.
    #[error("attempted read of {requested} bytes when only {available} bytes are available")]
    StreamUnderflow { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Two flag deltas both tried to say something about the same flag. This is always a bug in whoever built the events,
/// never a problem with the input bytes.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("conflicting states for flag {flag:?}")]
pub struct FlagConflict {
    pub flag: Flag,
}
