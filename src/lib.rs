//! The Gameboy CPU (a Sharp LR35902, an 8080/Z80 hybrid) is fed a stream of opcode bytes that it fetches from the
//! memory bus one at a time. This crate takes that byte stream and turns it into a sequence of [`Event`]s: plain values
//! describing what executing each instruction would do to the registers, memory and flags. Nothing here executes
//! anything. The events are handed off to whatever executes them (an interpreter, a debugger, a test harness).
//!
//! ```
//! use gbdecode::{decode_event, ByteStream, Event, Operand, Register};
//!
//! let mut stream = ByteStream::from(vec![0x06, 0x42]);
//! let event = decode_event(&mut stream).unwrap();
//! assert_eq!(event, Event::Load { dest: Operand::Register(Register::B), src: Operand::Immediate(0x42) });
//! assert!(stream.is_empty());
//! ```

pub mod decoder;
pub mod error;
pub mod event;
pub mod flags;
pub mod memory;
pub mod operand;
pub mod registers;
pub mod stream;

pub use decoder::{decode_event, decode_events, decode_until_empty, instruction_len};
pub use error::{Error, FlagConflict, Result};
pub use event::{BitOp, Event, ShiftOp};
pub use flags::{Flag, FlagDelta, FlagState};
pub use memory::{Memory, StaticRam};
pub use operand::{Carried, Operand, Operand16};
pub use registers::{Condition, Indirect, Register, Register16};
pub use stream::ByteStream;
