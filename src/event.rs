//! An Event is what a single decoded instruction does, described as data. Many instructions do the same thing but just
//! on different operands, i.e LD A,B and LD A,C both copy a register into A. We don't specialize those, there's a
//! single Load variant that carries the appropriate operands. Events never refer back to the bytes or the stream they
//! were decoded from.

use crate::flags::{self, FlagDelta};
use crate::operand::{Operand, Operand16};
use crate::registers::{Condition, Register16};
use serde::{Deserialize, Serialize};

/// The rotates and shifts. All 8 of these exist in the CB-prefixed table, the first 4 also have one byte
/// accumulator-only forms (RLCA, RRCA, RLA, RRA).
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ShiftOp {
    RLC,  // Rotate left, bit 7 into carry and bit 0.
    RRC,  // Rotate right, bit 0 into carry and bit 7.
    RL,   // Rotate left through carry.
    RR,   // Rotate right through carry.
    SLA,  // Shift left, bit 0 cleared.
    SRA,  // Shift right, bit 7 preserved.
    SWAP, // Exchange high and low nibbles.
    SRL,  // Shift right, bit 7 cleared.
}

/// Single bit operations from the CB-prefixed table.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BitOp {
    BIT, // Test the bit, result goes to Z.
    RES, // Clear the bit.
    SET, // Set the bit.
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Event {
    Nop,
    Load { dest: Operand, src: Operand },
    Load16 { dest: Operand16, src: Operand16 },
    Push(Register16),
    Pop(Register16),
    /// A += operand. ADC is an Add of a `WithCarry` operand.
    Add(Operand),
    AddHl(Register16),
    AddSp(i8),
    /// A -= operand. SBC is a Sub of a `WithCarry` operand.
    Sub(Operand),
    And(Operand),
    Or(Operand),
    Xor(Operand),
    Compare(Operand),
    Increment(Operand),
    Decrement(Operand),
    Increment16(Register16),
    Decrement16(Register16),
    RotateA(ShiftOp),
    Shift { op: ShiftOp, operand: Operand },
    Bit { op: BitOp, bit: u8, operand: Operand },
    FlagSet(FlagDelta),
    Complement,
    DecimalAdjust,
    /// Two events that happen as part of the same instruction, i.e LD HL,SP+e8 is a 16-bit load plus a flag update.
    Compound(Box<Event>, Box<Event>),
    Jump(Option<Condition>, Operand16),
    JumpRelative(Option<Condition>, i8),
    Call(Option<Condition>, u16),
    Return(Option<Condition>),
    ReturnInterrupt,
    Restart(u8),
    Halt,
    Stop,
    DisableInterrupts,
    EnableInterrupts,
    /// An opcode the decoder has no mapping for. Executes as a no-op, but stays distinguishable from a real NOP.
    Unimplemented { prefix: Option<u8>, opcode: u8 },
}

impl Event {
    /// Builds a compound event. Panics if both halves claim the same flag, since the merged delta would be ambiguous.
    pub fn compound(first: Event, second: Event) -> Event {
        let _ = first.flags().merge(second.flags());
        Event::Compound(Box::new(first), Box::new(second))
    }

    /// What this event does to the flags. Every addressing mode of an operation shares the same delta, so these come
    /// straight out of the constant tables in `flags`.
    pub fn flags(&self) -> FlagDelta {
        match self {
            Event::Add(_) => flags::ADD,
            Event::AddHl(_) => flags::ADD_HL,
            Event::AddSp(_) => flags::ADD_SP,
            Event::Sub(_) | Event::Compare(_) => flags::SUB,
            Event::And(_) => flags::AND,
            Event::Or(_) => flags::OR,
            Event::Xor(_) => flags::XOR,
            Event::Increment(_) => flags::INC,
            Event::Decrement(_) => flags::DEC,
            Event::RotateA(_) => flags::ROTATE_A,
            Event::Shift { op: ShiftOp::SWAP, .. } => flags::SWAP,
            Event::Shift { .. } => flags::SHIFT,
            Event::Bit { op: BitOp::BIT, .. } => flags::BIT,
            Event::Pop(Register16::AF) => flags::POP_AF,
            Event::FlagSet(delta) => *delta,
            Event::Complement => flags::CPL,
            Event::DecimalAdjust => flags::DAA,
            Event::Compound(first, second) => first.flags().merge(second.flags()),
            _ => FlagDelta::UNCHANGED,
        }
    }

    /// True for events that don't change any state. Unimplemented opcodes count, they execute as a NOP.
    pub fn is_no_op(&self) -> bool {
        match self {
            Event::Nop | Event::Unimplemented { .. } => true,
            _ => false,
        }
    }
}
