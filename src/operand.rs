use crate::registers::{Indirect, Register, Register16};
use serde::{Deserialize, Serialize};

/// Where an 8-bit value is read from or written to. Instructions name their operands through these; numeric
/// operands (immediates, addresses) have already been pulled out of the byte stream and assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Operand {
    Register(Register),   // Get/set an 8-bit register.
    Immediate(u8),        // An immediate 8-bit value embedded alongside the opcode.
    Address(u16),         // Absolute memory address, from a 16-bit immediate or an 8-bit offset from $FF00.
    Indirect(Indirect),   // Memory address held in a register pair.
    // Address with a high byte fixed by the opcode and the low byte taken from a register, i.e ($FF00+C).
    PartialAddress { msb: u8, lsb: Register },
    WithCarry(Carried),   // The operand plus the carry flag, for ADC/SBC.
}

/// The operands ADC and SBC can add/subtract alongside the carry flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Carried {
    Register(Register),
    Indirect(Indirect),
    Immediate(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Operand16 {
    Register(Register16),             // Get/set a 16-bit register.
    Immediate(u16),                   // An immediate 16-bit value embedded alongside the opcode.
    Address(u16),                     // Immediate 16-bit value interpreted as memory address.
    RegisterOffset(Register16, i8),   // Register value plus a signed displacement (SP+e8).
}

impl Operand {
    /// $FF00 page access. The LDH instructions address the IO registers and HRAM this way.
    pub fn high(lsb: u8) -> Operand {
        Operand::Address(0xFF00 | u16::from(lsb))
    }
}
