//! Names of the CPU registers as they appear in instruction operands. These are identities only, the decoder never
//! holds register contents.

use serde::{Deserialize, Serialize};

/// The 7 addressable 8-bit CPU registers. F is not included here because no instruction names it as an operand, it's
/// only modified through flag deltas (or wholesale as the low half of AF).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[rustfmt::skip]
pub enum Register { A, B, C, D, E, H, L }

/// The 16-bit registers. AF, BC, DE and HL are pairs of the 8-bit registers viewed as 16 bits, SP and PC stand alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[rustfmt::skip]
pub enum Register16 { AF, BC, DE, HL, SP, PC }

/// Memory access through the address held in a register pair. HLI/HLD bump HL after the access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Indirect {
    HL,
    HLI,
    HLD,
    BC,
    DE,
}

/// The 4 conditions available to branching instructions (CALL/JP/JR/RET).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Condition {
    NZ, // CPU flag Z is clear
    Z,  // CPU flag Z is set
    NC, // CPU flag C is clear
    C,  // CPU flag C is set
}

impl Indirect {
    /// The register pair holding the address.
    pub fn base(self) -> Register16 {
        match self {
            Indirect::HL | Indirect::HLI | Indirect::HLD => Register16::HL,
            Indirect::BC => Register16::BC,
            Indirect::DE => Register16::DE,
        }
    }
}
