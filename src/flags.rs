//! Flag deltas describe what an instruction does to the F register, one slot per flag. The layout follows the Z80's
//! F register (S Z F5 H F3 PV N C, MSB to LSB). The LR35902 only has Z, N, H and C, so the other four slots are always
//! left unchanged by the tables here, but keeping all eight means an executor for a Z80-family core can share the
//! same type.
//!
//! Many flag results depend on register contents that aren't known at decode time (did that ADD overflow the low
//! nibble?). Those slots are marked Deferred and it's up to the execution stage to compute them.

use crate::error::FlagConflict;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Flag {
    S = 0,
    Z = 1,
    F5 = 2,
    H = 3,
    F3 = 4,
    PV = 5,
    N = 6,
    C = 7,
}

impl Flag {
    /// All flags, in slot order.
    pub const ALL: [Flag; 8] = [Flag::S, Flag::Z, Flag::F5, Flag::H, Flag::F3, Flag::PV, Flag::N, Flag::C];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum FlagState {
    Unchanged,
    Set,
    Reset,
    /// Depends on operand values, resolved when the instruction is executed.
    Deferred,
}

impl Default for FlagState {
    fn default() -> FlagState {
        FlagState::Unchanged
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FlagDelta([FlagState; 8]);

impl FlagDelta {
    pub const UNCHANGED: FlagDelta = FlagDelta([FlagState::Unchanged; 8]);

    pub fn new() -> FlagDelta {
        FlagDelta::UNCHANGED
    }

    pub const fn from_states(states: [FlagState; 8]) -> FlagDelta {
        FlagDelta(states)
    }

    /// Returns a copy of this delta with one slot replaced.
    pub const fn with(mut self, flag: Flag, state: FlagState) -> FlagDelta {
        self.0[flag as usize] = state;
        self
    }

    /// Builds a delta out of (flag, state) pairs. Pairs that leave their flag Unchanged don't contribute anything.
    /// Panics if two pairs both specify the same flag.
    pub fn from_pairs(pairs: &[(Flag, FlagState)]) -> FlagDelta {
        pairs
            .iter()
            .fold(FlagDelta::UNCHANGED, |acc, &(flag, state)| {
                acc.merge(FlagDelta::UNCHANGED.with(flag, state))
            })
    }

    pub fn get(&self, flag: Flag) -> FlagState {
        self.0[flag as usize]
    }

    pub fn states(&self) -> [FlagState; 8] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Flag, FlagState)> + '_ {
        Flag::ALL.iter().copied().zip(self.0.iter().copied())
    }

    pub fn is_unchanged(&self) -> bool {
        *self == FlagDelta::UNCHANGED
    }

    /// Combines two deltas that touch disjoint sets of flags. Fails if any flag is specified (not Unchanged) on both
    /// sides, even when both sides agree.
    pub fn try_merge(self, other: FlagDelta) -> Result<FlagDelta, FlagConflict> {
        let mut merged = self;
        for (flag, state) in other.iter() {
            if state == FlagState::Unchanged {
                continue;
            }
            if self.get(flag) != FlagState::Unchanged {
                return Err(FlagConflict { flag });
            }
            merged = merged.with(flag, state);
        }
        Ok(merged)
    }

    /// Same as `try_merge`, but a conflict panics. Events are built from the constant tables below, so a conflict
    /// here means those tables (or the code combining them) are wrong.
    pub fn merge(self, other: FlagDelta) -> FlagDelta {
        match self.try_merge(other) {
            Ok(merged) => merged,
            Err(e) => panic!("invalid flag merge: {}", e),
        }
    }
}

use FlagState::{Deferred as D, Reset as R, Set as S, Unchanged as U};

/// The LR35902 flags are the Z80's Z, H, N and C, so every table entry is built from just those four.
const fn gb(z: FlagState, n: FlagState, h: FlagState, c: FlagState) -> FlagDelta {
    FlagDelta::UNCHANGED
        .with(Flag::Z, z)
        .with(Flag::N, n)
        .with(Flag::H, h)
        .with(Flag::C, c)
}

// Every addressing mode of an operation affects the flags the same way, so each operation gets a single constant.

/// ADD A,x and ADC A,x.
pub const ADD: FlagDelta = gb(D, R, D, D);
/// SUB x, SBC A,x and CP x.
pub const SUB: FlagDelta = gb(D, S, D, D);
pub const AND: FlagDelta = gb(D, R, S, R);
/// OR x and XOR x.
pub const OR: FlagDelta = gb(D, R, R, R);
pub const XOR: FlagDelta = OR;
pub const INC: FlagDelta = gb(D, R, D, U);
pub const DEC: FlagDelta = gb(D, S, D, U);
pub const ADD_HL: FlagDelta = gb(U, R, D, D);
/// ADD SP,e8 and LD HL,SP+e8.
pub const ADD_SP: FlagDelta = gb(R, R, D, D);
/// RLCA, RRCA, RLA and RRA always clear Z, unlike their CB-prefixed cousins.
pub const ROTATE_A: FlagDelta = gb(R, R, R, D);
pub const SHIFT: FlagDelta = gb(D, R, R, D);
pub const SWAP: FlagDelta = gb(D, R, R, R);
pub const BIT: FlagDelta = gb(D, R, S, U);
pub const SCF: FlagDelta = gb(U, R, R, S);
pub const CCF: FlagDelta = gb(U, R, R, D);
pub const CPL: FlagDelta = gb(U, S, S, U);
pub const DAA: FlagDelta = gb(D, U, R, D);
/// POP AF loads the whole F register from the stack.
pub const POP_AF: FlagDelta = gb(D, D, D, D);
