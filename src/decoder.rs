//! The instruction decoder. Pulls the next opcode off a [`ByteStream`], works out which instruction it is, pulls
//! however many operand bytes that instruction needs, and hands back the [`Event`] describing it.
//!
//! The decoder keeps no state between calls. Everything it knows about the current instruction lives on the stack of
//! a single `decode_event` call, so decoding can be resumed (or restarted on a fresh stream) at any instruction
//! boundary.

use crate::error::{Error, Result};
use crate::event::{BitOp, Event, ShiftOp};
use crate::flags;
use crate::operand::{Carried, Operand, Operand16};
use crate::registers::{Condition, Indirect};
use crate::registers::{Register::*, Register16::*};
use crate::stream::ByteStream;

/// Opcode that selects the extended (bit manipulation, shift and rotate) opcode table.
pub const PREFIX_CB: u8 = 0xCB;

/// Z80 prefixes for the IX/IY and extended tables. The LR35902 doesn't have these tables, but the bytes still mark a two
/// byte instruction as far as decoding is concerned.
pub const Z80_PREFIXES: [u8; 3] = [0xDD, 0xED, 0xFD];

/// Returns how many bytes (1 to 3) the instruction starting with this byte is encoded in. Prefixed instructions are
/// always 2 bytes: the prefix and the real opcode.
pub fn instruction_len(first_byte: u8) -> usize {
    match first_byte {
        // d16 / a16 operands.
        0x01 | 0x08 | 0x11 | 0x21 | 0x31 => 3,
        0xC2 | 0xC3 | 0xC4 | 0xCA | 0xCC | 0xCD => 3,
        0xD2 | 0xD4 | 0xDA | 0xDC => 3,
        0xEA | 0xFA => 3,

        // d8 / r8 / a8 operands.
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => 2,
        0x18 | 0x20 | 0x28 | 0x30 | 0x38 => 2,
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => 2,
        0xE0 | 0xE8 | 0xF0 | 0xF8 => 2,

        // STOP is followed by a padding byte.
        0x10 => 2,

        // Prefix + opcode.
        0xCB | 0xDD | 0xED | 0xFD => 2,

        _ => 1,
    }
}

/// Decodes exactly one instruction from the front of the stream.
///
/// If the stream holds fewer bytes than the instruction needs this fails with `StreamUnderflow` and the stream is left
/// as it was. An instruction is never partially decoded.
pub fn decode_event(stream: &mut ByteStream) -> Result<Event> {
    let len = instruction_len(stream.peek()?);
    if stream.len() < len {
        return Err(Error::StreamUnderflow {
            requested: len,
            available: stream.len(),
        });
    }

    let event = decode_instruction(|| stream.get())?;
    log::trace!("decoded {:?}", event);
    Ok(event)
}

/// Decodes `n` instructions in order. Fails on the first instruction that can't be fully read.
pub fn decode_events(stream: &mut ByteStream, n: usize) -> Result<Vec<Event>> {
    let mut events = Vec::with_capacity(n);
    for _ in 0..n {
        events.push(decode_event(stream)?);
    }
    Ok(events)
}

/// Decodes instructions until the stream runs dry. A stream that ends partway through an instruction is an error.
pub fn decode_until_empty(stream: &mut ByteStream) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    while !stream.is_empty() {
        events.push(decode_event(stream)?);
    }
    Ok(events)
}

/// Fetches the next opcode from an arbitrary byte source, decodes it, and then possibly fetches another 1-2 bytes used
/// by that instruction.
fn decode_instruction<F: FnMut() -> Result<u8>>(mut fetch: F) -> Result<Event> {
    macro_rules! fetch16 {
        () => {
            u16::from(fetch()?) | (u16::from(fetch()?) << 8)
        };
    }

    let opcode = fetch()?;
    Ok(match opcode {
        0x00 /* NOP         */ => Event::Nop,
        0x01 /* LD BC,d16   */ => Event::Load16 { dest: Operand16::Register(BC), src: Operand16::Immediate(fetch16!()) },
        0x02 /* LD (BC),A   */ => Event::Load { dest: Operand::Indirect(Indirect::BC), src: Operand::Register(A) },
        0x03 /* INC BC      */ => Event::Increment16(BC),
        0x04 /* INC B       */ => Event::Increment(Operand::Register(B)),
        0x05 /* DEC B       */ => Event::Decrement(Operand::Register(B)),
        0x06 /* LD B,d8     */ => Event::Load { dest: Operand::Register(B), src: Operand::Immediate(fetch()?) },
        0x07 /* RLCA        */ => Event::RotateA(ShiftOp::RLC),
        0x08 /* LD (a16),SP */ => Event::Load16 { dest: Operand16::Address(fetch16!()), src: Operand16::Register(SP) },
        0x09 /* ADD HL,BC   */ => Event::AddHl(BC),
        0x0A /* LD A,(BC)   */ => Event::Load { dest: Operand::Register(A), src: Operand::Indirect(Indirect::BC) },
        0x0B /* DEC BC      */ => Event::Decrement16(BC),
        0x0C /* INC C       */ => Event::Increment(Operand::Register(C)),
        0x0D /* DEC C       */ => Event::Decrement(Operand::Register(C)),
        0x0E /* LD C,d8     */ => Event::Load { dest: Operand::Register(C), src: Operand::Immediate(fetch()?) },
        0x0F /* RRCA        */ => Event::RotateA(ShiftOp::RRC),
        0x10 /* STOP        */ => {
            fetch()?;
            Event::Stop
        }
        0x11 /* LD DE,d16   */ => Event::Load16 { dest: Operand16::Register(DE), src: Operand16::Immediate(fetch16!()) },
        0x12 /* LD (DE),A   */ => Event::Load { dest: Operand::Indirect(Indirect::DE), src: Operand::Register(A) },
        0x13 /* INC DE      */ => Event::Increment16(DE),
        0x14 /* INC D       */ => Event::Increment(Operand::Register(D)),
        0x15 /* DEC D       */ => Event::Decrement(Operand::Register(D)),
        0x16 /* LD D,d8     */ => Event::Load { dest: Operand::Register(D), src: Operand::Immediate(fetch()?) },
        0x17 /* RLA         */ => Event::RotateA(ShiftOp::RL),
        0x18 /* JR r8       */ => Event::JumpRelative(None, fetch()? as i8),
        0x19 /* ADD HL,DE   */ => Event::AddHl(DE),
        0x1A /* LD A,(DE)   */ => Event::Load { dest: Operand::Register(A), src: Operand::Indirect(Indirect::DE) },
        0x1B /* DEC DE      */ => Event::Decrement16(DE),
        0x1C /* INC E       */ => Event::Increment(Operand::Register(E)),
        0x1D /* DEC E       */ => Event::Decrement(Operand::Register(E)),
        0x1E /* LD E,d8     */ => Event::Load { dest: Operand::Register(E), src: Operand::Immediate(fetch()?) },
        0x1F /* RRA         */ => Event::RotateA(ShiftOp::RR),
        0x20 /* JR NZ,r8    */ => Event::JumpRelative(Some(Condition::NZ), fetch()? as i8),
        0x21 /* LD HL,d16   */ => Event::Load16 { dest: Operand16::Register(HL), src: Operand16::Immediate(fetch16!()) },
        0x22 /* LD (HL+),A  */ => Event::Load { dest: Operand::Indirect(Indirect::HLI), src: Operand::Register(A) },
        0x23 /* INC HL      */ => Event::Increment16(HL),
        0x24 /* INC H       */ => Event::Increment(Operand::Register(H)),
        0x25 /* DEC H       */ => Event::Decrement(Operand::Register(H)),
        0x26 /* LD H,d8     */ => Event::Load { dest: Operand::Register(H), src: Operand::Immediate(fetch()?) },
        0x27 /* DAA         */ => Event::DecimalAdjust,
        0x28 /* JR Z,r8     */ => Event::JumpRelative(Some(Condition::Z), fetch()? as i8),
        0x29 /* ADD HL,HL   */ => Event::AddHl(HL),
        0x2A /* LD A,(HL+)  */ => Event::Load { dest: Operand::Register(A), src: Operand::Indirect(Indirect::HLI) },
        0x2B /* DEC HL      */ => Event::Decrement16(HL),
        0x2C /* INC L       */ => Event::Increment(Operand::Register(L)),
        0x2D /* DEC L       */ => Event::Decrement(Operand::Register(L)),
        0x2E /* LD L,d8     */ => Event::Load { dest: Operand::Register(L), src: Operand::Immediate(fetch()?) },
        0x2F /* CPL         */ => Event::Complement,
        0x30 /* JR NC,r8    */ => Event::JumpRelative(Some(Condition::NC), fetch()? as i8),
        0x31 /* LD SP,d16   */ => Event::Load16 { dest: Operand16::Register(SP), src: Operand16::Immediate(fetch16!()) },
        0x32 /* LD (HL-),A  */ => Event::Load { dest: Operand::Indirect(Indirect::HLD), src: Operand::Register(A) },
        0x33 /* INC SP      */ => Event::Increment16(SP),
        0x34 /* INC (HL)    */ => Event::Increment(Operand::Indirect(Indirect::HL)),
        0x35 /* DEC (HL)    */ => Event::Decrement(Operand::Indirect(Indirect::HL)),
        0x36 /* LD (HL),d8  */ => Event::Load { dest: Operand::Indirect(Indirect::HL), src: Operand::Immediate(fetch()?) },
        0x37 /* SCF         */ => Event::FlagSet(flags::SCF),
        0x38 /* JR C,r8     */ => Event::JumpRelative(Some(Condition::C), fetch()? as i8),
        0x39 /* ADD HL,SP   */ => Event::AddHl(SP),
        0x3A /* LD A,(HL-)  */ => Event::Load { dest: Operand::Register(A), src: Operand::Indirect(Indirect::HLD) },
        0x3B /* DEC SP      */ => Event::Decrement16(SP),
        0x3C /* INC A       */ => Event::Increment(Operand::Register(A)),
        0x3D /* DEC A       */ => Event::Decrement(Operand::Register(A)),
        0x3E /* LD A,d8     */ => Event::Load { dest: Operand::Register(A), src: Operand::Immediate(fetch()?) },
        0x3F /* CCF         */ => Event::FlagSet(flags::CCF),

        // LD (HL),(HL) would sit in the middle of the register-to-register loads, HALT took its place.
        0x76 /* HALT        */ => Event::Halt,
        0x40..=0x7F /* LD r,r'      */ => Event::Load { dest: operand_at(opcode >> 3), src: operand_at(opcode) },
        0x80..=0xBF /* ALU A,r      */ => alu(opcode),

        0xC0 /* RET NZ      */ => Event::Return(Some(Condition::NZ)),
        0xC1 /* POP BC      */ => Event::Pop(BC),
        0xC2 /* JP NZ,a16   */ => Event::Jump(Some(Condition::NZ), Operand16::Immediate(fetch16!())),
        0xC3 /* JP a16      */ => Event::Jump(None, Operand16::Immediate(fetch16!())),
        0xC4 /* CALL NZ,a16 */ => Event::Call(Some(Condition::NZ), fetch16!()),
        0xC5 /* PUSH BC     */ => Event::Push(BC),
        0xC6 /* ADD A,d8    */ => Event::Add(Operand::Immediate(fetch()?)),
        0xC7 /* RST 00H     */ => Event::Restart(0x00),
        0xC8 /* RET Z       */ => Event::Return(Some(Condition::Z)),
        0xC9 /* RET         */ => Event::Return(None),
        0xCA /* JP Z,a16    */ => Event::Jump(Some(Condition::Z), Operand16::Immediate(fetch16!())),
        0xCB /* PREFIX CB   */ => decode_extended_instruction(fetch)?,
        0xCC /* CALL Z,a16  */ => Event::Call(Some(Condition::Z), fetch16!()),
        0xCD /* CALL a16    */ => Event::Call(None, fetch16!()),
        0xCE /* ADC A,d8    */ => Event::Add(Operand::WithCarry(Carried::Immediate(fetch()?))),
        0xCF /* RST 08H     */ => Event::Restart(0x08),
        0xD0 /* RET NC      */ => Event::Return(Some(Condition::NC)),
        0xD1 /* POP DE      */ => Event::Pop(DE),
        0xD2 /* JP NC,a16   */ => Event::Jump(Some(Condition::NC), Operand16::Immediate(fetch16!())),
        0xD4 /* CALL NC,a16 */ => Event::Call(Some(Condition::NC), fetch16!()),
        0xD5 /* PUSH DE     */ => Event::Push(DE),
        0xD6 /* SUB d8      */ => Event::Sub(Operand::Immediate(fetch()?)),
        0xD7 /* RST 10H     */ => Event::Restart(0x10),
        0xD8 /* RET C       */ => Event::Return(Some(Condition::C)),
        0xD9 /* RETI        */ => Event::ReturnInterrupt,
        0xDA /* JP C,a16    */ => Event::Jump(Some(Condition::C), Operand16::Immediate(fetch16!())),
        0xDC /* CALL C,a16  */ => Event::Call(Some(Condition::C), fetch16!()),
        0xDE /* SBC A,d8    */ => Event::Sub(Operand::WithCarry(Carried::Immediate(fetch()?))),
        0xDF /* RST 18H     */ => Event::Restart(0x18),
        0xE0 /* LDH (a8),A  */ => Event::Load { dest: Operand::high(fetch()?), src: Operand::Register(A) },
        0xE1 /* POP HL      */ => Event::Pop(HL),
        0xE2 /* LD (C),A    */ => Event::Load { dest: Operand::PartialAddress { msb: 0xFF, lsb: C }, src: Operand::Register(A) },
        0xE5 /* PUSH HL     */ => Event::Push(HL),
        0xE6 /* AND d8      */ => Event::And(Operand::Immediate(fetch()?)),
        0xE7 /* RST 20H     */ => Event::Restart(0x20),
        0xE8 /* ADD SP,r8   */ => Event::AddSp(fetch()? as i8),
        0xE9 /* JP (HL)     */ => Event::Jump(None, Operand16::Register(HL)),
        0xEA /* LD (a16),A  */ => Event::Load { dest: Operand::Address(fetch16!()), src: Operand::Register(A) },
        0xEE /* XOR d8      */ => Event::Xor(Operand::Immediate(fetch()?)),
        0xEF /* RST 28H     */ => Event::Restart(0x28),
        0xF0 /* LDH A,(a8)  */ => Event::Load { dest: Operand::Register(A), src: Operand::high(fetch()?) },
        0xF1 /* POP AF      */ => Event::Pop(AF),
        0xF2 /* LD A,(C)    */ => Event::Load { dest: Operand::Register(A), src: Operand::PartialAddress { msb: 0xFF, lsb: C } },
        0xF3 /* DI          */ => Event::DisableInterrupts,
        0xF5 /* PUSH AF     */ => Event::Push(AF),
        0xF6 /* OR d8       */ => Event::Or(Operand::Immediate(fetch()?)),
        0xF7 /* RST 30H     */ => Event::Restart(0x30),
        0xF8 /* LD HL,SP+r8 */ => Event::compound(
            Event::Load16 { dest: Operand16::Register(HL), src: Operand16::RegisterOffset(SP, fetch()? as i8) },
            Event::FlagSet(flags::ADD_SP),
        ),
        0xF9 /* LD SP,HL    */ => Event::Load16 { dest: Operand16::Register(SP), src: Operand16::Register(HL) },
        0xFA /* LD A,(a16)  */ => Event::Load { dest: Operand::Register(A), src: Operand::Address(fetch16!()) },
        0xFB /* EI          */ => Event::EnableInterrupts,
        0xFE /* CP d8       */ => Event::Compare(Operand::Immediate(fetch()?)),
        0xFF /* RST 38H     */ => Event::Restart(0x38),

        0xDD | 0xED | 0xFD => {
            let prefixed = fetch()?;
            log::debug!("unimplemented prefixed opcode ${:02X} ${:02X}", opcode, prefixed);
            Event::Unimplemented { prefix: Some(opcode), opcode: prefixed }
        }
        op => {
            log::debug!("unimplemented opcode ${:02X}", op);
            Event::Unimplemented { prefix: None, opcode: op }
        }
    })
}

/// Decodes the opcode following a $CB prefix. The extended table is completely regular: the top two bits pick the
/// operation group, the middle three the shift kind or bit number, and the low three the operand.
fn decode_extended_instruction<F: FnMut() -> Result<u8>>(mut fetch: F) -> Result<Event> {
    const SHIFTS: [ShiftOp; 8] = [
        ShiftOp::RLC,
        ShiftOp::RRC,
        ShiftOp::RL,
        ShiftOp::RR,
        ShiftOp::SLA,
        ShiftOp::SRA,
        ShiftOp::SWAP,
        ShiftOp::SRL,
    ];

    let opcode = fetch()?;
    let operand = operand_at(opcode);
    let y = (opcode >> 3) & 0b111;

    Ok(match opcode >> 6 {
        0b00 => Event::Shift { op: SHIFTS[y as usize], operand },
        0b01 => Event::Bit { op: BitOp::BIT, bit: y, operand },
        0b10 => Event::Bit { op: BitOp::RES, bit: y, operand },
        _ => Event::Bit { op: BitOp::SET, bit: y, operand },
    })
}

/// The 8-bit operand selected by the low 3 bits of an opcode, in the order B, C, D, E, H, L, (HL), A.
fn operand_at(index: u8) -> Operand {
    match index & 0b111 {
        0 => Operand::Register(B),
        1 => Operand::Register(C),
        2 => Operand::Register(D),
        3 => Operand::Register(E),
        4 => Operand::Register(H),
        5 => Operand::Register(L),
        6 => Operand::Indirect(Indirect::HL),
        _ => Operand::Register(A),
    }
}

/// Same ordering as `operand_at`, for the operands of ADC and SBC.
fn carried_at(index: u8) -> Carried {
    match operand_at(index) {
        Operand::Register(r) => Carried::Register(r),
        _ => Carried::Indirect(Indirect::HL),
    }
}

/// $80-$BF: ADD, ADC, SUB, SBC, AND, XOR, OR, CP, each against the 8 operands from `operand_at`.
fn alu(opcode: u8) -> Event {
    match (opcode >> 3) & 0b111 {
        0 => Event::Add(operand_at(opcode)),
        1 => Event::Add(Operand::WithCarry(carried_at(opcode))),
        2 => Event::Sub(operand_at(opcode)),
        3 => Event::Sub(Operand::WithCarry(carried_at(opcode))),
        4 => Event::And(operand_at(opcode)),
        5 => Event::Xor(operand_at(opcode)),
        6 => Event::Or(operand_at(opcode)),
        _ => Event::Compare(operand_at(opcode)),
    }
}
