//! RISC-V instruction decoder.
//!
//! Decodes 32-bit instruction words into the structured [`Decoded`]
//! descriptor: opcode, register indices, function codes, and the
//! sign-extended immediate for the opcode's format class (R/I/S/B/U/J, plus
//! the R4 and AMO variants). Decoding is pure and stateless: the same word
//! always yields the same descriptor. Compressed instructions are expanded
//! to their canonical 32-bit form by [`crate::isa::rvc::expand`] before
//! reaching this function.

use crate::common::bits::sign_extend;
use crate::common::error::Fault;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::privileged::opcodes as sys;
use crate::isa::rv64a;
use crate::isa::rv64f;
use crate::isa::rv64i::opcodes;

/// Decodes the I-type immediate (bits 31:20, sign-extended).
fn i_type_imm(raw: u32) -> i64 {
    sign_extend(raw >> 20, 12)
}

/// Decodes the S-type immediate (imm[11:5] in bits 31:25, imm[4:0] in bits
/// 11:7).
fn s_type_imm(raw: u32) -> i64 {
    let low = (raw >> 7) & 0x1F;
    let high = (raw >> 25) & 0x7F;
    sign_extend(high << 5 | low, 12)
}

/// Decodes the B-type immediate (13 bits, multiples of 2).
fn b_type_imm(raw: u32) -> i64 {
    let bit_11 = (raw >> 7) & 1;
    let bits_4_1 = (raw >> 8) & 0xF;
    let bits_10_5 = (raw >> 25) & 0x3F;
    let bit_12 = (raw >> 31) & 1;
    sign_extend(bit_12 << 12 | bit_11 << 11 | bits_10_5 << 5 | bits_4_1 << 1, 13)
}

/// Decodes the U-type immediate (upper 20 bits, left-shifted by 12).
fn u_type_imm(raw: u32) -> i64 {
    (raw & 0xFFFF_F000) as i32 as i64
}

/// Decodes the J-type immediate (21 bits, multiples of 2).
fn j_type_imm(raw: u32) -> i64 {
    let bits_19_12 = (raw >> 12) & 0xFF;
    let bit_11 = (raw >> 20) & 1;
    let bits_10_1 = (raw >> 21) & 0x3FF;
    let bit_20 = (raw >> 31) & 1;
    sign_extend(
        bit_20 << 20 | bits_19_12 << 12 | bit_11 << 11 | bits_10_1 << 1,
        21,
    )
}

/// Decodes a 32-bit instruction word.
///
/// `pc` is carried for diagnostics only and does not influence the decoding.
///
/// # Errors
///
/// [`Fault::IllegalInstruction`] if the major opcode is not part of any
/// supported extension.
pub fn decode(raw: u32, pc: u64) -> Result<Decoded, Fault> {
    let opcode = raw.opcode();
    let imm = match opcode {
        opcodes::OP_LOAD
        | opcodes::OP_IMM
        | opcodes::OP_IMM_32
        | opcodes::OP_JALR
        | opcodes::OP_MISC_MEM
        | rv64f::OP_LOAD_FP
        | sys::OP_SYSTEM => i_type_imm(raw),
        opcodes::OP_STORE | rv64f::OP_STORE_FP => s_type_imm(raw),
        opcodes::OP_BRANCH => b_type_imm(raw),
        opcodes::OP_LUI | opcodes::OP_AUIPC => u_type_imm(raw),
        opcodes::OP_JAL => j_type_imm(raw),
        opcodes::OP_REG
        | opcodes::OP_REG_32
        | rv64a::OP_AMO
        | rv64f::OP_FP
        | rv64f::OP_FMADD
        | rv64f::OP_FMSUB
        | rv64f::OP_FNMSUB
        | rv64f::OP_FNMADD => 0,
        _ => return Err(Fault::IllegalInstruction { raw, pc }),
    };

    Ok(Decoded {
        raw,
        opcode,
        rd: raw.rd(),
        rs1: raw.rs1(),
        rs2: raw.rs2(),
        rs3: raw.rs3(),
        funct3: raw.funct3(),
        funct7: raw.funct7(),
        imm,
        width: 4,
    })
}
