//! Bit-manipulation extensions: Zba, Zbb, Zbc, and Zbs.
//!
//! These share the OP/OP-IMM opcode space with the base ISA, so the base
//! handlers forward here once the funct7 or upper immediate bits fall
//! outside the base encodings. Each group is gated on its own extension
//! flag; a recognised encoding with the extension disabled is illegal.

use crate::common::bits::sext32;
use crate::common::error::Fault;
use crate::config::Xlen;
use crate::core::state::CpuState;
use crate::exec::illegal;
use crate::isa::bitmanip::{funct3, funct7, imm12, unary};
use crate::isa::instruction::Decoded;

fn zext32(v: u64) -> u64 {
    u64::from(v as u32)
}

/// Carry-less product of the low `bits` of `a` and `b`, 2*bits wide.
fn clmul_wide(a: u64, b: u64, bits: u32) -> u128 {
    let a = u128::from(a) & ((1u128 << bits) - 1);
    let mut acc = 0u128;
    for i in 0..bits {
        if (b >> i) & 1 == 1 {
            acc ^= a << i;
        }
    }
    acc
}

/// Zbb/Zbs encodings under OP-IMM funct3 001 (shift-left slot).
pub fn op_imm_group1(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let xlen = state.config.xlen;
    let shift_mask = u64::from(xlen.bits() - 1);
    let imm12 = d.imm as u64 & 0xFFF;
    let sel = (imm12 & shift_mask) as u32;
    let a = state.read_gpr(d.rs1);

    let val = match imm12 & !shift_mask {
        0x600 if state.config.ext.zbb => match (sel, xlen) {
            (unary::CLZ, Xlen::Rv32) => u64::from((a as u32).leading_zeros()),
            (unary::CLZ, Xlen::Rv64) => u64::from(a.leading_zeros()),
            (unary::CTZ, Xlen::Rv32) => u64::from((a as u32).trailing_zeros()),
            (unary::CTZ, Xlen::Rv64) => u64::from(a.trailing_zeros()),
            (unary::CPOP, Xlen::Rv32) => u64::from((a as u32).count_ones()),
            (unary::CPOP, Xlen::Rv64) => u64::from(a.count_ones()),
            (unary::SEXT_B, _) => a as u8 as i8 as i64 as u64,
            (unary::SEXT_H, _) => a as u16 as i16 as i64 as u64,
            _ => return Err(illegal(state, d)),
        },
        0x280 if state.config.ext.zbs => a | (1 << sel),
        0x480 if state.config.ext.zbs => a & !(1 << sel),
        0x680 if state.config.ext.zbs => a ^ (1 << sel),
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

/// Zbb/Zbs encodings under OP-IMM funct3 101 (shift-right slot).
pub fn op_imm_group5(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let xlen = state.config.xlen;
    let shift_mask = u64::from(xlen.bits() - 1);
    let raw_imm = d.imm as u64 & 0xFFF;
    let sh = (raw_imm & shift_mask) as u32;
    let a = state.read_gpr(d.rs1);

    let rev8_imm = match xlen {
        Xlen::Rv32 => imm12::REV8_RV32,
        Xlen::Rv64 => imm12::REV8_RV64,
    };
    let val = match raw_imm & !shift_mask {
        0x600 if state.config.ext.zbb => match xlen {
            Xlen::Rv32 => sext32((a as u32).rotate_right(sh)),
            Xlen::Rv64 => a.rotate_right(sh),
        },
        0x480 if state.config.ext.zbs => (a >> sh) & 1,
        0x280 if raw_imm == imm12::ORC_B && state.config.ext.zbb => {
            let mut out = 0u64;
            for byte in 0..8 {
                if (a >> (byte * 8)) & 0xFF != 0 {
                    out |= 0xFFu64 << (byte * 8);
                }
            }
            out
        }
        0x680 if raw_imm == rev8_imm && state.config.ext.zbb => match xlen {
            Xlen::Rv32 => sext32((a as u32).swap_bytes()),
            Xlen::Rv64 => a.swap_bytes(),
        },
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

/// Register-register encodings under OP outside the base funct7 values.
pub fn op_reg(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let xlen = state.config.xlen;
    let shift_mask = u64::from(xlen.bits() - 1);
    let ext = &state.config.ext;
    let a = state.read_gpr(d.rs1);
    let b = state.read_gpr(d.rs2);
    let sh = (b & shift_mask) as u32;

    let val = match (d.funct7, d.funct3) {
        (funct7::SH_ADD, funct3::SH1ADD) if ext.zba => (a << 1).wrapping_add(b),
        (funct7::SH_ADD, funct3::SH2ADD) if ext.zba => (a << 2).wrapping_add(b),
        (funct7::SH_ADD, funct3::SH3ADD) if ext.zba => (a << 3).wrapping_add(b),
        (funct7::LOGIC_NEG, funct3::ANDN) if ext.zbb => a & !b,
        (funct7::LOGIC_NEG, funct3::ORN) if ext.zbb => a | !b,
        (funct7::LOGIC_NEG, funct3::XNOR) if ext.zbb => !(a ^ b),
        (funct7::MINMAX_CLMUL, funct3::MIN) if ext.zbb => {
            // Sign-extended RV32 storage keeps both orderings intact at
            // 64 bits, so one comparison path serves both widths.
            ((a as i64).min(b as i64)) as u64
        }
        (funct7::MINMAX_CLMUL, funct3::MINU) if ext.zbb => a.min(b),
        (funct7::MINMAX_CLMUL, funct3::MAX) if ext.zbb => ((a as i64).max(b as i64)) as u64,
        (funct7::MINMAX_CLMUL, funct3::MAXU) if ext.zbb => a.max(b),
        (funct7::MINMAX_CLMUL, funct3::CLMUL) if ext.zbc => {
            clmul_wide(a, b, xlen.bits()) as u64
        }
        (funct7::MINMAX_CLMUL, funct3::CLMULR) if ext.zbc => {
            (clmul_wide(a, b, xlen.bits()) >> (xlen.bits() - 1)) as u64
        }
        (funct7::MINMAX_CLMUL, funct3::CLMULH) if ext.zbc => {
            (clmul_wide(a, b, xlen.bits()) >> xlen.bits()) as u64
        }
        (funct7::ROT, funct3::ROL_COUNTS) if ext.zbb => match xlen {
            Xlen::Rv32 => sext32((a as u32).rotate_left(sh)),
            Xlen::Rv64 => a.rotate_left(sh),
        },
        (funct7::ROT, funct3::ROR) if ext.zbb => match xlen {
            Xlen::Rv32 => sext32((a as u32).rotate_right(sh)),
            Xlen::Rv64 => a.rotate_right(sh),
        },
        (funct7::BSET, funct3::BSET_BCLR_BINV) if ext.zbs => a | (1 << sh),
        (funct7::BCLR_BEXT, funct3::BSET_BCLR_BINV) if ext.zbs => a & !(1 << sh),
        (funct7::BCLR_BEXT, funct3::BEXT) if ext.zbs => (a >> sh) & 1,
        (funct7::BINV, funct3::BSET_BCLR_BINV) if ext.zbs => a ^ (1 << sh),
        // zext.h sits under OP on RV32 only; the RV64 encoding is OP-32.
        (funct7::UW, funct3::ZEXT_H) if xlen == Xlen::Rv32 && ext.zbb && d.rs2 == 0 => {
            u64::from(a as u16)
        }
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

/// Register-register encodings under OP-32 outside the base funct7 values
/// (RV64 only; the caller rejects RV32).
pub fn op_reg_32(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let ext = &state.config.ext;
    let a = state.read_gpr(d.rs1);
    let b = state.read_gpr(d.rs2);

    let val = match (d.funct7, d.funct3) {
        (funct7::SH_ADD, funct3::SH1ADD) if ext.zba => (zext32(a) << 1).wrapping_add(b),
        (funct7::SH_ADD, funct3::SH2ADD) if ext.zba => (zext32(a) << 2).wrapping_add(b),
        (funct7::SH_ADD, funct3::SH3ADD) if ext.zba => (zext32(a) << 3).wrapping_add(b),
        (funct7::UW, funct3::ADD_UW) if ext.zba => zext32(a).wrapping_add(b),
        (funct7::UW, funct3::ZEXT_H) if ext.zbb && d.rs2 == 0 => u64::from(a as u16),
        (funct7::ROT, funct3::ROL_COUNTS) if ext.zbb => {
            sext32((a as u32).rotate_left(b as u32 & 0x1F))
        }
        (funct7::ROT, funct3::ROR) if ext.zbb => {
            sext32((a as u32).rotate_right(b as u32 & 0x1F))
        }
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

/// Immediate encodings under OP-IMM-32 outside the base shifts (RV64 only).
pub fn op_imm_32(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let ext = &state.config.ext;
    let raw_imm = d.imm as u64 & 0xFFF;
    let a = state.read_gpr(d.rs1);

    let val = match d.funct3 {
        // slli.uw takes a full 6-bit shift amount even under OP-IMM-32.
        funct3::SLLI_UW if raw_imm >> 6 == 0b00_0010 && ext.zba => {
            zext32(a) << (raw_imm & 0x3F)
        }
        // The Zbb word-form counts share funct3 001 with slli.uw.
        funct3::ROL_COUNTS if raw_imm >> 5 == 0b011_0000 && ext.zbb => {
            match raw_imm as u32 & 0x1F {
                unary::CLZ => u64::from((a as u32).leading_zeros()),
                unary::CTZ => u64::from((a as u32).trailing_zeros()),
                unary::CPOP => u64::from((a as u32).count_ones()),
                _ => return Err(illegal(state, d)),
            }
        }
        funct3::ROR if raw_imm >> 5 == 0b011_0000 && ext.zbb => {
            sext32((a as u32).rotate_right(raw_imm as u32 & 0x1F))
        }
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}
