//! Base integer instruction semantics (RV32I/RV64I).
//!
//! Integer arithmetic wraps modulo 2^XLEN; there is no overflow trap. On
//! RV32 the register file holds values sign-extended to 64 bits, so signed
//! and unsigned comparisons read identically for both widths; only the
//! right shifts need width-specific handling.

use crate::common::bits::sext32;
use crate::common::error::Fault;
use crate::config::Xlen;
use crate::core::state::CpuState;
use crate::exec::{bitmanip, illegal, mul};
use crate::isa::instruction::Decoded;
use crate::isa::rv64i::{funct3, funct7, opcodes};
use crate::isa::rv64m::M_EXTENSION;

/// Logical right shift at the configured width.
fn srl(xlen: Xlen, v: u64, sh: u32) -> u64 {
    match xlen {
        Xlen::Rv32 => u64::from((v as u32) >> sh),
        Xlen::Rv64 => v >> sh,
    }
}

/// Arithmetic right shift at the configured width.
fn sra(xlen: Xlen, v: u64, sh: u32) -> u64 {
    match xlen {
        Xlen::Rv32 => sext32(((v as i32) >> sh) as u32),
        Xlen::Rv64 => ((v as i64) >> sh) as u64,
    }
}

/// Executes a base-opcode instruction, returning the PC override for taken
/// control flow.
pub fn execute(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    match d.opcode {
        opcodes::OP_LUI => {
            state.write_gpr(d.rd, d.imm as u64);
            Ok(None)
        }
        opcodes::OP_AUIPC => {
            state.write_gpr(d.rd, state.pc.wrapping_add(d.imm as u64));
            Ok(None)
        }
        opcodes::OP_JAL => {
            state.write_gpr(d.rd, state.pc.wrapping_add(d.width));
            Ok(Some(state.pc.wrapping_add(d.imm as u64)))
        }
        opcodes::OP_JALR => {
            let target = state.read_gpr(d.rs1).wrapping_add(d.imm as u64) & !1;
            state.write_gpr(d.rd, state.pc.wrapping_add(d.width));
            Ok(Some(target))
        }
        opcodes::OP_BRANCH => branch(state, d),
        opcodes::OP_LOAD => load(state, d),
        opcodes::OP_STORE => store(state, d),
        opcodes::OP_IMM => op_imm(state, d),
        opcodes::OP_REG => op_reg(state, d),
        opcodes::OP_IMM_32 => op_imm_32(state, d),
        opcodes::OP_REG_32 => op_reg_32(state, d),
        opcodes::OP_MISC_MEM => match d.funct3 {
            // Single-hart, in-order interpretation: fences are no-ops.
            funct3::FENCE | funct3::FENCE_I => Ok(None),
            _ => Err(illegal(state, d)),
        },
        _ => Err(illegal(state, d)),
    }
}

fn branch(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let a = state.read_gpr(d.rs1);
    let b = state.read_gpr(d.rs2);
    let taken = match d.funct3 {
        funct3::BEQ => a == b,
        funct3::BNE => a != b,
        funct3::BLT => (a as i64) < (b as i64),
        funct3::BGE => (a as i64) >= (b as i64),
        funct3::BLTU => a < b,
        funct3::BGEU => a >= b,
        _ => return Err(illegal(state, d)),
    };
    Ok(taken.then(|| state.pc.wrapping_add(d.imm as u64)))
}

fn load(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let addr = state.mask_addr(state.read_gpr(d.rs1).wrapping_add(d.imm as u64));
    let rv64 = state.config.xlen == Xlen::Rv64;
    let val = match d.funct3 {
        funct3::LB => state.mem.load_u8(addr)? as i8 as i64 as u64,
        funct3::LH => state.mem.load_u16(addr)? as i16 as i64 as u64,
        funct3::LW => sext32(state.mem.load_u32(addr)?),
        funct3::LBU => u64::from(state.mem.load_u8(addr)?),
        funct3::LHU => u64::from(state.mem.load_u16(addr)?),
        funct3::LD if rv64 => state.mem.load_u64(addr)?,
        funct3::LWU if rv64 => u64::from(state.mem.load_u32(addr)?),
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

fn store(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let addr = state.mask_addr(state.read_gpr(d.rs1).wrapping_add(d.imm as u64));
    let val = state.read_gpr(d.rs2);
    match d.funct3 {
        funct3::SB => state.mem.store_u8(addr, val as u8),
        funct3::SH => state.mem.store_u16(addr, val as u16),
        funct3::SW => state.mem.store_u32(addr, val as u32),
        funct3::SD if state.config.xlen == Xlen::Rv64 => state.mem.store_u64(addr, val),
        _ => return Err(illegal(state, d)),
    }
    // A store to the reserved address invalidates an outstanding LR.
    if state.reservation == Some(addr) {
        state.reservation = None;
    }
    Ok(None)
}

fn op_imm(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let xlen = state.config.xlen;
    let shift_mask = u64::from(xlen.bits() - 1);
    let a = state.read_gpr(d.rs1);
    let imm = d.imm as u64;
    let val = match d.funct3 {
        funct3::ADD_SUB => a.wrapping_add(imm),
        funct3::SLT => u64::from((a as i64) < d.imm),
        funct3::SLTU => u64::from(a < imm),
        funct3::XOR => a ^ imm,
        funct3::OR => a | imm,
        funct3::AND => a & imm,
        funct3::SLL => {
            let imm12 = imm & 0xFFF;
            let shamt = (imm12 & shift_mask) as u32;
            if imm12 & !shift_mask == 0 {
                a.wrapping_shl(shamt)
            } else {
                // Upper immediate bits select a Zbb/Zbs encoding.
                return bitmanip::op_imm_group1(state, d);
            }
        }
        funct3::SRL_SRA => {
            let imm12 = imm & 0xFFF;
            let shamt = (imm12 & shift_mask) as u32;
            match imm12 & !shift_mask {
                0 => srl(xlen, a, shamt),
                0x400 => sra(xlen, a, shamt),
                _ => return bitmanip::op_imm_group5(state, d),
            }
        }
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

fn op_reg(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    if d.funct7 == M_EXTENSION {
        return mul::execute(state, d, false);
    }
    let sub = d.funct7 == funct7::SUB_SRA;
    // ANDN/ORN/XNOR reuse the SUB/SRA funct7 with their own funct3 values.
    if d.funct7 != funct7::DEFAULT
        && (!sub || !matches!(d.funct3, funct3::ADD_SUB | funct3::SRL_SRA))
    {
        return bitmanip::op_reg(state, d);
    }
    let xlen = state.config.xlen;
    let shift_mask = u64::from(xlen.bits() - 1);
    let a = state.read_gpr(d.rs1);
    let b = state.read_gpr(d.rs2);
    let val = match (d.funct3, sub) {
        (funct3::ADD_SUB, false) => a.wrapping_add(b),
        (funct3::ADD_SUB, true) => a.wrapping_sub(b),
        (funct3::SLL, false) => a.wrapping_shl((b & shift_mask) as u32),
        (funct3::SLT, false) => u64::from((a as i64) < (b as i64)),
        (funct3::SLTU, false) => u64::from(a < b),
        (funct3::XOR, false) => a ^ b,
        (funct3::SRL_SRA, false) => srl(xlen, a, (b & shift_mask) as u32),
        (funct3::SRL_SRA, true) => sra(xlen, a, (b & shift_mask) as u32),
        (funct3::OR, false) => a | b,
        (funct3::AND, false) => a & b,
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

fn op_imm_32(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    if state.config.xlen != Xlen::Rv64 {
        return Err(illegal(state, d));
    }
    let a = state.read_gpr(d.rs1) as u32;
    let imm12 = d.imm as u64 & 0xFFF;
    let val = match d.funct3 {
        funct3::ADD_SUB => sext32(a.wrapping_add(d.imm as u32)),
        funct3::SLL => {
            let shamt = (imm12 & 0x1F) as u32;
            if imm12 >> 5 == 0 {
                sext32(a.wrapping_shl(shamt))
            } else {
                return bitmanip::op_imm_32(state, d);
            }
        }
        funct3::SRL_SRA => {
            let shamt = (imm12 & 0x1F) as u32;
            match imm12 >> 5 {
                0 => sext32(a >> shamt),
                0x20 => sext32(((a as i32) >> shamt) as u32),
                _ => return bitmanip::op_imm_32(state, d),
            }
        }
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}

fn op_reg_32(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    if state.config.xlen != Xlen::Rv64 {
        return Err(illegal(state, d));
    }
    if d.funct7 == M_EXTENSION {
        return mul::execute(state, d, true);
    }
    if d.funct7 != funct7::DEFAULT && d.funct7 != funct7::SUB_SRA {
        return bitmanip::op_reg_32(state, d);
    }
    let a = state.read_gpr(d.rs1) as u32;
    let b = state.read_gpr(d.rs2) as u32;
    let sub = d.funct7 == funct7::SUB_SRA;
    let val = match (d.funct3, sub) {
        (funct3::ADD_SUB, false) => sext32(a.wrapping_add(b)),
        (funct3::ADD_SUB, true) => sext32(a.wrapping_sub(b)),
        (funct3::SLL, false) => sext32(a.wrapping_shl(b & 0x1F)),
        (funct3::SRL_SRA, false) => sext32(a >> (b & 0x1F)),
        (funct3::SRL_SRA, true) => sext32(((a as i32) >> (b & 0x1F)) as u32),
        _ => return Err(illegal(state, d)),
    };
    state.write_gpr(d.rd, val);
    Ok(None)
}
