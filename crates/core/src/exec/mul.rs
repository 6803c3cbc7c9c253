//! M extension: multiply, divide, and remainder.
//!
//! Division never traps. The architected sentinels apply instead: division
//! by zero yields an all-ones quotient and the dividend as remainder;
//! signed overflow (most-negative dividend over -1) yields the dividend as
//! quotient and zero remainder.

use crate::common::bits::sext32;
use crate::common::error::Fault;
use crate::config::Xlen;
use crate::core::state::CpuState;
use crate::exec::illegal;
use crate::isa::instruction::Decoded;
use crate::isa::rv64m::funct3;

fn mulh(a: u64, b: u64) -> u64 {
    ((i128::from(a as i64) * i128::from(b as i64)) >> 64) as u64
}

fn mulhsu(a: u64, b: u64) -> u64 {
    ((i128::from(a as i64) * i128::from(b)) >> 64) as u64
}

fn mulhu(a: u64, b: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) >> 64) as u64
}

fn div_signed(a: i64, b: i64) -> u64 {
    if b == 0 {
        u64::MAX
    } else if a == i64::MIN && b == -1 {
        a as u64
    } else {
        (a / b) as u64
    }
}

fn rem_signed(a: i64, b: i64) -> u64 {
    if b == 0 {
        a as u64
    } else if a == i64::MIN && b == -1 {
        0
    } else {
        (a % b) as u64
    }
}

/// Executes an M-extension instruction under OP (word = false) or OP-32
/// (word = true, RV64 only).
pub fn execute(state: &mut CpuState, d: &Decoded, word: bool) -> Result<Option<u64>, Fault> {
    if !state.config.ext.m {
        return Err(illegal(state, d));
    }
    let a = state.read_gpr(d.rs1);
    let b = state.read_gpr(d.rs2);

    let val = if word {
        let (aw, bw) = (a as i32, b as i32);
        match d.funct3 {
            funct3::MUL => sext32(aw.wrapping_mul(bw) as u32),
            funct3::DIV => sext32(div_signed(i64::from(aw), i64::from(bw)) as u32),
            funct3::DIVU => {
                if bw == 0 {
                    u64::MAX
                } else {
                    sext32((aw as u32) / (bw as u32))
                }
            }
            funct3::REM => sext32(rem_signed(i64::from(aw), i64::from(bw)) as u32),
            funct3::REMU => {
                if bw == 0 {
                    sext32(aw as u32)
                } else {
                    sext32((aw as u32) % (bw as u32))
                }
            }
            _ => return Err(illegal(state, d)),
        }
    } else if state.config.xlen == Xlen::Rv32 {
        // RV32 registers hold sign-extended 32-bit values; compute on the
        // 32-bit slices and let the register write re-extend.
        let (a32, b32) = (a as u32, b as u32);
        match d.funct3 {
            funct3::MUL => u64::from(a32.wrapping_mul(b32)),
            funct3::MULH => {
                ((i64::from(a32 as i32) * i64::from(b32 as i32)) >> 32) as u64
            }
            funct3::MULHSU => ((i64::from(a32 as i32) * i64::from(b32)) >> 32) as u64,
            funct3::MULHU => (u64::from(a32) * u64::from(b32)) >> 32,
            funct3::DIV => div_signed(i64::from(a32 as i32), i64::from(b32 as i32)),
            funct3::DIVU => {
                if b32 == 0 {
                    u64::MAX
                } else {
                    u64::from(a32 / b32)
                }
            }
            funct3::REM => rem_signed(i64::from(a32 as i32), i64::from(b32 as i32)),
            funct3::REMU => {
                if b32 == 0 {
                    u64::from(a32)
                } else {
                    u64::from(a32 % b32)
                }
            }
            _ => return Err(illegal(state, d)),
        }
    } else {
        match d.funct3 {
            funct3::MUL => a.wrapping_mul(b),
            funct3::MULH => mulh(a, b),
            funct3::MULHSU => mulhsu(a, b),
            funct3::MULHU => mulhu(a, b),
            funct3::DIV => div_signed(a as i64, b as i64),
            funct3::DIVU => {
                if b == 0 {
                    u64::MAX
                } else {
                    a / b
                }
            }
            funct3::REM => rem_signed(a as i64, b as i64),
            funct3::REMU => {
                if b == 0 {
                    a
                } else {
                    a % b
                }
            }
            _ => return Err(illegal(state, d)),
        }
    };

    state.write_gpr(d.rd, val);
    Ok(None)
}
