//! A extension: load-reserved/store-conditional and atomic memory
//! operations.
//!
//! The core is single-hart and each step is indivisible, so AMOs execute as
//! a plain read-modify-write within one step. The LR/SC reservation is a
//! single address: SC succeeds only against a matching outstanding
//! reservation, and any intervening store (or another atomic) to that
//! address breaks it. Atomics require natural alignment.

use crate::common::bits::sext32;
use crate::common::error::Fault;
use crate::config::Xlen;
use crate::core::state::CpuState;
use crate::exec::illegal;
use crate::isa::instruction::Decoded;
use crate::isa::rv64a::funct5;
use crate::isa::rv64i::funct3;

fn amo_op32(funct5: u32, old: u32, src: u32) -> u32 {
    match funct5 {
        funct5::AMOSWAP => src,
        funct5::AMOADD => old.wrapping_add(src),
        funct5::AMOXOR => old ^ src,
        funct5::AMOAND => old & src,
        funct5::AMOOR => old | src,
        funct5::AMOMIN => (old as i32).min(src as i32) as u32,
        funct5::AMOMAX => (old as i32).max(src as i32) as u32,
        funct5::AMOMINU => old.min(src),
        _ => old.max(src),
    }
}

fn amo_op64(funct5: u32, old: u64, src: u64) -> u64 {
    match funct5 {
        funct5::AMOSWAP => src,
        funct5::AMOADD => old.wrapping_add(src),
        funct5::AMOXOR => old ^ src,
        funct5::AMOAND => old & src,
        funct5::AMOOR => old | src,
        funct5::AMOMIN => (old as i64).min(src as i64) as u64,
        funct5::AMOMAX => (old as i64).max(src as i64) as u64,
        funct5::AMOMINU => old.min(src),
        _ => old.max(src),
    }
}

/// Executes an atomic instruction.
pub fn execute(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    if !state.config.ext.a {
        return Err(illegal(state, d));
    }
    let wide = match d.funct3 {
        funct3::LW => false,
        funct3::LD if state.config.xlen == Xlen::Rv64 => true,
        _ => return Err(illegal(state, d)),
    };
    let size: u64 = if wide { 8 } else { 4 };
    let addr = state.mask_addr(state.read_gpr(d.rs1));
    if addr % size != 0 {
        return Err(Fault::MisalignedAccess { addr });
    }

    let funct5 = d.funct7 >> 2;
    match funct5 {
        funct5::LR => {
            let val = if wide {
                state.mem.load_u64(addr)?
            } else {
                sext32(state.mem.load_u32(addr)?)
            };
            state.write_gpr(d.rd, val);
            state.reservation = Some(addr);
        }
        funct5::SC => {
            if state.reservation == Some(addr) {
                let src = state.read_gpr(d.rs2);
                if wide {
                    state.mem.store_u64(addr, src);
                } else {
                    state.mem.store_u32(addr, src as u32);
                }
                state.write_gpr(d.rd, 0);
            } else {
                state.write_gpr(d.rd, 1);
            }
            state.reservation = None;
        }
        funct5::AMOSWAP
        | funct5::AMOADD
        | funct5::AMOXOR
        | funct5::AMOAND
        | funct5::AMOOR
        | funct5::AMOMIN
        | funct5::AMOMAX
        | funct5::AMOMINU
        | funct5::AMOMAXU => {
            let src = state.read_gpr(d.rs2);
            let old = if wide {
                let old = state.mem.load_u64(addr)?;
                state.mem.store_u64(addr, amo_op64(funct5, old, src));
                old
            } else {
                let old = state.mem.load_u32(addr)?;
                state
                    .mem
                    .store_u32(addr, amo_op32(funct5, old, src as u32));
                sext32(old)
            };
            state.write_gpr(d.rd, old);
            if state.reservation == Some(addr) {
                state.reservation = None;
            }
        }
        _ => return Err(illegal(state, d)),
    }
    Ok(None)
}
