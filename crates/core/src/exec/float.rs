//! F, D, and Zfh instruction semantics.
//!
//! The three formats share the OP-FP opcode space; `funct7` splits into an
//! operation selector and a format field. Narrow values live NaN-boxed in
//! the 64-bit register file and are unboxed on read, so an improperly boxed
//! operand behaves as the canonical quiet NaN. Arithmetic is evaluated by
//! the [`crate::core::fpu`] helpers, which also return the exception flags
//! to accrue into `fcsr`.

use crate::common::bits::sext32;
use crate::common::error::Fault;
use crate::config::Xlen;
use crate::core::fpu::{
    self, FpCmp, FpOp,
    exception_flags::FpFlags,
    half::{f16_to_f32, f16_to_f64, f64_to_f16},
    nan_handling::{
        self, CANONICAL_NAN_F16, CANONICAL_NAN_F32, CANONICAL_NAN_F64, box_f16, box_f32,
        is_snan_f16, is_snan_f32, is_snan_f64, unbox_f16, unbox_f32,
    },
    rounding_modes::RoundingMode,
};
use crate::core::state::CpuState;
use crate::exec::illegal;
use crate::isa::instruction::Decoded;
use crate::isa::rv64f::{self, cvt, fmt, funct3, ops};

fn f32_op(state: &CpuState, idx: usize) -> f32 {
    f32::from_bits(unbox_f32(state.fpr.read(idx)))
}

fn f64_op(state: &CpuState, idx: usize) -> f64 {
    f64::from_bits(state.fpr.read(idx))
}

fn f16_op(state: &CpuState, idx: usize) -> u16 {
    unbox_f16(state.fpr.read(idx))
}

fn accrue(state: &mut CpuState, flags: FpFlags) {
    state.csr.accrue_fflags(flags.bits());
}

fn fmt_enabled(state: &CpuState, format: u32) -> bool {
    match format {
        fmt::S => state.config.ext.f,
        fmt::D => state.config.ext.d,
        fmt::H => state.config.ext.zfh,
        _ => false,
    }
}

/// Resolves the instruction's rounding-mode field, reading `fcsr.frm` for
/// the dynamic encoding. Reserved encodings are illegal.
fn resolve_rm(state: &CpuState, d: &Decoded) -> Result<RoundingMode, Fault> {
    let bits = if d.funct3 == 0b111 {
        state.csr.frm()
    } else {
        d.funct3 as u8
    };
    RoundingMode::from_bits(bits).ok_or_else(|| illegal(state, d))
}

/// FLH/FLW/FLD and FSH/FSW/FSD.
pub fn execute_load_store(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let addr = state.mask_addr(state.read_gpr(d.rs1).wrapping_add(d.imm as u64));
    let load = d.opcode == rv64f::OP_LOAD_FP;
    match d.funct3 {
        0b001 if state.config.ext.zfh => {
            if load {
                let bits = state.mem.load_u16(addr)?;
                state.fpr.write(d.rd, box_f16(bits));
            } else {
                state.mem.store_u16(addr, state.fpr.read(d.rs2) as u16);
            }
        }
        0b010 if state.config.ext.f => {
            if load {
                let bits = state.mem.load_u32(addr)?;
                state.fpr.write(d.rd, box_f32(bits));
            } else {
                state.mem.store_u32(addr, state.fpr.read(d.rs2) as u32);
            }
        }
        0b011 if state.config.ext.d => {
            if load {
                let bits = state.mem.load_u64(addr)?;
                state.fpr.write(d.rd, bits);
            } else {
                state.mem.store_u64(addr, state.fpr.read(d.rs2));
            }
        }
        _ => return Err(illegal(state, d)),
    }
    if !load && state.reservation == Some(addr) {
        state.reservation = None;
    }
    Ok(None)
}

/// OP-FP instructions: arithmetic, sign injection, min/max, comparisons,
/// classification, conversions, and register moves.
pub fn execute_fp(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let op = d.funct7 >> 2;
    let format = d.funct7 & 3;
    if !fmt_enabled(state, format) {
        return Err(illegal(state, d));
    }
    match op {
        ops::FADD | ops::FSUB | ops::FMUL | ops::FDIV => {
            let _ = resolve_rm(state, d)?;
            let kind = match op {
                ops::FADD => FpOp::Add,
                ops::FSUB => FpOp::Sub,
                ops::FMUL => FpOp::Mul,
                _ => FpOp::Div,
            };
            let (bits, flags) = match format {
                fmt::S => {
                    let (b, f) = fpu::arith_f32(kind, f32_op(state, d.rs1), f32_op(state, d.rs2));
                    (box_f32(b), f)
                }
                fmt::D => {
                    let (b, f) = fpu::arith_f64(kind, f64_op(state, d.rs1), f64_op(state, d.rs2));
                    (b, f)
                }
                _ => {
                    let (b, f) = fpu::arith_f16(kind, f16_op(state, d.rs1), f16_op(state, d.rs2));
                    (box_f16(b), f)
                }
            };
            state.fpr.write(d.rd, bits);
            accrue(state, flags);
        }
        ops::FSQRT => {
            // The rs2 field is hard-wired to zero in the FSQRT encoding.
            if d.rs2 != 0 {
                return Err(illegal(state, d));
            }
            let _ = resolve_rm(state, d)?;
            let (bits, flags) = match format {
                fmt::S => {
                    let (b, f) = fpu::sqrt_f32(f32_op(state, d.rs1));
                    (box_f32(b), f)
                }
                fmt::D => fpu::sqrt_f64(f64_op(state, d.rs1)),
                _ => {
                    let (b, f) = fpu::sqrt_f16(f16_op(state, d.rs1));
                    (box_f16(b), f)
                }
            };
            state.fpr.write(d.rd, bits);
            accrue(state, flags);
        }
        ops::FSGNJ => sign_inject(state, d, format)?,
        ops::FMIN_MAX => min_max(state, d, format)?,
        ops::FCMP => compare(state, d, format)?,
        ops::FCLASS_MV_X => match d.funct3 {
            funct3::FCLASS => {
                let mask = match format {
                    fmt::S => classify_f32(unbox_f32(state.fpr.read(d.rs1))),
                    fmt::D => classify_f64(state.fpr.read(d.rs1)),
                    _ => classify_f16(unbox_f16(state.fpr.read(d.rs1))),
                };
                state.write_gpr(d.rd, mask);
            }
            funct3::FMV_X => {
                let raw = state.fpr.read(d.rs1);
                let val = match format {
                    fmt::S => sext32(raw as u32),
                    fmt::D if state.config.xlen == Xlen::Rv64 => raw,
                    fmt::H => raw as u16 as i16 as i64 as u64,
                    _ => return Err(illegal(state, d)),
                };
                state.write_gpr(d.rd, val);
            }
            _ => return Err(illegal(state, d)),
        },
        ops::FMV_F_X => {
            let raw = state.read_gpr(d.rs1);
            let bits = match format {
                fmt::S => box_f32(raw as u32),
                fmt::D if state.config.xlen == Xlen::Rv64 => raw,
                fmt::H => box_f16(raw as u16),
                _ => return Err(illegal(state, d)),
            };
            state.fpr.write(d.rd, bits);
        }
        ops::FCVT_INT_F => cvt_to_int(state, d, format)?,
        ops::FCVT_F_INT => cvt_from_int(state, d, format)?,
        ops::FCVT_F_F => cvt_between(state, d, format)?,
        _ => return Err(illegal(state, d)),
    }
    Ok(None)
}

fn sign_inject(state: &mut CpuState, d: &Decoded, format: u32) -> Result<(), Fault> {
    let (sign_mask, abs_mask): (u64, u64) = match format {
        fmt::S => (0x8000_0000, 0x7FFF_FFFF),
        fmt::D => (0x8000_0000_0000_0000, 0x7FFF_FFFF_FFFF_FFFF),
        _ => (0x8000, 0x7FFF),
    };
    let (ra, rb): (u64, u64) = match format {
        fmt::S => (
            u64::from(unbox_f32(state.fpr.read(d.rs1))),
            u64::from(unbox_f32(state.fpr.read(d.rs2))),
        ),
        fmt::D => (state.fpr.read(d.rs1), state.fpr.read(d.rs2)),
        _ => (
            u64::from(unbox_f16(state.fpr.read(d.rs1))),
            u64::from(unbox_f16(state.fpr.read(d.rs2))),
        ),
    };
    let out = match d.funct3 {
        funct3::FSGNJ => (ra & abs_mask) | (rb & sign_mask),
        funct3::FSGNJN => (ra & abs_mask) | (!rb & sign_mask),
        funct3::FSGNJX => ra ^ (rb & sign_mask),
        _ => return Err(illegal(state, d)),
    };
    let boxed = match format {
        fmt::S => box_f32(out as u32),
        fmt::D => out,
        _ => box_f16(out as u16),
    };
    state.fpr.write(d.rd, boxed);
    Ok(())
}

fn min_max(state: &mut CpuState, d: &Decoded, format: u32) -> Result<(), Fault> {
    let minimum = match d.funct3 {
        funct3::FMIN => true,
        funct3::FMAX => false,
        _ => return Err(illegal(state, d)),
    };
    let (bits, snan) = match format {
        fmt::S => {
            let (a, b) = (f32_op(state, d.rs1), f32_op(state, d.rs2));
            let out = if minimum {
                nan_handling::min_f32(a, b)
            } else {
                nan_handling::max_f32(a, b)
            };
            (box_f32(out), is_snan_f32(a.to_bits()) || is_snan_f32(b.to_bits()))
        }
        fmt::D => {
            let (a, b) = (f64_op(state, d.rs1), f64_op(state, d.rs2));
            let out = if minimum {
                nan_handling::min_f64(a, b)
            } else {
                nan_handling::max_f64(a, b)
            };
            (out, is_snan_f64(a.to_bits()) || is_snan_f64(b.to_bits()))
        }
        _ => {
            let (a, b) = (f16_op(state, d.rs1), f16_op(state, d.rs2));
            (box_f16(min_max_f16(minimum, a, b)), is_snan_f16(a) || is_snan_f16(b))
        }
    };
    state.fpr.write(d.rd, bits);
    if snan {
        accrue(state, FpFlags::NV);
    }
    Ok(())
}

/// FMIN/FMAX selection on binary16 bits, ordered through exact widening.
fn min_max_f16(minimum: bool, a: u16, b: u16) -> u16 {
    let (wa, wb) = (f16_to_f64(a), f16_to_f64(b));
    match (wa.is_nan(), wb.is_nan()) {
        (true, true) => CANONICAL_NAN_F16,
        (true, false) => b,
        (false, true) => a,
        (false, false) => {
            if wa == 0.0 && wb == 0.0 {
                if minimum { a | b } else { a & b }
            } else if (wa < wb) == minimum {
                a
            } else {
                b
            }
        }
    }
}

fn compare(state: &mut CpuState, d: &Decoded, format: u32) -> Result<(), Fault> {
    let cmp = match d.funct3 {
        funct3::FEQ => FpCmp::Eq,
        funct3::FLT => FpCmp::Lt,
        funct3::FLE => FpCmp::Le,
        _ => return Err(illegal(state, d)),
    };
    let (result, flags) = match format {
        fmt::S => fpu::compare_f32(cmp, f32_op(state, d.rs1), f32_op(state, d.rs2)),
        fmt::D => fpu::compare_f64(cmp, f64_op(state, d.rs1), f64_op(state, d.rs2)),
        _ => fpu::compare_f16(cmp, f16_op(state, d.rs1), f16_op(state, d.rs2)),
    };
    state.write_gpr(d.rd, u64::from(result));
    accrue(state, flags);
    Ok(())
}

fn cvt_to_int(state: &mut CpuState, d: &Decoded, format: u32) -> Result<(), Fault> {
    let rm = resolve_rm(state, d)?;
    let v = match format {
        fmt::S => f64::from(f32_op(state, d.rs1)),
        fmt::D => f64_op(state, d.rs1),
        _ => f16_to_f64(f16_op(state, d.rs1)),
    };
    let (bits, signed) = match d.rs2 {
        cvt::W => (32, true),
        cvt::WU => (32, false),
        cvt::L if state.config.xlen == Xlen::Rv64 => (64, true),
        cvt::LU if state.config.xlen == Xlen::Rv64 => (64, false),
        _ => return Err(illegal(state, d)),
    };
    let (val, flags) = fpu::f64_to_int(v, rm, bits, signed);
    state.write_gpr(d.rd, val);
    accrue(state, flags);
    Ok(())
}

fn cvt_from_int(state: &mut CpuState, d: &Decoded, format: u32) -> Result<(), Fault> {
    let _ = resolve_rm(state, d)?;
    let a = state.read_gpr(d.rs1);
    if matches!(d.rs2, cvt::L | cvt::LU) && state.config.xlen != Xlen::Rv64 {
        return Err(illegal(state, d));
    }
    match format {
        fmt::S => {
            let (r, flags) = match d.rs2 {
                cvt::W => fpu::i64_to_f32(i64::from(a as i32)),
                cvt::WU => fpu::u64_to_f32(u64::from(a as u32)),
                cvt::L => fpu::i64_to_f32(a as i64),
                cvt::LU => fpu::u64_to_f32(a),
                _ => return Err(illegal(state, d)),
            };
            state.fpr.write(d.rd, box_f32(r.to_bits()));
            accrue(state, flags);
        }
        fmt::D => {
            let (r, flags) = match d.rs2 {
                cvt::W => (f64::from(a as i32), FpFlags::NONE),
                cvt::WU => (f64::from(a as u32), FpFlags::NONE),
                cvt::L => fpu::i64_to_f64(a as i64),
                cvt::LU => fpu::u64_to_f64(a),
                _ => return Err(illegal(state, d)),
            };
            state.fpr.write(d.rd, r.to_bits());
            accrue(state, flags);
        }
        _ => {
            // Widen exactly (W/WU) or with at most one 53-bit rounding
            // (L/LU), then narrow once; 53 bits clear the 2p+2 threshold.
            let (wide, f1) = match d.rs2 {
                cvt::W => (f64::from(a as i32), FpFlags::NONE),
                cvt::WU => (f64::from(a as u32), FpFlags::NONE),
                cvt::L => fpu::i64_to_f64(a as i64),
                cvt::LU => fpu::u64_to_f64(a),
                _ => return Err(illegal(state, d)),
            };
            let (bits, f2) = f64_to_f16(wide);
            state.fpr.write(d.rd, box_f16(bits));
            accrue(state, f1 | f2);
        }
    }
    Ok(())
}

/// FCVT between floating-point formats; rs2 selects the source format.
fn cvt_between(state: &mut CpuState, d: &Decoded, format: u32) -> Result<(), Fault> {
    let _ = resolve_rm(state, d)?;
    let src = d.rs2 as u32;
    if !fmt_enabled(state, src) || src == format {
        return Err(illegal(state, d));
    }
    match (format, src) {
        (fmt::D, fmt::S) => {
            let a = f32_op(state, d.rs1);
            if is_snan_f32(a.to_bits()) {
                accrue(state, FpFlags::NV);
            }
            let bits = if a.is_nan() {
                CANONICAL_NAN_F64
            } else {
                f64::from(a).to_bits()
            };
            state.fpr.write(d.rd, bits);
        }
        (fmt::S, fmt::D) => {
            let a = f64_op(state, d.rs1);
            let r = a as f32;
            let mut flags = fpu::nx_flags_f32(r, a);
            if is_snan_f64(a.to_bits()) {
                flags = flags | FpFlags::NV;
            }
            let bits = if r.is_nan() { CANONICAL_NAN_F32 } else { r.to_bits() };
            state.fpr.write(d.rd, box_f32(bits));
            accrue(state, flags);
        }
        (fmt::S, fmt::H) => {
            let a = f16_op(state, d.rs1);
            if is_snan_f16(a) {
                accrue(state, FpFlags::NV);
            }
            state.fpr.write(d.rd, box_f32(f16_to_f32(a).to_bits()));
        }
        (fmt::D, fmt::H) => {
            let a = f16_op(state, d.rs1);
            if is_snan_f16(a) {
                accrue(state, FpFlags::NV);
            }
            state.fpr.write(d.rd, f16_to_f64(a).to_bits());
        }
        (fmt::H, fmt::S) => {
            let a = f32_op(state, d.rs1);
            let (bits, mut flags) = f64_to_f16(f64::from(a));
            if is_snan_f32(a.to_bits()) {
                flags = flags | FpFlags::NV;
            }
            state.fpr.write(d.rd, box_f16(bits));
            accrue(state, flags);
        }
        (fmt::H, fmt::D) => {
            let a = f64_op(state, d.rs1);
            let (bits, mut flags) = f64_to_f16(a);
            if is_snan_f64(a.to_bits()) {
                flags = flags | FpFlags::NV;
            }
            state.fpr.write(d.rd, box_f16(bits));
            accrue(state, flags);
        }
        _ => return Err(illegal(state, d)),
    }
    Ok(())
}

/// FMADD/FMSUB/FNMSUB/FNMADD; the format field sits in the low funct7 bits.
pub fn execute_fma(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    let format = d.funct7 & 3;
    if !fmt_enabled(state, format) {
        return Err(illegal(state, d));
    }
    let _ = resolve_rm(state, d)?;
    // Sign adjustments per variant: (negate product, negate addend).
    let (neg_prod, neg_add) = match d.opcode {
        rv64f::OP_FMADD => (false, false),
        rv64f::OP_FMSUB => (false, true),
        rv64f::OP_FNMSUB => (true, false),
        _ => (true, true),
    };
    let (bits, flags) = match format {
        fmt::S => {
            let mut a = f32_op(state, d.rs1);
            let b = f32_op(state, d.rs2);
            let mut c = f32_op(state, d.rs3);
            if neg_prod {
                a = -a;
            }
            if neg_add {
                c = -c;
            }
            let (r, f) = fpu::fma_f32(a, b, c);
            (box_f32(r), f)
        }
        fmt::D => {
            let mut a = f64_op(state, d.rs1);
            let b = f64_op(state, d.rs2);
            let mut c = f64_op(state, d.rs3);
            if neg_prod {
                a = -a;
            }
            if neg_add {
                c = -c;
            }
            fpu::fma_f64(a, b, c)
        }
        _ => {
            let mut a = f16_op(state, d.rs1);
            let b = f16_op(state, d.rs2);
            let mut c = f16_op(state, d.rs3);
            if neg_prod {
                a ^= 0x8000;
            }
            if neg_add {
                c ^= 0x8000;
            }
            let (r, f) = fpu::fma_f16(a, b, c);
            (box_f16(r), f)
        }
    };
    state.fpr.write(d.rd, bits);
    accrue(state, flags);
    Ok(None)
}

const fn classify_fields(sign: bool, exp_zero: bool, exp_ones: bool, man_zero: bool, quiet: bool) -> u64 {
    if exp_ones {
        if man_zero {
            if sign { 1 << 0 } else { 1 << 7 }
        } else if quiet {
            1 << 9
        } else {
            1 << 8
        }
    } else if exp_zero {
        if man_zero {
            if sign { 1 << 3 } else { 1 << 4 }
        } else if sign {
            1 << 2
        } else {
            1 << 5
        }
    } else if sign {
        1 << 1
    } else {
        1 << 6
    }
}

fn classify_f32(bits: u32) -> u64 {
    let exp = (bits >> 23) & 0xFF;
    classify_fields(
        bits >> 31 == 1,
        exp == 0,
        exp == 0xFF,
        bits & 0x007F_FFFF == 0,
        bits & 0x0040_0000 != 0,
    )
}

fn classify_f64(bits: u64) -> u64 {
    let exp = (bits >> 52) & 0x7FF;
    classify_fields(
        bits >> 63 == 1,
        exp == 0,
        exp == 0x7FF,
        bits & 0x000F_FFFF_FFFF_FFFF == 0,
        bits & 0x0008_0000_0000_0000 != 0,
    )
}

fn classify_f16(bits: u16) -> u64 {
    let exp = (bits >> 10) & 0x1F;
    classify_fields(
        bits >> 15 == 1,
        exp == 0,
        exp == 0x1F,
        bits & 0x03FF == 0,
        bits & 0x0200 != 0,
    )
}
