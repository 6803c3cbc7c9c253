//! Floating-point support.
//!
//! The executor evaluates F/D arithmetic with native IEEE 754 binary32/64
//! operations (round-to-nearest-even) and derives the accrued exception
//! flags analytically:
//!
//! - **NV**: a signaling-NaN operand, or an invalid operation (a NaN result
//!   from non-NaN operands: `inf - inf`, `0 × inf`, `0/0`, `sqrt` of a
//!   negative).
//! - **DZ**: finite nonzero dividend over a zero divisor.
//! - **NX/OF/UF**: for binary32, by comparing against the binary64
//!   evaluation of the same operation; for binary64, by a two-sum residual
//!   for addition and by exact mantissa comparison for multiply, divide, and
//!   square root (a `mul_add` residual can itself underflow to zero when the
//!   result is near the bottom of the exponent range and misreport exact).
//!
//! Half precision is evaluated in binary64 and narrowed once; binary64
//! carries more than 2·11+2 significand bits, so the double rounding is
//! innocuous for add/sub/mul/div/sqrt.
//!
//! Submodules:
//! - [`nan_handling`]: NaN boxing/unboxing and canonical NaN propagation.
//! - [`rounding_modes`]: Rounding mode decoding and application.
//! - [`exception_flags`]: The `fcsr.fflags` flag set.
//! - [`half`]: binary16 widening and correctly rounded narrowing.

/// binary16 conversions.
pub mod half;

/// NaN boxing, unboxing, and canonical NaN propagation.
pub mod nan_handling;

/// Rounding mode definitions and application.
pub mod rounding_modes;

/// Floating-point exception flag types.
pub mod exception_flags;

use self::exception_flags::FpFlags;
use self::half::{f16_to_f64, f64_to_f16};
use self::nan_handling::{
    CANONICAL_NAN_F16, CANONICAL_NAN_F32, CANONICAL_NAN_F64, is_snan_f16, is_snan_f32, is_snan_f64,
};
use self::rounding_modes::RoundingMode;

/// Arithmetic operation selector shared by the three precisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

/// Floating-point comparison selector (funct3 of FEQ/FLT/FLE).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpCmp {
    /// Quiet equality.
    Eq,
    /// Signaling less-than.
    Lt,
    /// Signaling less-or-equal.
    Le,
}

/// OF/UF/NX for a binary32 result, judged against the binary64 evaluation.
pub(crate) fn nx_flags_f32(result: f32, wide: f64) -> FpFlags {
    let mut flags = FpFlags::NONE;
    if result.is_nan() {
        return flags;
    }
    if result.is_infinite() && wide.is_finite() {
        return FpFlags::OF | FpFlags::NX;
    }
    if f64::from(result) != wide {
        flags = flags | FpFlags::NX;
        if result == 0.0 || result.is_subnormal() {
            flags = flags | FpFlags::UF;
        }
    }
    flags
}

fn invalid_f32(a: f32, b: f32, result: f32) -> bool {
    is_snan_f32(a.to_bits()) || is_snan_f32(b.to_bits()) || (result.is_nan() && !a.is_nan() && !b.is_nan())
}

fn invalid_f64(a: f64, b: f64, result: f64) -> bool {
    is_snan_f64(a.to_bits()) || is_snan_f64(b.to_bits()) || (result.is_nan() && !a.is_nan() && !b.is_nan())
}

/// Splits a finite double into its integer mantissa and base-2 exponent so
/// that `|x| == m * 2^e` exactly. Zero decomposes to `(0, -1074)`.
fn decompose(x: f64) -> (u64, i32) {
    let bits = x.to_bits() & 0x7FFF_FFFF_FFFF_FFFF;
    let exp = (bits >> 52) as i32;
    let frac = bits & 0x000F_FFFF_FFFF_FFFF;
    if exp == 0 { (frac, -1074) } else { (frac | (1 << 52), exp - 1075) }
}

/// True when `|x * y| == |z|` exactly, for finite operands.
///
/// Works on integer mantissas, so it stays correct where a floating residual
/// would underflow (products reaching below the subnormal range).
fn product_is_exact(x: f64, y: f64, z: f64) -> bool {
    let (mx, ex) = decompose(x);
    let (my, ey) = decompose(y);
    let (mz, ez) = decompose(z);
    let p = u128::from(mx) * u128::from(my);
    let m = u128::from(mz);
    if p == 0 {
        return m == 0;
    }
    let d = ex + ey - ez;
    if d >= 0 {
        if d > p.leading_zeros() as i32 {
            return false;
        }
        p << d == m
    } else {
        let s = (-d) as u32;
        if s >= 128 || p & ((1u128 << s) - 1) != 0 {
            return false;
        }
        p >> s == m
    }
}

/// Evaluates `a op b` in binary32, returning the canonicalized result bits
/// and the raised exception flags.
pub fn arith_f32(op: FpOp, a: f32, b: f32) -> (u32, FpFlags) {
    let wide = match op {
        FpOp::Add => f64::from(a) + f64::from(b),
        FpOp::Sub => f64::from(a) - f64::from(b),
        FpOp::Mul => f64::from(a) * f64::from(b),
        FpOp::Div => f64::from(a) / f64::from(b),
    };
    let result = match op {
        FpOp::Add => a + b,
        FpOp::Sub => a - b,
        FpOp::Mul => a * b,
        FpOp::Div => a / b,
    };
    let mut flags = nx_flags_f32(result, wide);
    if invalid_f32(a, b, result) {
        flags = flags | FpFlags::NV;
    }
    if op == FpOp::Div && b == 0.0 && a != 0.0 && a.is_finite() {
        flags = flags | FpFlags::DZ;
    }
    let bits = if result.is_nan() {
        CANONICAL_NAN_F32
    } else {
        result.to_bits()
    };
    (bits, flags)
}

/// Evaluates `a op b` in binary64, returning the canonicalized result bits
/// and the raised exception flags.
pub fn arith_f64(op: FpOp, a: f64, b: f64) -> (u64, FpFlags) {
    let result = match op {
        FpOp::Add => a + b,
        FpOp::Sub => a - b,
        FpOp::Mul => a * b,
        FpOp::Div => a / b,
    };
    let mut flags = FpFlags::NONE;
    if invalid_f64(a, b, result) {
        flags = flags | FpFlags::NV;
    }
    if op == FpOp::Div && b == 0.0 && a != 0.0 && a.is_finite() {
        flags = flags | FpFlags::DZ;
    }
    if result.is_infinite() && a.is_finite() && b.is_finite() && !(op == FpOp::Div && b == 0.0) {
        flags = flags | FpFlags::OF | FpFlags::NX;
    } else if result.is_finite() {
        let inexact = match op {
            FpOp::Add => {
                let bb = result - a;
                (a - (result - bb)) + (b - bb) != 0.0
            }
            FpOp::Sub => {
                let nb = -b;
                let bb = result - a;
                (a - (result - bb)) + (nb - bb) != 0.0
            }
            FpOp::Mul => a != 0.0 && b != 0.0 && !product_is_exact(a, b, result),
            FpOp::Div => a != 0.0 && b.is_finite() && !product_is_exact(result, b, a),
        };
        if inexact {
            flags = flags | FpFlags::NX;
            if result == 0.0 || result.is_subnormal() {
                flags = flags | FpFlags::UF;
            }
        }
    }
    let bits = if result.is_nan() {
        CANONICAL_NAN_F64
    } else {
        result.to_bits()
    };
    (bits, flags)
}

/// Evaluates `a op b` in binary16, returning the result bits and flags.
pub fn arith_f16(op: FpOp, a: u16, b: u16) -> (u16, FpFlags) {
    let wa = f16_to_f64(a);
    let wb = f16_to_f64(b);
    let wide = match op {
        FpOp::Add => wa + wb,
        FpOp::Sub => wa - wb,
        FpOp::Mul => wa * wb,
        FpOp::Div => wa / wb,
    };
    if wide.is_nan() {
        let mut flags = FpFlags::NONE;
        if is_snan_f16(a) || is_snan_f16(b) || (!wa.is_nan() && !wb.is_nan()) {
            flags = flags | FpFlags::NV;
        }
        return (CANONICAL_NAN_F16, flags);
    }
    let (bits, mut flags) = f64_to_f16(wide);
    if is_snan_f16(a) || is_snan_f16(b) {
        flags = flags | FpFlags::NV;
    }
    if op == FpOp::Div && wb == 0.0 && wa != 0.0 && wa.is_finite() {
        flags = flags | FpFlags::DZ;
    }
    (bits, flags)
}

/// Square root in binary32.
pub fn sqrt_f32(a: f32) -> (u32, FpFlags) {
    let result = a.sqrt();
    let mut flags = nx_flags_f32(result, f64::from(a).sqrt());
    if is_snan_f32(a.to_bits()) || (result.is_nan() && !a.is_nan()) {
        flags = flags | FpFlags::NV;
    }
    let bits = if result.is_nan() {
        CANONICAL_NAN_F32
    } else {
        result.to_bits()
    };
    (bits, flags)
}

/// Square root in binary64.
pub fn sqrt_f64(a: f64) -> (u64, FpFlags) {
    let result = a.sqrt();
    let mut flags = FpFlags::NONE;
    if is_snan_f64(a.to_bits()) || (result.is_nan() && !a.is_nan()) {
        flags = flags | FpFlags::NV;
    }
    if result.is_finite() && result != 0.0 && !product_is_exact(result, result, a) {
        flags = flags | FpFlags::NX;
    }
    let bits = if result.is_nan() {
        CANONICAL_NAN_F64
    } else {
        result.to_bits()
    };
    (bits, flags)
}

/// Square root in binary16.
pub fn sqrt_f16(a: u16) -> (u16, FpFlags) {
    let wa = f16_to_f64(a);
    let wide = wa.sqrt();
    if wide.is_nan() {
        let nv = is_snan_f16(a) || !wa.is_nan();
        let flags = if nv { FpFlags::NV } else { FpFlags::NONE };
        return (CANONICAL_NAN_F16, flags);
    }
    let (bits, mut flags) = f64_to_f16(wide);
    if is_snan_f16(a) {
        flags = flags | FpFlags::NV;
    }
    (bits, flags)
}

/// Fused multiply-add in binary32: `a * b + c` with a single rounding.
pub fn fma_f32(a: f32, b: f32, c: f32) -> (u32, FpFlags) {
    let result = a.mul_add(b, c);
    // Exact in binary64: the 48-bit product and the 24-bit addend both fit.
    let wide = f64::from(a).mul_add(f64::from(b), f64::from(c));
    let mut flags = nx_flags_f32(result, wide);
    let snan = is_snan_f32(a.to_bits()) || is_snan_f32(b.to_bits()) || is_snan_f32(c.to_bits());
    if snan || (result.is_nan() && !a.is_nan() && !b.is_nan() && !c.is_nan()) {
        flags = flags | FpFlags::NV;
    }
    let bits = if result.is_nan() {
        CANONICAL_NAN_F32
    } else {
        result.to_bits()
    };
    (bits, flags)
}

/// Fused multiply-add in binary64: `a * b + c` with a single rounding.
pub fn fma_f64(a: f64, b: f64, c: f64) -> (u64, FpFlags) {
    let result = a.mul_add(b, c);
    let mut flags = FpFlags::NONE;
    let snan = is_snan_f64(a.to_bits()) || is_snan_f64(b.to_bits()) || is_snan_f64(c.to_bits());
    if snan || (result.is_nan() && !a.is_nan() && !b.is_nan() && !c.is_nan()) {
        flags = flags | FpFlags::NV;
    }
    if result.is_infinite() && a.is_finite() && b.is_finite() && c.is_finite() {
        flags = flags | FpFlags::OF | FpFlags::NX;
    } else if result.is_finite() {
        // Error-free transform of the product, then a two-sum against the
        // addend. Reports inexact when any residual term survives.
        let p = a * b;
        let e1 = a.mul_add(b, -p);
        let s = p + c;
        let bb = s - p;
        let e2 = (p - (s - bb)) + (c - bb);
        if e1 != 0.0 || e2 != 0.0 || s != result {
            flags = flags | FpFlags::NX;
            if result == 0.0 || result.is_subnormal() {
                flags = flags | FpFlags::UF;
            }
        }
    }
    let bits = if result.is_nan() {
        CANONICAL_NAN_F64
    } else {
        result.to_bits()
    };
    (bits, flags)
}

/// Fused multiply-add in binary16: `a * b + c` with a single rounding.
pub fn fma_f16(a: u16, b: u16, c: u16) -> (u16, FpFlags) {
    let wa = f16_to_f64(a);
    let wb = f16_to_f64(b);
    let wc = f16_to_f64(c);
    // The 22-bit product is exact in binary64; the following add rounds once
    // in 53 bits before the final narrowing, which is innocuous at 2p+2.
    let wide = wa.mul_add(wb, wc);
    if wide.is_nan() {
        let snan = is_snan_f16(a) || is_snan_f16(b) || is_snan_f16(c);
        let nv = snan || (!wa.is_nan() && !wb.is_nan() && !wc.is_nan());
        let flags = if nv { FpFlags::NV } else { FpFlags::NONE };
        return (CANONICAL_NAN_F16, flags);
    }
    let (bits, mut flags) = f64_to_f16(wide);
    if is_snan_f16(a) || is_snan_f16(b) || is_snan_f16(c) {
        flags = flags | FpFlags::NV;
    }
    (bits, flags)
}

/// Compares two binary64 values per the RISC-V quiet/signaling rules.
///
/// FLT/FLE signal NV on any NaN operand; FEQ signals only on signaling NaNs.
/// Any comparison with a NaN operand yields false.
pub fn compare_f64(cmp: FpCmp, a: f64, b: f64) -> (bool, FpFlags) {
    let any_nan = a.is_nan() || b.is_nan();
    let snan = is_snan_f64(a.to_bits()) || is_snan_f64(b.to_bits());
    let nv = match cmp {
        FpCmp::Eq => snan,
        FpCmp::Lt | FpCmp::Le => any_nan,
    };
    let result = !any_nan
        && match cmp {
            FpCmp::Eq => a == b,
            FpCmp::Lt => a < b,
            FpCmp::Le => a <= b,
        };
    (result, if nv { FpFlags::NV } else { FpFlags::NONE })
}

/// Compares two binary32 values per the RISC-V quiet/signaling rules.
pub fn compare_f32(cmp: FpCmp, a: f32, b: f32) -> (bool, FpFlags) {
    let any_nan = a.is_nan() || b.is_nan();
    let snan = is_snan_f32(a.to_bits()) || is_snan_f32(b.to_bits());
    let nv = match cmp {
        FpCmp::Eq => snan,
        FpCmp::Lt | FpCmp::Le => any_nan,
    };
    let result = !any_nan
        && match cmp {
            FpCmp::Eq => a == b,
            FpCmp::Lt => a < b,
            FpCmp::Le => a <= b,
        };
    (result, if nv { FpFlags::NV } else { FpFlags::NONE })
}

/// Compares two binary16 values per the RISC-V quiet/signaling rules.
pub fn compare_f16(cmp: FpCmp, a: u16, b: u16) -> (bool, FpFlags) {
    let wa = f16_to_f64(a);
    let wb = f16_to_f64(b);
    let any_nan = wa.is_nan() || wb.is_nan();
    let snan = is_snan_f16(a) || is_snan_f16(b);
    let nv = match cmp {
        FpCmp::Eq => snan,
        FpCmp::Lt | FpCmp::Le => any_nan,
    };
    let result = !any_nan
        && match cmp {
            FpCmp::Eq => wa == wb,
            FpCmp::Lt => wa < wb,
            FpCmp::Le => wa <= wb,
        };
    (result, if nv { FpFlags::NV } else { FpFlags::NONE })
}

/// Converts a binary64 value to a signed/unsigned integer of `bits` width
/// under the given rounding mode, with RISC-V saturation semantics.
///
/// Returns the (sign-extended, for 32-bit targets) register value and flags.
pub fn f64_to_int(v: f64, rm: RoundingMode, bits: u32, signed: bool) -> (u64, FpFlags) {
    let (min, max): (f64, f64) = match (bits, signed) {
        (32, true) => (-2_147_483_648.0, 2_147_483_647.0),
        (32, false) => (0.0, 4_294_967_295.0),
        (64, true) => (-9_223_372_036_854_775_808.0, 9_223_372_036_854_775_807.0),
        _ => (0.0, 18_446_744_073_709_551_615.0),
    };

    if v.is_nan() {
        let val = saturate(false, bits, signed);
        return (val, FpFlags::NV);
    }
    let rounded = rm.round(v);
    // The max bound is itself rounded in f64 for the 64-bit targets; testing
    // against 2^63 / 2^64 directly avoids accepting out-of-range values.
    let out_of_range = match (bits, signed) {
        (32, _) => rounded < min || rounded > max,
        (64, true) => rounded < -9_223_372_036_854_775_808.0 || rounded >= 9_223_372_036_854_775_808.0,
        _ => rounded <= -1.0 || rounded >= 18_446_744_073_709_551_616.0,
    };
    if out_of_range {
        return (saturate(rounded < 0.0, bits, signed), FpFlags::NV);
    }
    let val = if signed {
        let i = rounded as i64;
        if bits == 32 { i as i32 as i64 as u64 } else { i as u64 }
    } else {
        let u = rounded as u64;
        if bits == 32 { u as u32 as i32 as i64 as u64 } else { u }
    };
    let flags = if rounded == v { FpFlags::NONE } else { FpFlags::NX };
    (val, flags)
}

/// Saturated register value for an out-of-range conversion; `low` selects
/// the negative-side bound.
fn saturate(low: bool, bits: u32, signed: bool) -> u64 {
    match (bits, signed) {
        (32, true) => {
            if low { 0xFFFF_FFFF_8000_0000 } else { 0x7FFF_FFFF }
        }
        (32, false) => {
            if low { 0 } else { 0xFFFF_FFFF_FFFF_FFFF }
        }
        (64, true) => {
            if low { 0x8000_0000_0000_0000 } else { 0x7FFF_FFFF_FFFF_FFFF }
        }
        _ => {
            if low { 0 } else { u64::MAX }
        }
    }
}

/// Converts a signed 64-bit integer to binary64, reporting inexactness.
pub fn i64_to_f64(x: i64) -> (f64, FpFlags) {
    let r = x as f64;
    let flags = if r as i128 == i128::from(x) { FpFlags::NONE } else { FpFlags::NX };
    (r, flags)
}

/// Converts an unsigned 64-bit integer to binary64, reporting inexactness.
pub fn u64_to_f64(x: u64) -> (f64, FpFlags) {
    let r = x as f64;
    let flags = if r as u128 == u128::from(x) { FpFlags::NONE } else { FpFlags::NX };
    (r, flags)
}

/// Converts a signed 64-bit integer to binary32, reporting inexactness.
pub fn i64_to_f32(x: i64) -> (f32, FpFlags) {
    let r = x as f32;
    let flags = if r as i128 == i128::from(x) { FpFlags::NONE } else { FpFlags::NX };
    (r, flags)
}

/// Converts an unsigned 64-bit integer to binary32, reporting inexactness.
pub fn u64_to_f32(x: u64) -> (f32, FpFlags) {
    let r = x as f32;
    let flags = if r as u128 == u128::from(x) { FpFlags::NONE } else { FpFlags::NX };
    (r, flags)
}
