//! NaN boxing, unboxing, and canonical NaN propagation.
//!
//! RISC-V requires narrower floating-point values held in wider registers to
//! be NaN-boxed: the unused upper bits must be all ones, and a value that is
//! not correctly boxed must be treated as the canonical quiet NaN. All NaN
//! results of arithmetic are replaced with the canonical quiet NaN of the
//! result format.

/// Canonical quiet NaN for binary32.
pub const CANONICAL_NAN_F32: u32 = 0x7FC0_0000;

/// Canonical quiet NaN for binary64.
pub const CANONICAL_NAN_F64: u64 = 0x7FF8_0000_0000_0000;

/// Canonical quiet NaN for binary16.
pub const CANONICAL_NAN_F16: u16 = 0x7E00;

/// Upper-bit mask that must be all ones for a boxed binary32 value.
pub const NAN_BOX_MASK_F32: u64 = 0xFFFF_FFFF_0000_0000;

/// Upper-bit mask that must be all ones for a boxed binary16 value.
pub const NAN_BOX_MASK_F16: u64 = 0xFFFF_FFFF_FFFF_0000;

/// Boxes binary32 bits into a 64-bit register value.
#[inline(always)]
pub const fn box_f32(bits: u32) -> u64 {
    NAN_BOX_MASK_F32 | bits as u64
}

/// Unboxes a binary32 value from a 64-bit register value.
///
/// A register value whose upper half is not all ones is not a valid boxed
/// binary32 and reads as the canonical NaN.
#[inline(always)]
pub const fn unbox_f32(reg: u64) -> u32 {
    if reg & NAN_BOX_MASK_F32 == NAN_BOX_MASK_F32 {
        reg as u32
    } else {
        CANONICAL_NAN_F32
    }
}

/// Boxes binary16 bits into a 64-bit register value.
#[inline(always)]
pub const fn box_f16(bits: u16) -> u64 {
    NAN_BOX_MASK_F16 | bits as u64
}

/// Unboxes a binary16 value from a 64-bit register value.
#[inline(always)]
pub const fn unbox_f16(reg: u64) -> u16 {
    if reg & NAN_BOX_MASK_F16 == NAN_BOX_MASK_F16 {
        reg as u16
    } else {
        CANONICAL_NAN_F16
    }
}

/// True if `bits` encode a signaling NaN in binary32 (NaN with a clear quiet
/// bit).
#[inline(always)]
pub const fn is_snan_f32(bits: u32) -> bool {
    let exp_all_ones = bits & 0x7F80_0000 == 0x7F80_0000;
    let mantissa = bits & 0x007F_FFFF;
    exp_all_ones && mantissa != 0 && bits & 0x0040_0000 == 0
}

/// True if `bits` encode a signaling NaN in binary64.
#[inline(always)]
pub const fn is_snan_f64(bits: u64) -> bool {
    let exp_all_ones = bits & 0x7FF0_0000_0000_0000 == 0x7FF0_0000_0000_0000;
    let mantissa = bits & 0x000F_FFFF_FFFF_FFFF;
    exp_all_ones && mantissa != 0 && bits & 0x0008_0000_0000_0000 == 0
}

/// True if `bits` encode a signaling NaN in binary16.
#[inline(always)]
pub const fn is_snan_f16(bits: u16) -> bool {
    let exp_all_ones = bits & 0x7C00 == 0x7C00;
    let mantissa = bits & 0x03FF;
    exp_all_ones && mantissa != 0 && bits & 0x0200 == 0
}

/// RISC-V FMIN/FMAX selection on binary64 values.
///
/// Both-NaN inputs yield the canonical NaN; a single NaN yields the other
/// operand; `-0.0` orders below `+0.0`.
pub fn min_f64(a: f64, b: f64) -> u64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => CANONICAL_NAN_F64,
        (true, false) => b.to_bits(),
        (false, true) => a.to_bits(),
        (false, false) => {
            if a == 0.0 && b == 0.0 {
                // Distinguish -0.0 from +0.0 by sign bit.
                a.to_bits() | b.to_bits()
            } else if a < b {
                a.to_bits()
            } else {
                b.to_bits()
            }
        }
    }
}

/// RISC-V FMIN/FMAX selection on binary64 values (maximum).
pub fn max_f64(a: f64, b: f64) -> u64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => CANONICAL_NAN_F64,
        (true, false) => b.to_bits(),
        (false, true) => a.to_bits(),
        (false, false) => {
            if a == 0.0 && b == 0.0 {
                a.to_bits() & b.to_bits()
            } else if a > b {
                a.to_bits()
            } else {
                b.to_bits()
            }
        }
    }
}

/// RISC-V FMIN selection on binary32 values.
pub fn min_f32(a: f32, b: f32) -> u32 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => CANONICAL_NAN_F32,
        (true, false) => b.to_bits(),
        (false, true) => a.to_bits(),
        (false, false) => {
            if a == 0.0 && b == 0.0 {
                a.to_bits() | b.to_bits()
            } else if a < b {
                a.to_bits()
            } else {
                b.to_bits()
            }
        }
    }
}

/// RISC-V FMAX selection on binary32 values.
pub fn max_f32(a: f32, b: f32) -> u32 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => CANONICAL_NAN_F32,
        (true, false) => b.to_bits(),
        (false, true) => a.to_bits(),
        (false, false) => {
            if a == 0.0 && b == 0.0 {
                a.to_bits() & b.to_bits()
            } else if a > b {
                a.to_bits()
            } else {
                b.to_bits()
            }
        }
    }
}
