//! binary16 (half-precision) conversions.
//!
//! There is no native `f16` type, so Zfh arithmetic widens operands exactly
//! to binary64, evaluates there, and narrows once through this module.
//! Widening to binary32 is exact for every binary16 value; narrowing applies
//! round-to-nearest-even with the subnormal and overflow handling the format
//! requires.

use super::exception_flags::FpFlags;
use super::nan_handling::CANONICAL_NAN_F16;

/// Widens binary16 bits to binary32 (exact; NaNs become the canonical
/// binary32 NaN).
pub fn f16_to_f32(bits: u16) -> f32 {
    let sign = u32::from(bits & 0x8000) << 16;
    let exp = u32::from((bits >> 10) & 0x1F);
    let mant = u32::from(bits & 0x3FF);
    let out = match exp {
        0 => {
            if mant == 0 {
                sign
            } else {
                // Normalize the subnormal significand into binary32 range.
                let mut m = mant;
                let mut e = 113u32;
                while m & 0x400 == 0 {
                    m <<= 1;
                    e -= 1;
                }
                sign | (e << 23) | ((m & 0x3FF) << 13)
            }
        }
        0x1F => {
            if mant == 0 {
                sign | 0x7F80_0000
            } else {
                return f32::from_bits(0x7FC0_0000);
            }
        }
        _ => sign | ((exp + 112) << 23) | (mant << 13),
    };
    f32::from_bits(out)
}

/// Widens binary16 bits to binary64 (exact).
pub fn f16_to_f64(bits: u16) -> f64 {
    f64::from(f16_to_f32(bits))
}

/// Narrows a binary32 value to binary16 bits with round-to-nearest-even.
pub fn f32_to_f16_rne(val: f32) -> u16 {
    let bits = val.to_bits();
    let sign = ((bits >> 16) & 0x8000) as u16;
    let mag = bits & 0x7FFF_FFFF;

    if mag > 0x7F80_0000 {
        return CANONICAL_NAN_F16;
    }
    if mag >= 0x4780_0000 {
        // |x| >= 65536 (or infinity). Values in [65520, 65536) overflow to
        // infinity through the rounding carry below instead.
        return sign | 0x7C00;
    }
    if mag >= 0x3880_0000 {
        // Normal binary16 range: rebias the exponent by -112 and round the
        // 13 discarded mantissa bits.
        let unrounded = (mag - 0x3800_0000) >> 13;
        let round_bits = mag & 0x1FFF;
        let mut h = unrounded;
        if round_bits > 0x1000 || (round_bits == 0x1000 && h & 1 == 1) {
            h += 1;
        }
        return sign | h as u16;
    }
    if mag <= 0x3300_0000 {
        // |x| <= 2^-25 rounds to zero (the tie at exactly 2^-25 goes even).
        return sign;
    }

    // Subnormal result: shift the 24-bit significand down to units of 2^-24.
    let e = (mag >> 23) as i32 - 127;
    let sig = (mag & 0x7F_FFFF) | 0x80_0000;
    let shift = (-e - 1) as u32;
    let half = 1u32 << (shift - 1);
    let rem = sig & ((1 << shift) - 1);
    let mut q = sig >> shift;
    if rem > half || (rem == half && q & 1 == 1) {
        q += 1;
    }
    sign | q as u16
}

/// Narrows a binary64 value to binary16 bits, reporting OF/UF/NX.
///
/// The intermediate narrowing to binary32 keeps 24 significand bits, which
/// exceeds the 2·11+2 threshold, so the double rounding is innocuous.
pub fn f64_to_f16(v: f64) -> (u16, FpFlags) {
    if v.is_nan() {
        return (CANONICAL_NAN_F16, FpFlags::NONE);
    }
    let bits = f32_to_f16_rne(v as f32);
    let back = f16_to_f64(bits);
    if back == v {
        return (bits, FpFlags::NONE);
    }
    let mut flags = FpFlags::NX;
    if back.is_infinite() && v.is_finite() {
        flags = flags | FpFlags::OF;
    } else if bits & 0x7C00 == 0 {
        flags = flags | FpFlags::UF;
    }
    (bits, flags)
}
