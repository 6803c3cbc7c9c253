//! Direct tests of the FPU evaluation helpers: flag derivation, NaN
//! canonicalization, saturating integer conversions, and min/max selection.

use rstest::rstest;
use rvrun_core::core::fpu::{
    self, FpCmp, FpOp,
    exception_flags::FpFlags,
    nan_handling::{self, CANONICAL_NAN_F32, CANONICAL_NAN_F64, box_f32, unbox_f32},
    rounding_modes::RoundingMode,
};

#[test]
fn test_exact_arithmetic_raises_nothing() {
    let (bits, flags) = fpu::arith_f32(FpOp::Add, 1.5, 2.25);
    assert_eq!(bits, 3.75f32.to_bits());
    assert!(flags.is_empty());

    let (bits, flags) = fpu::arith_f64(FpOp::Mul, 3.0, 0.5);
    assert_eq!(bits, 1.5f64.to_bits());
    assert!(flags.is_empty());
}

#[test]
fn test_inexact_raises_nx() {
    // 1/3 is inexact in any binary format.
    let (_, flags) = fpu::arith_f32(FpOp::Div, 1.0, 3.0);
    assert!(flags.contains(FpFlags::NX));
    assert!(!flags.contains(FpFlags::DZ));

    let (_, flags) = fpu::arith_f64(FpOp::Div, 1.0, 3.0);
    assert!(flags.contains(FpFlags::NX));
}

#[test]
fn test_overflow_raises_of_and_nx() {
    let (bits, flags) = fpu::arith_f32(FpOp::Mul, f32::MAX, 2.0);
    assert_eq!(bits, f32::INFINITY.to_bits());
    assert!(flags.contains(FpFlags::OF | FpFlags::NX));

    let (bits, flags) = fpu::arith_f64(FpOp::Add, f64::MAX, f64::MAX);
    assert_eq!(bits, f64::INFINITY.to_bits());
    assert!(flags.contains(FpFlags::OF | FpFlags::NX));
}

#[test]
fn test_underflow_raises_uf() {
    let (_, flags) = fpu::arith_f32(FpOp::Mul, f32::MIN_POSITIVE, 0.1);
    assert!(flags.contains(FpFlags::UF | FpFlags::NX));

    let (_, flags) = fpu::arith_f64(FpOp::Mul, f64::MIN_POSITIVE, 0.1);
    assert!(flags.contains(FpFlags::UF | FpFlags::NX));
}

#[test]
fn test_divide_by_zero() {
    let (bits, flags) = fpu::arith_f32(FpOp::Div, 1.0, 0.0);
    assert_eq!(bits, f32::INFINITY.to_bits());
    assert!(flags.contains(FpFlags::DZ));

    // 0/0 is invalid, not divide-by-zero, and yields the canonical NaN.
    let (bits, flags) = fpu::arith_f32(FpOp::Div, 0.0, 0.0);
    assert_eq!(bits, CANONICAL_NAN_F32);
    assert!(flags.contains(FpFlags::NV));
    assert!(!flags.contains(FpFlags::DZ));
}

#[test]
fn test_invalid_operations() {
    let (bits, flags) = fpu::arith_f64(FpOp::Sub, f64::INFINITY, f64::INFINITY);
    assert_eq!(bits, CANONICAL_NAN_F64);
    assert!(flags.contains(FpFlags::NV));

    let (bits, flags) = fpu::arith_f64(FpOp::Mul, 0.0, f64::INFINITY);
    assert_eq!(bits, CANONICAL_NAN_F64);
    assert!(flags.contains(FpFlags::NV));

    let (bits, flags) = fpu::sqrt_f64(-1.0);
    assert_eq!(bits, CANONICAL_NAN_F64);
    assert!(flags.contains(FpFlags::NV));
}

#[test]
fn test_snan_operand_signals() {
    let snan = f32::from_bits(0x7F80_0001);
    let (bits, flags) = fpu::arith_f32(FpOp::Add, snan, 1.0);
    assert_eq!(bits, CANONICAL_NAN_F32);
    assert!(flags.contains(FpFlags::NV));
}

#[test]
fn test_sqrt_exact_and_inexact() {
    let (bits, flags) = fpu::sqrt_f64(4.0);
    assert_eq!(bits, 2.0f64.to_bits());
    assert!(flags.is_empty());

    let (_, flags) = fpu::sqrt_f64(2.0);
    assert!(flags.contains(FpFlags::NX));
}

#[test]
fn test_fma_rounds_once() {
    // With separate rounding, MAX * 2 would overflow before the subtraction
    // pulls the result back into range; fused evaluation must not.
    let (bits, flags) = fpu::fma_f64(f64::MAX, 2.0, -f64::MAX);
    assert_eq!(bits, f64::MAX.to_bits());
    assert!(!flags.contains(FpFlags::OF));
}

#[rstest]
#[case(RoundingMode::Rne, 2.5, 2)]
#[case(RoundingMode::Rne, 3.5, 4)]
#[case(RoundingMode::Rtz, 2.7, 2)]
#[case(RoundingMode::Rtz, -2.7, -2)]
#[case(RoundingMode::Rdn, -2.5, -3)]
#[case(RoundingMode::Rup, 2.1, 3)]
#[case(RoundingMode::Rmm, 2.5, 3)]
fn test_f64_to_int_rounding(#[case] rm: RoundingMode, #[case] v: f64, #[case] expected: i64) {
    let (val, flags) = fpu::f64_to_int(v, rm, 32, true);
    assert_eq!(val, expected as u64);
    assert!(flags.contains(FpFlags::NX));
}

#[test]
fn test_f64_to_int_saturation() {
    let (val, flags) = fpu::f64_to_int(1e12, RoundingMode::Rtz, 32, true);
    assert_eq!(val, 0x7FFF_FFFF);
    assert_eq!(flags, FpFlags::NV);

    let (val, _) = fpu::f64_to_int(-1e12, RoundingMode::Rtz, 32, true);
    assert_eq!(val, 0xFFFF_FFFF_8000_0000);

    let (val, flags) = fpu::f64_to_int(-1.0, RoundingMode::Rtz, 32, false);
    assert_eq!(val, 0);
    assert_eq!(flags, FpFlags::NV);

    let (val, flags) = fpu::f64_to_int(f64::NAN, RoundingMode::Rne, 64, true);
    assert_eq!(val, 0x7FFF_FFFF_FFFF_FFFF);
    assert_eq!(flags, FpFlags::NV);
}

#[test]
fn test_f64_to_int_unsigned_64_boundary() {
    // 2^64 is out of range for LU; just under it is representable.
    let (val, flags) = fpu::f64_to_int(18_446_744_073_709_551_616.0, RoundingMode::Rtz, 64, false);
    assert_eq!(val, u64::MAX);
    assert_eq!(flags, FpFlags::NV);

    let (val, flags) = fpu::f64_to_int(2.0_f64.powi(63), RoundingMode::Rtz, 64, false);
    assert_eq!(val, 1 << 63);
    assert!(flags.is_empty());
}

#[test]
fn test_int_to_float_inexact() {
    // 2^53 + 1 is not representable in binary64.
    let (r, flags) = fpu::i64_to_f64((1i64 << 53) + 1);
    assert_eq!(r.to_bits(), 2.0_f64.powi(53).to_bits());
    assert_eq!(flags, FpFlags::NX);

    let (_, flags) = fpu::u64_to_f32(u64::MAX);
    assert_eq!(flags, FpFlags::NX);

    let (r, flags) = fpu::i64_to_f32(16);
    assert_eq!(r.to_bits(), 16.0f32.to_bits());
    assert!(flags.is_empty());
}

#[test]
fn test_unbox_rejects_bad_upper_half() {
    assert_eq!(unbox_f32(box_f32(0x4040_0000)), 0x4040_0000);
    // Anything but all-ones upstairs reads as the canonical NaN.
    assert_eq!(unbox_f32(0x0000_0001_4040_0000), CANONICAL_NAN_F32);
    assert_eq!(unbox_f32(1.5f64.to_bits()), CANONICAL_NAN_F32);
}

#[test]
fn test_min_max_zero_and_nan_selection() {
    assert_eq!(nan_handling::min_f32(-0.0, 0.0), (-0.0f32).to_bits());
    assert_eq!(nan_handling::max_f32(-0.0, 0.0), 0.0f32.to_bits());
    // A single NaN loses to the numeric operand.
    assert_eq!(nan_handling::min_f32(f32::NAN, 2.0), 2.0f32.to_bits());
    assert_eq!(nan_handling::max_f32(2.0, f32::NAN), 2.0f32.to_bits());
    // Two NaNs produce the canonical NaN.
    assert_eq!(nan_handling::min_f32(f32::NAN, f32::NAN), CANONICAL_NAN_F32);
    assert_eq!(
        nan_handling::min_f64(f64::NAN, f64::NAN),
        CANONICAL_NAN_F64
    );
}

#[test]
fn test_compare_nan_semantics() {
    let qnan = f64::NAN;
    let (r, flags) = fpu::compare_f64(FpCmp::Eq, qnan, qnan);
    assert!(!r);
    assert!(flags.is_empty()); // FEQ is quiet on qNaN

    let (r, flags) = fpu::compare_f64(FpCmp::Lt, qnan, 1.0);
    assert!(!r);
    assert_eq!(flags, FpFlags::NV);

    let snan = f64::from_bits(0x7FF0_0000_0000_0001);
    let (_, flags) = fpu::compare_f64(FpCmp::Eq, snan, 1.0);
    assert_eq!(flags, FpFlags::NV);

    let (r, flags) = fpu::compare_f64(FpCmp::Le, 1.0, 1.0);
    assert!(r);
    assert!(flags.is_empty());
}
