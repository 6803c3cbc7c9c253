//! M-extension tests: the multiply-high family and the non-trapping
//! division sentinels.

use rstest::rstest;
use rvrun_core::config::{Config, ExtensionSet, Xlen};
use rvrun_core::core::state::HaltCause;
use rvrun_core::isa::rv64i::opcodes::{OP_IMM, OP_REG, OP_REG_32};
use rvrun_core::isa::rv64m::funct3;

use crate::common::encoding::*;
use crate::common::harness::{self, gpr};

const M: u32 = 1; // funct7 for the whole extension

#[test]
fn test_mul_low_bits() {
    let sim = harness::run(&[
        addi(5, 0, 7),
        addi(6, 0, -6),
        r_type(OP_REG, 7, funct3::MUL, 5, 6, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), (-42i64) as u64);
}

#[test]
fn test_mulh_variants_on_all_ones() {
    // x5 = x6 = -1 (all ones); the three high-multiply flavours disagree
    // on how they interpret the operands.
    let sim = harness::run(&[
        addi(5, 0, -1),
        addi(6, 0, -1),
        r_type(OP_REG, 7, funct3::MULH, 5, 6, M), // (-1)*(-1) = 1, high 0
        r_type(OP_REG, 28, funct3::MULHU, 5, 6, M),
        r_type(OP_REG, 29, funct3::MULHSU, 5, 6, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), 0);
    assert_eq!(gpr(&sim, 28), 0xFFFF_FFFF_FFFF_FFFE);
    assert_eq!(gpr(&sim, 29), u64::MAX); // -1 * UMAX, high word
}

#[test]
fn test_div_rem_truncate_toward_zero() {
    let sim = harness::run(&[
        addi(5, 0, 7),
        addi(6, 0, -2),
        r_type(OP_REG, 7, funct3::DIV, 5, 6, M),
        r_type(OP_REG, 28, funct3::REM, 5, 6, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), (-3i64) as u64);
    assert_eq!(gpr(&sim, 28), 1);
}

#[rstest]
#[case(funct3::DIV, u64::MAX)]
#[case(funct3::DIVU, u64::MAX)]
#[case(funct3::REM, 41)] // the dividend
#[case(funct3::REMU, 41)]
fn test_division_by_zero_sentinels(#[case] f3: u32, #[case] expected: u64) {
    let sim = harness::run(&[
        addi(5, 0, 41),
        r_type(OP_REG, 7, f3, 5, 0, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), expected);
}

#[test]
fn test_signed_overflow_sentinels() {
    // i64::MIN / -1 overflows; the quotient is the dividend, remainder 0.
    let sim = harness::run(&[
        addi(5, 0, 1),
        i_type(OP_IMM, 5, 0b001, 5, 63), // slli x5, x5, 63
        addi(6, 0, -1),
        r_type(OP_REG, 7, funct3::DIV, 5, 6, M),
        r_type(OP_REG, 28, funct3::REM, 5, 6, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), 1 << 63);
    assert_eq!(gpr(&sim, 28), 0);
}

#[test]
fn test_mulw_truncates_then_sign_extends() {
    let sim = harness::run(&[
        lui(5, 0x40000), // 0x4000_0000
        addi(6, 0, 2),
        r_type(OP_REG_32, 7, funct3::MUL, 5, 6, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn test_divw_overflow_sentinel() {
    // i32::MIN / -1 on the word form; the result is sign-extended.
    let sim = harness::run(&[
        lui(5, 0x80000),
        addi(6, 0, -1),
        r_type(OP_REG_32, 7, funct3::DIV, 5, 6, M),
        r_type(OP_REG_32, 28, funct3::REM, 5, 6, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), 0xFFFF_FFFF_8000_0000);
    assert_eq!(gpr(&sim, 28), 0);
}

#[test]
fn test_word_division_by_zero() {
    let sim = harness::run(&[
        lui(5, 0x80000), // dividend with bit 31 set
        r_type(OP_REG_32, 7, funct3::DIVU, 5, 0, M),
        r_type(OP_REG_32, 28, funct3::REMU, 5, 0, M),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), u64::MAX);
    // The remainder is the dividend, sign-extended from bit 31.
    assert_eq!(gpr(&sim, 28), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn test_rv32_multiplies_on_32_bit_slices() {
    let sim = harness::run_with(
        &[
            lui(5, 0x10), // 0x10000
            r_type(OP_REG, 6, funct3::MUL, 5, 5, M),
            r_type(OP_REG, 7, funct3::MULHU, 5, 5, M),
            ecall(),
        ],
        harness::rv32(),
    );
    // 0x10000^2 overflows 32 bits: low word 0, high word 1.
    assert_eq!(gpr(&sim, 6), 0);
    assert_eq!(gpr(&sim, 7), 1);
}

#[test]
fn test_mul_without_m_extension_is_illegal() {
    let ext = ExtensionSet {
        m: false,
        ..ExtensionSet::all()
    };
    let sim = harness::run_with(
        &[r_type(OP_REG, 7, funct3::MUL, 5, 6, M), ecall()],
        Config::new(Xlen::Rv64, ext),
    );
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::IllegalInstruction));
}
