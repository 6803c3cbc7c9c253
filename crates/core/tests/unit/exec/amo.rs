//! A-extension tests: LR/SC reservation rules and the AMO read-modify-write
//! family.

use rvrun_core::config::{Config, ExtensionSet, Xlen};
use rvrun_core::core::state::HaltCause;
use rvrun_core::isa::rv64a::funct5;

use crate::common::encoding::*;
use crate::common::harness::{self, TEXT_BASE, gpr};

const W: u32 = 0b010;
const D: u32 = 0b011;

#[test]
fn test_lr_sc_success() {
    let sim = harness::run(&[
        lui(10, 0x20),
        addi(5, 0, 7),
        sw(10, 5, 0),
        amo_type(funct5::LR, 6, W, 10, 0),
        addi(7, 0, 9),
        amo_type(funct5::SC, 28, W, 10, 7),
        lw(29, 10, 0),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 6), 7); // LR observed the stored value
    assert_eq!(gpr(&sim, 28), 0); // SC succeeded
    assert_eq!(gpr(&sim, 29), 9);
}

#[test]
fn test_sc_without_reservation_fails() {
    let sim = harness::run(&[
        lui(10, 0x20),
        addi(5, 0, 7),
        sw(10, 5, 0),
        amo_type(funct5::SC, 28, W, 10, 5),
        lw(29, 10, 0),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 28), 1);
    assert_eq!(gpr(&sim, 29), 7); // memory untouched
}

#[test]
fn test_store_between_lr_and_sc_breaks_reservation() {
    let sim = harness::run(&[
        lui(10, 0x20),
        sw(10, 0, 0),
        amo_type(funct5::LR, 6, W, 10, 0),
        sw(10, 0, 0), // plain store to the reserved address
        amo_type(funct5::SC, 28, W, 10, 5),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 28), 1);
}

#[test]
fn test_lr_w_sign_extends() {
    let sim = harness::run_with_data(
        &[lui(10, 0x20), amo_type(funct5::LR, 6, W, 10, 0), ecall()],
        &[0xFF, 0xFF, 0xFF, 0xFF],
    );
    assert_eq!(gpr(&sim, 6), u64::MAX);
}

#[test]
fn test_amoadd_w_returns_old_value_sign_extended() {
    let sim = harness::run_with_data(
        &[
            lui(10, 0x20),
            addi(5, 0, 1),
            amo_type(funct5::AMOADD, 6, W, 10, 5),
            lw(7, 10, 0),
            ecall(),
        ],
        &[0xFF, 0xFF, 0xFF, 0xFF],
    );
    assert_eq!(gpr(&sim, 6), u64::MAX); // old value, sign-extended
    assert_eq!(gpr(&sim, 7), 0); // 0xFFFF_FFFF + 1 wrapped
}

#[test]
fn test_amoswap_d() {
    let sim = harness::run(&[
        lui(10, 0x20),
        sd(10, 0, 0),
        addi(5, 0, -1),
        amo_type(funct5::AMOSWAP, 6, D, 10, 5),
        ld(7, 10, 0),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 6), 0);
    assert_eq!(gpr(&sim, 7), u64::MAX);
}

#[test]
fn test_amomax_signed_vs_unsigned() {
    // Memory holds 5; the operand is -1. Signed max keeps 5, unsigned max
    // takes the all-ones pattern.
    let sim = harness::run_with_data(
        &[
            lui(10, 0x20),
            addi(5, 0, -1),
            amo_type(funct5::AMOMAX, 6, W, 10, 5),
            amo_type(funct5::AMOMAXU, 7, W, 10, 5),
            lw(28, 10, 0),
            ecall(),
        ],
        &[5, 0, 0, 0],
    );
    assert_eq!(gpr(&sim, 6), 5);
    assert_eq!(gpr(&sim, 7), 5); // AMOMAX left memory unchanged
    assert_eq!(gpr(&sim, 28), u64::MAX);
}

#[test]
fn test_amomin_unsigned() {
    let sim = harness::run_with_data(
        &[
            lui(10, 0x20),
            addi(5, 0, 3),
            amo_type(funct5::AMOMINU, 6, W, 10, 5),
            lw(7, 10, 0),
            ecall(),
        ],
        &[0xFF, 0xFF, 0xFF, 0xFF],
    );
    assert_eq!(gpr(&sim, 6), u64::MAX);
    assert_eq!(gpr(&sim, 7), 3);
}

#[test]
fn test_misaligned_amo_faults() {
    let sim = harness::run(&[
        lui(10, 0x20),
        addi(10, 10, 2),
        amo_type(funct5::AMOADD, 6, W, 10, 0),
        ecall(),
    ]);
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::MemoryFault));
    assert_eq!(sim.state().pc(), TEXT_BASE + 8);
}

#[test]
fn test_lr_d_is_illegal_on_rv32() {
    let sim = harness::run_with(
        &[
            lui(10, 0x20),
            sw(10, 0, 0),
            amo_type(funct5::LR, 6, D, 10, 0),
            ecall(),
        ],
        harness::rv32(),
    );
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::IllegalInstruction));
}

#[test]
fn test_amo_without_a_extension_is_illegal() {
    let ext = ExtensionSet {
        a: false,
        ..ExtensionSet::all()
    };
    let sim = harness::run_with(
        &[
            lui(10, 0x20),
            amo_type(funct5::AMOADD, 6, W, 10, 0),
            ecall(),
        ],
        Config::new(Xlen::Rv64, ext),
    );
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::IllegalInstruction));
}

#[test]
fn test_unknown_funct5_is_illegal() {
    // funct5 0b11111 names no atomic operation.
    let sim = harness::run(&[
        lui(10, 0x20),
        sw(10, 0, 0),
        amo_type(0b11111, 6, W, 10, 0),
        ecall(),
    ]);
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::IllegalInstruction));
    // Memory is untouched by the rejected operation.
    assert_eq!(sim.state().memory().load_u32(0x2_0000).unwrap(), 0);
}
