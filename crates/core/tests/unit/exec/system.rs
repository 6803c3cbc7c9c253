//! SYSTEM instruction tests: CSR access forms, the fcsr wiring, EBREAK,
//! MRET, and WFI.

use rvrun_core::core::state::HaltCause;
use rvrun_core::isa::privileged::opcodes as sys;
use rvrun_core::sim::RunState;

use crate::common::encoding::*;
use crate::common::harness::{self, TEXT_BASE, gpr};

const MSCRATCH: u32 = 0x340;
const MEPC: u32 = 0x341;
const FFLAGS: u32 = 0x001;
const FRM: u32 = 0x002;
const FCSR: u32 = 0x003;

fn csrrc(rd: u32, csr: u32, rs1: u32) -> u32 {
    i_type(sys::OP_SYSTEM, rd, sys::CSRRC, rs1, csr as i32)
}

fn csr_imm(funct3: u32, rd: u32, csr: u32, uimm: u32) -> u32 {
    i_type(sys::OP_SYSTEM, rd, funct3, uimm, csr as i32)
}

#[test]
fn test_csrrw_swaps() {
    let sim = harness::run(&[
        addi(5, 0, 11),
        csrrw(6, MSCRATCH, 5), // old value (0) -> x6
        csrrw(7, MSCRATCH, 0), // old value (11) -> x7
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 6), 0);
    assert_eq!(gpr(&sim, 7), 11);
}

#[test]
fn test_csrrs_and_csrrc_mask_bits() {
    let sim = harness::run(&[
        addi(5, 0, 0b1100),
        csrrw(0, MSCRATCH, 5),
        addi(6, 0, 0b0110),
        csrrs(7, MSCRATCH, 6), // old 0b1100, now 0b1110
        csrrc(28, MSCRATCH, 6), // old 0b1110, now 0b1000
        csrrs(29, MSCRATCH, 0), // read back
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 7), 0b1100);
    assert_eq!(gpr(&sim, 28), 0b1110);
    assert_eq!(gpr(&sim, 29), 0b1000);
}

#[test]
fn test_csrrs_with_x0_does_not_write() {
    // A CSRRS with rs1=x0 must be a pure read even on a side-effecting CSR.
    let sim = harness::run(&[
        addi(5, 0, 7),
        csrrw(0, MSCRATCH, 5),
        csrrs(6, MSCRATCH, 0),
        csrrs(7, MSCRATCH, 0),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 6), 7);
    assert_eq!(gpr(&sim, 7), 7);
}

#[test]
fn test_csr_immediate_forms() {
    let sim = harness::run(&[
        csr_imm(sys::CSRRWI, 5, MSCRATCH, 0b10101),
        csr_imm(sys::CSRRSI, 6, MSCRATCH, 0b00010), // old 0b10101
        csr_imm(sys::CSRRCI, 7, MSCRATCH, 0b00101), // old 0b10111
        csrrs(28, MSCRATCH, 0),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 6), 0b10101);
    assert_eq!(gpr(&sim, 7), 0b10111);
    assert_eq!(gpr(&sim, 28), 0b10010);
}

#[test]
fn test_fflags_and_frm_alias_fcsr() {
    // frm sits in fcsr bits 7:5, fflags in bits 4:0.
    let sim = harness::run(&[
        csr_imm(sys::CSRRWI, 0, FRM, 1),
        csr_imm(sys::CSRRWI, 0, FFLAGS, 0b00011),
        csrrs(5, FCSR, 0),
        csrrs(6, FRM, 0),
        csrrs(7, FFLAGS, 0),
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 5), 0b0010_0011);
    assert_eq!(gpr(&sim, 6), 1);
    assert_eq!(gpr(&sim, 7), 0b00011);
}

#[test]
fn test_ebreak_halts_at_instruction() {
    let mut sim = harness::boot(&[addi(5, 0, 1), ebreak()], harness::rv64());
    let _ = sim.run(None);
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::Breakpoint));
    assert_eq!(sim.state().pc(), TEXT_BASE + 4);
    assert_eq!(sim.run_state(), RunState::HaltedTrap);
    assert!(!sim.state().is_ecall());
}

#[test]
fn test_mret_jumps_to_mepc() {
    // Write a forward target into mepc and return to it, skipping the
    // instruction in between.
    let sim = harness::run(&[
        lui(5, 0x10),
        addi(5, 5, 20), // TEXT_BASE + 20: the ecall
        csrrw(0, MEPC, 5),
        0x3020_0073, // mret
        addi(6, 0, 99), // skipped
        ecall(),
    ]);
    assert_eq!(gpr(&sim, 6), 0);
    assert!(sim.state().is_ecall());
}

#[test]
fn test_wfi_is_a_nop() {
    let sim = harness::run(&[0x1050_0073, addi(5, 0, 4), ecall()]);
    assert_eq!(gpr(&sim, 5), 4);
}

#[test]
fn test_unknown_system_encoding_is_illegal() {
    // funct3 0 with a non-zero immediate that matches no defined encoding.
    let sim = harness::run(&[i_type(sys::OP_SYSTEM, 0, 0b000, 0, 0x7FF), ecall()]);
    assert_eq!(sim.state().halt_cause(), Some(HaltCause::IllegalInstruction));
}
