//! CPU-state query tests: register reads by name, the ECALL predicate, and
//! the state dump.

use pretty_assertions::assert_eq;
use rvrun_core::sim::RunState;

use crate::common::encoding::{addi, ecall};
use crate::common::harness::{self, TEXT_BASE};

#[test]
fn test_read_register_by_abi_name_and_number() {
    let sim = harness::run(&[addi(10, 0, 42), ecall()]);
    let state = sim.state();
    assert_eq!(state.read_register("a0"), Some(42));
    assert_eq!(state.read_register("x10"), Some(42));
    assert_eq!(state.read_register("zero"), Some(0));
}

#[test]
fn test_ip_and_pc_name_the_program_counter() {
    let sim = harness::run(&[addi(10, 0, 1), ecall()]);
    // ECALL leaves the PC at the ECALL instruction.
    let expected = TEXT_BASE + 4;
    assert_eq!(sim.state().read_register("ip"), Some(expected));
    assert_eq!(sim.state().read_register("pc"), Some(expected));
    assert_eq!(sim.state().pc(), expected);
}

#[test]
fn test_unknown_register_name_is_none_not_error() {
    let sim = harness::run(&[ecall()]);
    assert_eq!(sim.state().read_register("q7"), None);
    assert_eq!(sim.state().read_register("x99"), None);
    assert_eq!(sim.state().read_register(""), None);
}

#[test]
fn test_is_ecall_only_after_ecall() {
    let mut sim = harness::boot(&[addi(10, 0, 1), ecall()], harness::rv64());
    assert!(!sim.state().is_ecall());
    let _ = sim.step();
    assert!(!sim.state().is_ecall());
    let _ = sim.step();
    assert!(sim.state().is_ecall());
    assert_eq!(sim.run_state(), RunState::HaltedTrap);
}

#[test]
fn test_rv32_register_reads_are_truncated() {
    let sim = harness::run_with(&[addi(10, 0, -1), ecall()], harness::rv32());
    assert_eq!(sim.state().read_register("a0"), Some(0xFFFF_FFFF));
    // The architectural 64-bit representation stays sign-extended.
    assert_eq!(sim.state().read_gpr(10), u64::MAX);
}

#[test]
fn test_stack_pointer_initialized_from_config() {
    let sim = harness::boot(&[ecall()], harness::rv64());
    assert_eq!(
        sim.state().read_register("sp"),
        Some(sim.state().config().stack_addr)
    );
}

#[test]
fn test_display_dumps_pc_and_all_registers() {
    let sim = harness::run(&[addi(10, 0, 7), ecall()]);
    let dump = sim.state().to_string();
    assert!(dump.contains("pc "));
    assert!(dump.contains("a0"));
    assert!(dump.contains("x31"));
    // All extensions enabled, so FP registers are included.
    assert!(dump.contains("ft0"));
}
