//! Register-file tests: the x0 invariant, FPR raw-bit storage, and ABI
//! name lookup.

use rvrun_core::core::arch::{Fpr, Gpr};
use rvrun_core::isa::abi;

#[test]
fn test_gpr_initializes_to_zero() {
    let gpr = Gpr::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}

#[test]
fn test_gpr_x0_ignores_writes() {
    let mut gpr = Gpr::new();
    gpr.write(0, 0xDEAD_BEEF);
    assert_eq!(gpr.read(0), 0);
}

#[test]
fn test_gpr_write_all_registers() {
    let mut gpr = Gpr::new();
    for i in 1..32 {
        let value = (i as u64) << 32 | i as u64;
        gpr.write(i, value);
        assert_eq!(gpr.read(i), value);
    }
}

#[test]
fn test_fpr_preserves_raw_bits() {
    let mut fpr = Fpr::new();
    // A NaN payload must survive the register file unchanged.
    let payload = 0x7FF4_0000_DEAD_BEEF;
    fpr.write(3, payload);
    assert_eq!(fpr.read(3), payload);
}

#[test]
fn test_abi_names_map_to_indices() {
    assert_eq!(abi::gpr_index("zero"), Some(0));
    assert_eq!(abi::gpr_index("ra"), Some(1));
    assert_eq!(abi::gpr_index("sp"), Some(2));
    assert_eq!(abi::gpr_index("gp"), Some(3));
    assert_eq!(abi::gpr_index("a0"), Some(10));
    assert_eq!(abi::gpr_index("a7"), Some(17));
    assert_eq!(abi::gpr_index("t6"), Some(31));
}

#[test]
fn test_numbered_and_alias_spellings() {
    assert_eq!(abi::gpr_index("x13"), Some(13));
    assert_eq!(abi::gpr_index("fp"), Some(8));
    assert_eq!(abi::gpr_index("s0"), Some(8));
    assert_eq!(abi::fpr_index("fa0"), Some(10));
    assert_eq!(abi::fpr_index("f31"), Some(31));
}

#[test]
fn test_unknown_names_are_none() {
    assert_eq!(abi::gpr_index("a99"), None);
    assert_eq!(abi::gpr_index("x32"), None);
    assert_eq!(abi::gpr_index(""), None);
    assert_eq!(abi::fpr_index("a0"), None);
}
