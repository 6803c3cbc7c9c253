//! Decoder tests: field extraction per format class, purity, and rejection
//! of unknown opcodes.

use proptest::prelude::*;
use rvrun_core::Fault;
use rvrun_core::isa::decode::decode;
use rvrun_core::isa::rv64i::opcodes;

use crate::common::encoding::{b_type, i_type, j_type, lui, r_type, s_type};

#[test]
fn test_r_type_fields() {
    let raw = r_type(opcodes::OP_REG, 5, 0b111, 6, 7, 0b0100000);
    let d = decode(raw, 0).unwrap();
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!(d.rd, 5);
    assert_eq!(d.rs1, 6);
    assert_eq!(d.rs2, 7);
    assert_eq!(d.funct3, 0b111);
    assert_eq!(d.funct7, 0b0100000);
    assert_eq!(d.imm, 0);
    assert_eq!(d.width, 4);
}

#[test]
fn test_i_type_negative_immediate() {
    let raw = i_type(opcodes::OP_IMM, 1, 0, 2, -1);
    let d = decode(raw, 0).unwrap();
    assert_eq!(d.imm, -1);

    let raw = i_type(opcodes::OP_IMM, 1, 0, 2, -2048);
    assert_eq!(decode(raw, 0).unwrap().imm, -2048);
}

#[test]
fn test_s_type_immediate_reassembly() {
    let raw = s_type(opcodes::OP_STORE, 0b011, 2, 3, -40);
    let d = decode(raw, 0).unwrap();
    assert_eq!(d.imm, -40);
    assert_eq!(d.rs1, 2);
    assert_eq!(d.rs2, 3);
}

#[test]
fn test_b_type_offset_is_even_and_signed() {
    let raw = b_type(opcodes::OP_BRANCH, 0, 1, 2, -8);
    assert_eq!(decode(raw, 0).unwrap().imm, -8);
    let raw = b_type(opcodes::OP_BRANCH, 0, 1, 2, 4094);
    assert_eq!(decode(raw, 0).unwrap().imm, 4094);
}

#[test]
fn test_u_type_shifted_immediate() {
    let d = decode(lui(7, 0xF_FFFF), 0).unwrap();
    // Upper 20 bits, shifted and sign-extended.
    assert_eq!(d.imm, -4096);
    let d = decode(lui(7, 0x1), 0).unwrap();
    assert_eq!(d.imm, 4096);
}

#[test]
fn test_j_type_offset() {
    let d = decode(j_type(opcodes::OP_JAL, 1, -2), 0).unwrap();
    assert_eq!(d.imm, -2);
    let d = decode(j_type(opcodes::OP_JAL, 1, 0xF_F000), 0).unwrap();
    assert_eq!(d.imm, 0xF_F000);
}

#[test]
fn test_unknown_opcode_preserves_raw_and_pc() {
    // Major opcode 0b1111111 belongs to no supported extension.
    let err = decode(0xFFFF_FFFF, 0x8000).unwrap_err();
    assert_eq!(
        err,
        Fault::IllegalInstruction {
            raw: 0xFFFF_FFFF,
            pc: 0x8000
        }
    );
}

#[test]
fn test_decode_is_pure() {
    let raw = i_type(opcodes::OP_IMM, 3, 0, 4, 17);
    assert_eq!(decode(raw, 0).unwrap(), decode(raw, 0).unwrap());
}

proptest! {
    #[test]
    fn prop_decoded_fields_match_bit_slices(raw: u32) {
        if let Ok(d) = decode(raw, 0) {
            prop_assert_eq!(d.raw, raw);
            prop_assert_eq!(d.opcode, raw & 0x7F);
            prop_assert_eq!(d.rd, (raw >> 7 & 0x1F) as usize);
            prop_assert_eq!(d.rs1, (raw >> 15 & 0x1F) as usize);
            prop_assert_eq!(d.rs2, (raw >> 20 & 0x1F) as usize);
            prop_assert_eq!(d.funct3, raw >> 12 & 0x7);
            prop_assert_eq!(d.funct7, raw >> 25 & 0x7F);
        }
    }

    #[test]
    fn prop_pc_never_changes_decoding(raw: u32, pc_a: u64, pc_b: u64) {
        let a = decode(raw, pc_a);
        let b = decode(raw, pc_b);
        match (a, b) {
            (Ok(da), Ok(db)) => prop_assert_eq!(da, db),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "purity violated"),
        }
    }
}
