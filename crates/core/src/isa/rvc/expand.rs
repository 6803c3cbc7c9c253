//! Compressed instruction expansion.
//!
//! Converts a 16-bit compressed instruction into its canonical 32-bit
//! equivalent. Reserved encodings expand to 0, which the decoder rejects as
//! an illegal instruction. Several encodings differ between RV32 and RV64
//! (C.JAL vs C.ADDIW, C.FLW vs C.LD, and their store/stack variants), so the
//! expander takes the configured word width.

use super::constants::{QUADRANT_0, QUADRANT_1, QUADRANT_2, q0, q1, q2};
use crate::config::Xlen;
use crate::isa::privileged::opcodes as sys;
use crate::isa::rv64f;
use crate::isa::rv64i::{funct3, funct7, opcodes};

fn i_type(imm: u32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    (imm & 0xFFF) << 20 | rs1 << 15 | f3 << 12 | rd << 7 | opcode
}

fn s_type(imm: u32, rs2: u32, rs1: u32, f3: u32, opcode: u32) -> u32 {
    ((imm >> 5) & 0x7F) << 25 | rs2 << 20 | rs1 << 15 | f3 << 12 | (imm & 0x1F) << 7 | opcode
}

fn r_type(f7: u32, rs2: u32, rs1: u32, f3: u32, rd: u32, opcode: u32) -> u32 {
    f7 << 25 | rs2 << 20 | rs1 << 15 | f3 << 12 | rd << 7 | opcode
}

fn b_type(imm: u32, rs2: u32, rs1: u32, f3: u32) -> u32 {
    ((imm >> 12) & 1) << 31
        | ((imm >> 5) & 0x3F) << 25
        | rs2 << 20
        | rs1 << 15
        | f3 << 12
        | ((imm >> 1) & 0xF) << 8
        | ((imm >> 11) & 1) << 7
        | opcodes::OP_BRANCH
}

fn j_type(imm: u32, rd: u32) -> u32 {
    ((imm >> 20) & 1) << 31
        | ((imm >> 1) & 0x3FF) << 21
        | ((imm >> 11) & 1) << 20
        | ((imm >> 12) & 0xFF) << 12
        | rd << 7
        | opcodes::OP_JAL
}

/// rd'/rs2' field of the three-bit register encodings (maps to x8-x15).
fn creg_low(inst: u16) -> u32 {
    8 + (u32::from(inst) >> 2 & 0x7)
}

/// rs1'/rd' field of the three-bit register encodings.
fn creg_high(inst: u16) -> u32 {
    8 + (u32::from(inst) >> 7 & 0x7)
}

/// 6-bit immediate of the CI format, sign-extended into the low 12 bits.
fn ci_imm(inst: u16) -> u32 {
    let raw = (u32::from(inst) >> 12 & 1) << 5 | (u32::from(inst) >> 2 & 0x1F);
    if raw & 0x20 != 0 { raw | 0xFC0 } else { raw }
}

/// Branch offset of the CB format (9 bits, sign-extended to 13).
fn cb_offset(inst: u16) -> u32 {
    let i = u32::from(inst);
    let raw = (i >> 12 & 1) << 8
        | (i >> 5 & 0x3) << 6
        | (i >> 2 & 1) << 5
        | (i >> 10 & 0x3) << 3
        | (i >> 3 & 0x3) << 1;
    if raw & 0x100 != 0 { raw | 0x1E00 } else { raw }
}

/// Jump offset of the CJ format (12 bits, sign-extended to 21).
fn cj_offset(inst: u16) -> u32 {
    let i = u32::from(inst);
    let raw = (i >> 12 & 1) << 11
        | (i >> 8 & 1) << 10
        | (i >> 9 & 0x3) << 8
        | (i >> 6 & 1) << 7
        | (i >> 7 & 1) << 6
        | (i >> 2 & 1) << 5
        | (i >> 11 & 1) << 4
        | (i >> 3 & 0x7) << 1;
    if raw & 0x800 != 0 { raw | 0x1F_F000 } else { raw }
}

/// Expands a 16-bit RVC instruction into its 32-bit equivalent.
///
/// Returns 0 for reserved encodings.
pub fn expand(inst: u16, xlen: Xlen) -> u32 {
    let op = inst & 0x3;
    let f3 = (inst >> 13) & 0x7;

    match op {
        QUADRANT_0 => expand_q0(inst, f3, xlen),
        QUADRANT_1 => expand_q1(inst, f3, xlen),
        QUADRANT_2 => expand_q2(inst, f3, xlen),
        _ => 0,
    }
}

fn expand_q0(inst: u16, f3: u16, xlen: Xlen) -> u32 {
    let i = u32::from(inst);
    let rs1 = creg_high(inst);
    let rlow = creg_low(inst);
    match f3 {
        q0::C_ADDI4SPN => {
            let imm =
                (i >> 6 & 1) << 2 | (i >> 5 & 1) << 3 | (i >> 11 & 0x3) << 4 | (i >> 7 & 0xF) << 6;
            if imm == 0 {
                return 0;
            }
            i_type(imm, 2, funct3::ADD_SUB, rlow, opcodes::OP_IMM)
        }
        q0::C_FLD => {
            let imm = (i >> 10 & 0x7) << 3 | (i >> 5 & 0x3) << 6;
            i_type(imm, rs1, funct3::LD, rlow, rv64f::OP_LOAD_FP)
        }
        q0::C_LW => {
            let imm = (i >> 6 & 1) << 2 | (i >> 10 & 0x7) << 3 | (i >> 5 & 1) << 6;
            i_type(imm, rs1, funct3::LW, rlow, opcodes::OP_LOAD)
        }
        q0::C_LD_FLW => match xlen {
            Xlen::Rv64 => {
                let imm = (i >> 10 & 0x7) << 3 | (i >> 5 & 0x3) << 6;
                i_type(imm, rs1, funct3::LD, rlow, opcodes::OP_LOAD)
            }
            Xlen::Rv32 => {
                let imm = (i >> 6 & 1) << 2 | (i >> 10 & 0x7) << 3 | (i >> 5 & 1) << 6;
                i_type(imm, rs1, funct3::LW, rlow, rv64f::OP_LOAD_FP)
            }
        },
        q0::C_FSD => {
            let imm = (i >> 10 & 0x7) << 3 | (i >> 5 & 0x3) << 6;
            s_type(imm, rlow, rs1, funct3::SD, rv64f::OP_STORE_FP)
        }
        q0::C_SW => {
            let imm = (i >> 6 & 1) << 2 | (i >> 10 & 0x7) << 3 | (i >> 5 & 1) << 6;
            s_type(imm, rlow, rs1, funct3::SW, opcodes::OP_STORE)
        }
        q0::C_SD_FSW => match xlen {
            Xlen::Rv64 => {
                let imm = (i >> 10 & 0x7) << 3 | (i >> 5 & 0x3) << 6;
                s_type(imm, rlow, rs1, funct3::SD, opcodes::OP_STORE)
            }
            Xlen::Rv32 => {
                let imm = (i >> 6 & 1) << 2 | (i >> 10 & 0x7) << 3 | (i >> 5 & 1) << 6;
                s_type(imm, rlow, rs1, funct3::SW, rv64f::OP_STORE_FP)
            }
        },
        _ => 0,
    }
}

fn expand_q1(inst: u16, f3: u16, xlen: Xlen) -> u32 {
    let i = u32::from(inst);
    let rd = i >> 7 & 0x1F;
    match f3 {
        q1::C_ADDI => i_type(ci_imm(inst), rd, funct3::ADD_SUB, rd, opcodes::OP_IMM),
        q1::C_ADDIW_JAL => match xlen {
            Xlen::Rv64 => {
                if rd == 0 {
                    return 0;
                }
                i_type(ci_imm(inst), rd, funct3::ADD_SUB, rd, opcodes::OP_IMM_32)
            }
            Xlen::Rv32 => j_type(cj_offset(inst), 1),
        },
        q1::C_LI => i_type(ci_imm(inst), 0, funct3::ADD_SUB, rd, opcodes::OP_IMM),
        q1::C_LUI_ADDI16SP => {
            if rd == 2 {
                let raw = (i >> 12 & 1) << 9
                    | (i >> 3 & 0x3) << 7
                    | (i >> 5 & 1) << 6
                    | (i >> 2 & 1) << 5
                    | (i >> 6 & 1) << 4;
                if raw == 0 {
                    return 0;
                }
                let imm = if raw & 0x200 != 0 { raw | 0xC00 } else { raw };
                i_type(imm, 2, funct3::ADD_SUB, 2, opcodes::OP_IMM)
            } else {
                let raw = (i >> 12 & 1) << 5 | (i >> 2 & 0x1F);
                if raw == 0 {
                    return 0;
                }
                // Sign-extend the 6-bit immediate across the 20-bit LUI field.
                let imm = if raw & 0x20 != 0 { raw | 0xF_FFC0 } else { raw };
                (imm & 0xFFFFF) << 12 | rd << 7 | opcodes::OP_LUI
            }
        }
        q1::C_MISC_ALU => expand_misc_alu(inst, i, xlen),
        q1::C_J => j_type(cj_offset(inst), 0),
        q1::C_BEQZ => b_type(cb_offset(inst), 0, creg_high(inst), funct3::BEQ),
        q1::C_BNEZ => b_type(cb_offset(inst), 0, creg_high(inst), funct3::BNE),
        _ => 0,
    }
}

fn expand_misc_alu(inst: u16, i: u32, xlen: Xlen) -> u32 {
    let rd = creg_high(inst);
    let shamt = (i >> 12 & 1) << 5 | (i >> 2 & 0x1F);
    if matches!(xlen, Xlen::Rv32) && i >> 10 & 0x3 <= 1 && shamt & 0x20 != 0 {
        return 0;
    }
    match i >> 10 & 0x3 {
        0b00 => i_type(shamt, rd, funct3::SRL_SRA, rd, opcodes::OP_IMM),
        0b01 => i_type(
            funct7::SUB_SRA << 5 | shamt,
            rd,
            funct3::SRL_SRA,
            rd,
            opcodes::OP_IMM,
        ),
        0b10 => i_type(ci_imm(inst), rd, funct3::AND, rd, opcodes::OP_IMM),
        _ => {
            let rs2 = creg_low(inst);
            if i >> 12 & 1 == 0 {
                match i >> 5 & 0x3 {
                    0b00 => r_type(funct7::SUB_SRA, rs2, rd, funct3::ADD_SUB, rd, opcodes::OP_REG),
                    0b01 => r_type(funct7::DEFAULT, rs2, rd, funct3::XOR, rd, opcodes::OP_REG),
                    0b10 => r_type(funct7::DEFAULT, rs2, rd, funct3::OR, rd, opcodes::OP_REG),
                    _ => r_type(funct7::DEFAULT, rs2, rd, funct3::AND, rd, opcodes::OP_REG),
                }
            } else if matches!(xlen, Xlen::Rv64) {
                match i >> 5 & 0x3 {
                    0b00 => r_type(
                        funct7::SUB_SRA,
                        rs2,
                        rd,
                        funct3::ADD_SUB,
                        rd,
                        opcodes::OP_REG_32,
                    ),
                    0b01 => r_type(
                        funct7::DEFAULT,
                        rs2,
                        rd,
                        funct3::ADD_SUB,
                        rd,
                        opcodes::OP_REG_32,
                    ),
                    _ => 0,
                }
            } else {
                0
            }
        }
    }
}

fn expand_q2(inst: u16, f3: u16, xlen: Xlen) -> u32 {
    let i = u32::from(inst);
    let rd = i >> 7 & 0x1F;
    let rs2 = i >> 2 & 0x1F;
    match f3 {
        q2::C_SLLI => {
            let shamt = (i >> 12 & 1) << 5 | (i >> 2 & 0x1F);
            if matches!(xlen, Xlen::Rv32) && shamt & 0x20 != 0 {
                return 0;
            }
            i_type(shamt, rd, funct3::SLL, rd, opcodes::OP_IMM)
        }
        q2::C_FLDSP => {
            let imm = (i >> 2 & 0x7) << 6 | (i >> 12 & 1) << 5 | (i >> 5 & 0x3) << 3;
            i_type(imm, 2, funct3::LD, rd, rv64f::OP_LOAD_FP)
        }
        q2::C_LWSP => {
            if rd == 0 {
                return 0;
            }
            let imm = (i >> 2 & 0x3) << 6 | (i >> 12 & 1) << 5 | (i >> 4 & 0x7) << 2;
            i_type(imm, 2, funct3::LW, rd, opcodes::OP_LOAD)
        }
        q2::C_LDSP_FLWSP => match xlen {
            Xlen::Rv64 => {
                if rd == 0 {
                    return 0;
                }
                let imm = (i >> 2 & 0x7) << 6 | (i >> 12 & 1) << 5 | (i >> 5 & 0x3) << 3;
                i_type(imm, 2, funct3::LD, rd, opcodes::OP_LOAD)
            }
            Xlen::Rv32 => {
                let imm = (i >> 2 & 0x3) << 6 | (i >> 12 & 1) << 5 | (i >> 4 & 0x7) << 2;
                i_type(imm, 2, funct3::LW, rd, rv64f::OP_LOAD_FP)
            }
        },
        q2::C_JR_MV_ADD => {
            if i >> 12 & 1 == 0 {
                if rs2 == 0 {
                    if rd == 0 {
                        return 0;
                    }
                    i_type(0, rd, 0, 0, opcodes::OP_JALR)
                } else {
                    r_type(funct7::DEFAULT, rs2, 0, funct3::ADD_SUB, rd, opcodes::OP_REG)
                }
            } else if rs2 == 0 {
                if rd == 0 {
                    sys::EBREAK
                } else {
                    i_type(0, rd, 0, 1, opcodes::OP_JALR)
                }
            } else {
                r_type(funct7::DEFAULT, rs2, rd, funct3::ADD_SUB, rd, opcodes::OP_REG)
            }
        }
        q2::C_FSDSP => {
            let imm = (i >> 7 & 0x7) << 6 | (i >> 10 & 0x7) << 3;
            s_type(imm, rs2, 2, funct3::SD, rv64f::OP_STORE_FP)
        }
        q2::C_SWSP => {
            let imm = (i >> 7 & 0x3) << 6 | (i >> 9 & 0xF) << 2;
            s_type(imm, rs2, 2, funct3::SW, opcodes::OP_STORE)
        }
        q2::C_SDSP_FSWSP => match xlen {
            Xlen::Rv64 => {
                let imm = (i >> 7 & 0x7) << 6 | (i >> 10 & 0x7) << 3;
                s_type(imm, rs2, 2, funct3::SD, opcodes::OP_STORE)
            }
            Xlen::Rv32 => {
                let imm = (i >> 7 & 0x3) << 6 | (i >> 9 & 0xF) << 2;
                s_type(imm, rs2, 2, funct3::SW, rv64f::OP_STORE_FP)
            }
        },
        _ => 0,
    }
}
