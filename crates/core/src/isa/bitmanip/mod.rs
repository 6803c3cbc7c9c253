//! Bit-manipulation extension constants (Zba, Zbb, Zbc, Zbs).
//!
//! These extensions reuse the OP/OP-IMM (and their -32) major opcodes and
//! are distinguished by funct7 (or the upper immediate bits for shifts) and
//! funct3.

/// funct7 values.
pub mod funct7 {
    /// Zba shNadd family, and ROL/ROR share 0b0110000 with the Zbb counts.
    pub const SH_ADD: u32 = 0b0010000;
    /// ADD.UW and ZEXT.H (under OP-32), SLLI.UW high bits.
    pub const UW: u32 = 0b0000100;
    /// Zbb MIN/MAX and Zbc carry-less multiply.
    pub const MINMAX_CLMUL: u32 = 0b0000101;
    /// Zbb ANDN/ORN/XNOR.
    pub const LOGIC_NEG: u32 = 0b0100000;
    /// Zbb rotates and the unary count/extend group.
    pub const ROT: u32 = 0b0110000;
    /// Zbs BSET.
    pub const BSET: u32 = 0b0010100;
    /// Zbs BCLR and BEXT.
    pub const BCLR_BEXT: u32 = 0b0100100;
    /// Zbs BINV.
    pub const BINV: u32 = 0b0110100;
}

/// rs2-field selectors for the unary Zbb group (funct7 = ROT, funct3 = 001).
pub mod unary {
    /// Count leading zeros.
    pub const CLZ: u32 = 0b00000;
    /// Count trailing zeros.
    pub const CTZ: u32 = 0b00001;
    /// Population count.
    pub const CPOP: u32 = 0b00010;
    /// Sign-extend byte.
    pub const SEXT_B: u32 = 0b00100;
    /// Sign-extend halfword.
    pub const SEXT_H: u32 = 0b00101;
}

/// Full 12-bit immediate values for the OP-IMM funct3=101 Zbb specials.
pub mod imm12 {
    /// ORC.B: OR-combine within each byte.
    pub const ORC_B: u64 = 0b0010_1000_0111;
    /// REV8 on RV64: byte-reverse the full register.
    pub const REV8_RV64: u64 = 0b0110_1011_1000;
    /// REV8 on RV32.
    pub const REV8_RV32: u64 = 0b0110_1001_1000;
}

/// funct3 values.
pub mod funct3 {
    /// SH1ADD.
    pub const SH1ADD: u32 = 0b010;
    /// SH2ADD.
    pub const SH2ADD: u32 = 0b100;
    /// SH3ADD.
    pub const SH3ADD: u32 = 0b110;
    /// ANDN.
    pub const ANDN: u32 = 0b111;
    /// ORN.
    pub const ORN: u32 = 0b110;
    /// XNOR.
    pub const XNOR: u32 = 0b100;
    /// MIN (signed).
    pub const MIN: u32 = 0b100;
    /// MINU.
    pub const MINU: u32 = 0b101;
    /// MAX (signed).
    pub const MAX: u32 = 0b110;
    /// MAXU.
    pub const MAXU: u32 = 0b111;
    /// CLMUL (low half).
    pub const CLMUL: u32 = 0b001;
    /// CLMULR (reversed).
    pub const CLMULR: u32 = 0b010;
    /// CLMULH (high half).
    pub const CLMULH: u32 = 0b011;
    /// ROL (and the unary count group under OP-IMM).
    pub const ROL_COUNTS: u32 = 0b001;
    /// ROR/RORI.
    pub const ROR: u32 = 0b101;
    /// Zbs single-bit set/clear/invert (register and immediate forms).
    pub const BSET_BCLR_BINV: u32 = 0b001;
    /// Zbs bit-extract (register and immediate forms).
    pub const BEXT: u32 = 0b101;
    /// ZEXT.H (funct7 = UW, rs2 = 0).
    pub const ZEXT_H: u32 = 0b100;
    /// ADD.UW (funct7 = UW under OP-32).
    pub const ADD_UW: u32 = 0b000;
    /// SLLI.UW (under OP-IMM-32).
    pub const SLLI_UW: u32 = 0b001;
}
