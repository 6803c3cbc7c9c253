//! Floating-point opcode space.
//!
//! F, D, and Zfh share one opcode space: the low two bits of `funct7` select
//! the format (S/D/H) and the upper five bits select the operation. The
//! constants here therefore come in two parts: [`ops`] values compared
//! against `funct7 >> 2`, and [`fmt`] values compared against `funct7 & 3`.

/// Format field values (low two bits of funct7).
pub mod fmt {
    /// Single precision (binary32).
    pub const S: u32 = 0b00;
    /// Double precision (binary64).
    pub const D: u32 = 0b01;
    /// Half precision (binary16).
    pub const H: u32 = 0b10;
}

/// Operation selectors (upper five bits of funct7).
pub mod ops {
    /// Addition.
    pub const FADD: u32 = 0b00000;
    /// Subtraction.
    pub const FSUB: u32 = 0b00001;
    /// Multiplication.
    pub const FMUL: u32 = 0b00010;
    /// Division.
    pub const FDIV: u32 = 0b00011;
    /// Square root (rs2 = 0).
    pub const FSQRT: u32 = 0b01011;
    /// Sign injection (FSGNJ/FSGNJN/FSGNJX by funct3).
    pub const FSGNJ: u32 = 0b00100;
    /// Minimum/maximum (by funct3).
    pub const FMIN_MAX: u32 = 0b00101;
    /// Comparison (FEQ/FLT/FLE by funct3).
    pub const FCMP: u32 = 0b10100;
    /// FCLASS (funct3=001) and FMV.X (funct3=000).
    pub const FCLASS_MV_X: u32 = 0b11100;
    /// Float to integer conversion (target width/signedness in rs2).
    pub const FCVT_INT_F: u32 = 0b11000;
    /// Integer to float conversion (source width/signedness in rs2).
    pub const FCVT_F_INT: u32 = 0b11010;
    /// Move integer register bits into a float register.
    pub const FMV_F_X: u32 = 0b11110;
    /// Float to float format conversion (source format in rs2).
    pub const FCVT_F_F: u32 = 0b01000;
}

/// funct3 values for sign injection, min/max, and comparisons.
pub mod funct3 {
    /// Copy sign from rs2.
    pub const FSGNJ: u32 = 0b000;
    /// Copy negated sign from rs2.
    pub const FSGNJN: u32 = 0b001;
    /// XOR signs.
    pub const FSGNJX: u32 = 0b010;
    /// Minimum.
    pub const FMIN: u32 = 0b000;
    /// Maximum.
    pub const FMAX: u32 = 0b001;
    /// Quiet equality.
    pub const FEQ: u32 = 0b010;
    /// Signaling less-than.
    pub const FLT: u32 = 0b001;
    /// Signaling less-or-equal.
    pub const FLE: u32 = 0b000;
    /// FCLASS (under [`super::ops::FCLASS_MV_X`]).
    pub const FCLASS: u32 = 0b001;
    /// FMV.X (under [`super::ops::FCLASS_MV_X`]).
    pub const FMV_X: u32 = 0b000;
}

/// rs2 field values selecting the integer type of a conversion.
pub mod cvt {
    /// 32-bit signed (W).
    pub const W: usize = 0b00000;
    /// 32-bit unsigned (WU).
    pub const WU: usize = 0b00001;
    /// 64-bit signed (L, RV64 only).
    pub const L: usize = 0b00010;
    /// 64-bit unsigned (LU, RV64 only).
    pub const LU: usize = 0b00011;
}

/// Floating-point loads (FLH/FLW/FLD by funct3 = 001/010/011).
pub const OP_LOAD_FP: u32 = 0b0000111;
/// Floating-point stores (FSH/FSW/FSD by funct3).
pub const OP_STORE_FP: u32 = 0b0100111;
/// Floating-point computational instructions.
pub const OP_FP: u32 = 0b1010011;
/// Fused multiply-add.
pub const OP_FMADD: u32 = 0b1000011;
/// Fused multiply-subtract.
pub const OP_FMSUB: u32 = 0b1000111;
/// Negated fused multiply-subtract.
pub const OP_FNMSUB: u32 = 0b1001011;
/// Negated fused multiply-add.
pub const OP_FNMADD: u32 = 0b1001111;
