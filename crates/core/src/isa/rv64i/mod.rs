//! Base integer instruction set constants (shared by RV32I and RV64I).

/// Minor opcodes (funct3 field).
pub mod funct3;

/// Minor opcodes (funct7 field).
pub mod funct7;

/// Major opcodes.
pub mod opcodes;
