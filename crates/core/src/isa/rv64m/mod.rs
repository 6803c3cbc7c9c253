//! Integer multiply/divide extension constants.

/// Minor opcodes (funct3 field).
pub mod funct3;

/// funct7 value marking an M-extension instruction under OP/OP-32.
pub const M_EXTENSION: u32 = 0b0000001;
