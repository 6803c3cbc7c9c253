//! Atomic extension constants.

/// AMO function codes (funct5 field).
pub mod funct5;

/// Major opcode for all atomic instructions.
pub const OP_AMO: u32 = 0b0101111;
