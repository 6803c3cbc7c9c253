//! Base integer funct7 values.

/// Default funct7 for ADD, SRL, and friends.
pub const DEFAULT: u32 = 0b0000000;
/// Alternate funct7 selecting SUB and SRA.
pub const SUB_SRA: u32 = 0b0100000;
