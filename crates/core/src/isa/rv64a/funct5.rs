//! A-extension funct5 values (bits 31:27 of AMO instructions).

/// Load-reserved.
pub const LR: u32 = 0b00010;
/// Store-conditional.
pub const SC: u32 = 0b00011;
/// Atomic swap.
pub const AMOSWAP: u32 = 0b00001;
/// Atomic add.
pub const AMOADD: u32 = 0b00000;
/// Atomic XOR.
pub const AMOXOR: u32 = 0b00100;
/// Atomic AND.
pub const AMOAND: u32 = 0b01100;
/// Atomic OR.
pub const AMOOR: u32 = 0b01000;
/// Atomic minimum (signed).
pub const AMOMIN: u32 = 0b10000;
/// Atomic maximum (signed).
pub const AMOMAX: u32 = 0b10100;
/// Atomic minimum (unsigned).
pub const AMOMINU: u32 = 0b11000;
/// Atomic maximum (unsigned).
pub const AMOMAXU: u32 = 0b11100;
