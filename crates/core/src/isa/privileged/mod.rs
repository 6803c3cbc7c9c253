//! System instruction constants.

/// SYSTEM opcode and the instruction words it carries.
pub mod opcodes;
