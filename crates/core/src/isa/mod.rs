//! Instruction Set Architecture (ISA) definitions.
//!
//! Contains definitions for opcodes, function codes, and decoding logic,
//! organized by RISC-V extension.
//!
//! # Extensions
//!
//! * `rv64i`: Base Integer Instruction Set (shared by RV32I and RV64I).
//! * `rv64m`: Standard Extension for Integer Multiplication and Division.
//! * `rv64a`: Standard Extension for Atomic Instructions.
//! * `rv64f`: Floating-point (F/D/Zfh share one opcode space, selected by
//!   the two-bit format field).
//! * `bitmanip`: Zba/Zbb/Zbc/Zbs function codes.
//! * `rvc`: Standard Extension for Compressed Instructions.
//! * `privileged`: System instructions (ECALL, EBREAK, CSR accesses).

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Zba/Zbb/Zbc/Zbs function codes.
pub mod bitmanip;

/// Instruction decoding logic for all RISC-V instruction formats.
pub mod decode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// System instructions (ECALL, EBREAK, CSR accesses, MRET).
pub mod privileged;

/// Atomic memory operations extension (AMO instructions).
pub mod rv64a;

/// Floating-point opcode space shared by F, D, and Zfh.
pub mod rv64f;

/// Base integer instruction set.
pub mod rv64i;

/// Integer multiply/divide extension.
pub mod rv64m;

/// Compressed instruction extension (16-bit instruction encoding).
pub mod rvc;
