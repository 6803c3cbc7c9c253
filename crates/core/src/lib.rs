//! Functional RISC-V instruction-set simulator core.
//!
//! This crate implements an architectural (untimed) RISC-V simulator with the following:
//! 1. **Memory:** Sparse 64 KiB page-backed byte store with lazy allocation.
//! 2. **Arch state:** GPR/FPR/CSR files, program counter, halt cause.
//! 3. **ISA:** Decoding for RV32I/RV64I plus M, A, F, D, C, Zba, Zbb, Zbc, Zbs, Zfh.
//! 4. **Execution:** Precise per-instruction semantics, including M-extension
//!    division sentinels, LR/SC reservations, IEEE-754 rounding and NaN boxing.
//! 5. **Simulation:** ELF image loading, the step/run control loop, and the
//!    read-only state queries a conformance-test harness needs.

/// Common types (faults, bit utilities).
pub mod common;
/// Simulator configuration (word width, enabled extensions).
pub mod config;
/// Architectural state (registers, CSRs, floating-point helpers, CPU state).
pub mod core;
/// Instruction execution for all supported extensions.
pub mod exec;
/// Instruction set (decode, instruction fields, ABI names, per-extension constants).
pub mod isa;
/// Sparse page-backed memory.
pub mod mem;
/// Image loading and the run/step control loop.
pub mod sim;

/// Fault taxonomy shared by memory, decode, and execution.
pub use crate::common::error::Fault;
/// Root configuration type; construct with `Config::new` or deserialize.
pub use crate::config::Config;
/// Externally observable simulation snapshot.
pub use crate::core::state::CpuState;
/// Sparse memory; populate before constructing a [`sim::Simulator`].
pub use crate::mem::Memory;
/// Control loop; construct from a populated memory or an ELF image.
pub use crate::sim::Simulator;
