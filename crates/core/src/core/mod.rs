//! CPU core state.
//!
//! This module holds the architectural state of the simulated hart:
//! 1. **Registers:** GPR, FPR, and CSR files ([`arch`]).
//! 2. **Floating point:** NaN boxing, rounding, exception flags, and
//!    half-precision support ([`fpu`]).
//! 3. **Snapshot:** The externally observable [`state::CpuState`] aggregate.

/// Register files (GPR, FPR, CSR).
pub mod arch;

/// Floating-point helpers (NaN handling, rounding modes, exception flags,
/// half precision).
pub mod fpu;

/// The externally observable CPU state aggregate.
pub mod state;
