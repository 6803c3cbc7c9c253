//! Fault taxonomy.
//!
//! Every failure the core can raise is a [`Fault`]. Faults discovered during
//! `step`/`run` halt the control loop and are reflected in the terminal
//! [`crate::CpuState`] rather than unwinding past the caller; image-loading
//! faults are raised synchronously at construction and abort simulator
//! creation.
//!
//! An unknown register name passed to `CpuState::read_register` is *not* a
//! fault: it is reported as `None`, matching the "no such register" contract.

use thiserror::Error;

/// A fault raised by memory access, instruction decode, execution, or image
/// loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Fault {
    /// A load touched a page that was never stored to. Uninitialized-memory
    /// reads model unmapped memory and trap instead of silently reading zero.
    #[error("unmapped page access at address {addr:#018x}")]
    UnmappedPage {
        /// Address of the first unmapped byte covered by the access.
        addr: u64,
    },

    /// The bytes at the current PC do not decode to a known instruction, or
    /// the instruction belongs to an extension that is not enabled.
    #[error("illegal instruction {raw:#010x} at pc {pc:#018x}")]
    IllegalInstruction {
        /// The raw instruction word (expanded to 32 bits if compressed).
        raw: u32,
        /// PC of the faulting instruction.
        pc: u64,
    },

    /// An atomic access (LR/SC/AMO) was not naturally aligned.
    #[error("misaligned atomic access at address {addr:#018x}")]
    MisalignedAccess {
        /// The misaligned effective address.
        addr: u64,
    },

    /// The image handed to the loader is structurally invalid: wrong
    /// architecture, wrong object kind, big-endian, or unreadable. Fatal to
    /// constructing a simulator.
    #[error("malformed image: {0}")]
    MalformedImage(String),
}
