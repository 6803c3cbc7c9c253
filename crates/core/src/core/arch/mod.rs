//! Architectural register files.

/// Control and status registers.
pub mod csr;

/// Floating-point registers.
pub mod fpr;

/// General-purpose integer registers.
pub mod gpr;

pub use csr::Csr;
pub use fpr::Fpr;
pub use gpr::Gpr;
