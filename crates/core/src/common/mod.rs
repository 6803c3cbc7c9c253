//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks shared across all
//! components. It includes:
//! 1. **Error Handling:** The [`error::Fault`] taxonomy for memory, decode,
//!    execution, and image-loading failures.
//! 2. **Bit Utilities:** Sign extension and field extraction helpers used by
//!    the decoder and the executor.

/// Fault types raised by memory, decode, execution, and image loading.
pub mod error;

/// Bit-level helpers (sign extension, field extraction).
pub mod bits;

pub use error::Fault;
