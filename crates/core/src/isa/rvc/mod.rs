//! Compressed instruction extension (RVC).
//!
//! Every 16-bit instruction expands to exactly one canonical 32-bit
//! instruction; the executor only ever sees expanded forms, which makes the
//! compressed and canonical encodings equivalent by construction.

/// Quadrant and funct3 constants for the 16-bit encoding space.
pub mod constants;

/// Expansion of 16-bit instructions to their 32-bit equivalents.
pub mod expand;

pub use expand::expand;
