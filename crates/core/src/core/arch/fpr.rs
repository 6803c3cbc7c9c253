//! Floating-point register file.
//!
//! 32 registers, stored as raw 64-bit IEEE 754 bit patterns rather than `f64`
//! values. Raw storage is load-bearing: NaN payloads and the NaN-boxing of
//! single- and half-precision values in 64-bit registers must survive
//! round-trips through the register file unchanged.

/// The 32-entry floating-point register file.
#[derive(Debug, Clone)]
pub struct Fpr {
    regs: [u64; 32],
}

impl Fpr {
    /// Creates a register file with all registers initialized to zero bits.
    pub const fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads the raw 64-bit pattern of register `idx`.
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u64 {
        self.regs[idx]
    }

    /// Writes the raw 64-bit pattern of register `idx`.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, bits: u64) {
        self.regs[idx] = bits;
    }
}

impl Default for Fpr {
    fn default() -> Self {
        Self::new()
    }
}
