//! General-purpose register file.
//!
//! 32 integer registers, 64 bits wide. Register `x0` is hard-wired to zero:
//! reads always return 0 and writes are discarded. When XLEN=32 the executor
//! stores values sign-extended to 64 bits; the register file itself is
//! width-agnostic.

/// The 32-entry general-purpose register file.
#[derive(Debug, Clone)]
pub struct Gpr {
    regs: [u64; 32],
}

impl Gpr {
    /// Creates a register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads register `idx`. Register 0 always reads as zero.
    #[inline(always)]
    pub const fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes register `idx`. Writes to register 0 are discarded.
    #[inline(always)]
    pub const fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}
