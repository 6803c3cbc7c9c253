//! Control and status registers.
//!
//! Only the floating-point control word (`fflags`/`frm`/`fcsr`) has wired
//! semantics; it backs the accrued-exception-flag and dynamic-rounding-mode
//! behavior of the F/D/Zfh executors. Every other address is plain
//! read/write scratch storage so that conformance-test prologues (which set
//! up `mtvec`, `mstatus`, and friends) execute without trapping. There is no
//! privilege checking and no delegation: the core models a single flat
//! machine level.

use std::collections::HashMap;

/// Accrued floating-point exception flags CSR address.
pub const FFLAGS: u32 = 0x001;

/// Dynamic floating-point rounding mode CSR address.
pub const FRM: u32 = 0x002;

/// Combined floating-point control and status CSR address.
pub const FCSR: u32 = 0x003;

/// Machine exception program counter CSR address (used by MRET).
pub const MEPC: u32 = 0x341;

/// Mask of the valid bits in `fcsr` (frm in bits 7:5, fflags in bits 4:0).
const FCSR_MASK: u64 = 0xFF;

/// The CSR file.
#[derive(Debug, Clone, Default)]
pub struct Csr {
    fcsr: u64,
    scratch: HashMap<u32, u64>,
}

impl Csr {
    /// Creates a CSR file with every register zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the CSR at `addr`. Unwritten scratch registers read as zero.
    pub fn read(&self, addr: u32) -> u64 {
        match addr {
            FFLAGS => self.fcsr & 0x1F,
            FRM => (self.fcsr >> 5) & 0x7,
            FCSR => self.fcsr,
            other => self.scratch.get(&other).copied().unwrap_or(0),
        }
    }

    /// Writes the CSR at `addr`.
    pub fn write(&mut self, addr: u32, val: u64) {
        match addr {
            FFLAGS => self.fcsr = (self.fcsr & !0x1F) | (val & 0x1F),
            FRM => self.fcsr = (self.fcsr & !0xE0) | ((val & 0x7) << 5),
            FCSR => self.fcsr = val & FCSR_MASK,
            other => {
                let _ = self.scratch.insert(other, val);
            }
        }
    }

    /// ORs `flags` (a 5-bit fflags value) into the accrued exception flags.
    pub fn accrue_fflags(&mut self, flags: u8) {
        self.fcsr |= u64::from(flags) & 0x1F;
    }

    /// Current dynamic rounding mode field (`frm`).
    pub fn frm(&self) -> u8 {
        ((self.fcsr >> 5) & 0x7) as u8
    }
}
