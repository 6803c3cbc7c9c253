//! The externally observable CPU state.
//!
//! [`CpuState`] aggregates the register files, the program counter, the
//! memory, and the halt cause of the most recent step. It is created once
//! per simulator, mutated in place by the executor during each step, and
//! inspected by the harness through the read-only queries at the bottom of
//! this file.

use crate::common::bits::sext32;
use crate::config::{Config, Xlen};
use crate::core::arch::{Csr, Fpr, Gpr};
use crate::isa::abi;
use crate::mem::Memory;
use std::fmt;

/// Why the control loop stopped inside a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltCause {
    /// An ECALL instruction was executed. The core does not interpret the
    /// call; the harness classifies it through the register queries.
    EnvironmentCall,
    /// An EBREAK instruction was executed.
    Breakpoint,
    /// The bytes at the PC did not decode to an enabled instruction.
    IllegalInstruction,
    /// A load, store, or fetch faulted (unmapped page or misaligned atomic).
    MemoryFault,
}

/// The point-in-time aggregate of registers, memory, and trap status.
#[derive(Debug)]
pub struct CpuState {
    pub(crate) config: Config,
    pub(crate) pc: u64,
    pub(crate) gpr: Gpr,
    pub(crate) fpr: Fpr,
    pub(crate) csr: Csr,
    pub(crate) mem: Memory,
    pub(crate) halt: Option<HaltCause>,
    /// LR/SC reservation address, if a load-reserved is outstanding.
    pub(crate) reservation: Option<u64>,
}

impl CpuState {
    /// Creates a state over a pre-populated memory.
    ///
    /// The PC is set to `entry` and `sp` to the configured stack address,
    /// both masked to the configured word width.
    pub fn new(mem: Memory, entry: u64, config: Config) -> Self {
        let mut state = Self {
            config,
            pc: entry & config.xlen.addr_mask(),
            gpr: Gpr::new(),
            fpr: Fpr::new(),
            csr: Csr::new(),
            mem,
            halt: None,
            reservation: None,
        };
        state.write_gpr(abi::REG_SP, config.stack_addr);
        state
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current program counter, masked to the configured word width.
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Reads integer register `idx` (architectural 64-bit representation).
    #[inline(always)]
    pub const fn read_gpr(&self, idx: usize) -> u64 {
        self.gpr.read(idx)
    }

    /// Writes integer register `idx`, sign-extending to 64 bits when
    /// XLEN=32 so that one comparison path serves both widths.
    #[inline(always)]
    pub(crate) fn write_gpr(&mut self, idx: usize, val: u64) {
        let val = match self.config.xlen {
            Xlen::Rv32 => sext32(val as u32),
            Xlen::Rv64 => val,
        };
        self.gpr.write(idx, val);
    }

    /// Masks an effective address to the configured word width.
    #[inline(always)]
    pub(crate) const fn mask_addr(&self, addr: u64) -> u64 {
        addr & self.config.xlen.addr_mask()
    }

    /// True iff the most recently executed instruction was an ECALL.
    pub fn is_ecall(&self) -> bool {
        self.halt == Some(HaltCause::EnvironmentCall)
    }

    /// The halt cause of the most recent step, if it halted.
    pub const fn halt_cause(&self) -> Option<HaltCause> {
        self.halt
    }

    /// Read-only access to the memory.
    pub const fn memory(&self) -> &Memory {
        &self.mem
    }

    /// Reads a register by name.
    ///
    /// Accepts integer ABI names (`a0`, `gp`, ...), `xN`/`fN` spellings,
    /// floating-point ABI names (raw bit patterns), and `ip`/`pc` for the
    /// program counter. Returns `None` for an unknown name; this is the
    /// "no such register" signal, never an error.
    ///
    /// Values are truncated to the configured word width, so RV32 reads
    /// yield zero-extended 32-bit quantities.
    pub fn read_register(&self, name: &str) -> Option<u64> {
        if name == "ip" || name == "pc" {
            return Some(self.pc);
        }
        if let Some(idx) = abi::gpr_index(name) {
            return Some(self.read_gpr(idx) & self.config.xlen.addr_mask());
        }
        if let Some(idx) = abi::fpr_index(name) {
            return Some(self.fpr.read(idx));
        }
        None
    }
}

impl fmt::Display for CpuState {
    /// Human-readable rendering of the full architectural state.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.config.xlen.bits() / 4) as usize;
        writeln!(f, "pc  = {:#0width$x}", self.pc, width = digits + 2)?;
        for row in 0..16 {
            let (a, b) = (row, row + 16);
            writeln!(
                f,
                "x{a:<2} ({:>4}) = {:#0width$x}    x{b:<2} ({:>4}) = {:#0width$x}",
                abi::GPR_NAMES[a],
                self.read_gpr(a) & self.config.xlen.addr_mask(),
                abi::GPR_NAMES[b],
                self.read_gpr(b) & self.config.xlen.addr_mask(),
                width = digits + 2,
            )?;
        }
        if self.config.ext.f {
            for row in 0..16 {
                let (a, b) = (row, row + 16);
                writeln!(
                    f,
                    "f{a:<2} ({:>5}) = {:#018x}    f{b:<2} ({:>5}) = {:#018x}",
                    abi::FPR_NAMES[a],
                    self.fpr.read(a),
                    abi::FPR_NAMES[b],
                    self.fpr.read(b),
                )?;
            }
        }
        Ok(())
    }
}
