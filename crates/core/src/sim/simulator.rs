//! The step/run control loop.
//!
//! [`Simulator`] owns the [`CpuState`] and drives the fetch/decode/execute
//! cycle. One step is one retired (or faulted) instruction. The loop never
//! panics on guest misbehavior: every fault is converted into a halt cause
//! on the state, and the simulator parks in a halted run state for the
//! harness to inspect.

use crate::common::error::Fault;
use crate::config::{Config, ExtensionSet};
use crate::core::state::{CpuState, HaltCause};
use crate::exec;
use crate::isa::{decode, rvc};
use crate::mem::Memory;
use crate::sim::loader;
use tracing::{debug, trace};

/// Control-loop status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, no instruction executed yet.
    Ready,
    /// At least one step taken; the last one retired normally.
    Running,
    /// Halted by a trap (ECALL, EBREAK, illegal instruction, memory fault).
    /// Terminal: further steps are no-ops.
    HaltedTrap,
    /// A step budget ran out. Calling `step` or `run` again resumes.
    HaltedBudget,
}

/// A simulator instance: architectural state plus the control loop.
#[derive(Debug)]
pub struct Simulator {
    state: CpuState,
    run_state: RunState,
}

impl Simulator {
    /// Creates a simulator over a pre-populated memory.
    ///
    /// The page under the configured stack address is mapped so that the
    /// first push succeeds without a prior store.
    pub fn new(mut mem: Memory, entry: u64, config: Config) -> Self {
        if config.stack_addr > 0 {
            mem.store_u8(config.stack_addr - 1, 0);
        }
        Self {
            state: CpuState::new(mem, entry, config),
            run_state: RunState::Ready,
        }
    }

    /// Creates a simulator from ELF executable bytes, taking the word width
    /// from the image.
    ///
    /// # Errors
    ///
    /// [`Fault::MalformedImage`] if the bytes are not a loadable RISC-V
    /// executable.
    pub fn from_elf(bytes: &[u8], ext: ExtensionSet) -> Result<Self, Fault> {
        let image = loader::load_elf(bytes)?;
        let config = Config::new(image.xlen, ext);
        Ok(Self::new(image.mem, image.entry, config))
    }

    /// The architectural state.
    pub const fn state(&self) -> &CpuState {
        &self.state
    }

    /// Current control-loop status.
    pub const fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Executes one instruction and returns the resulting state.
    ///
    /// Stepping a trap-halted simulator does nothing; stepping after a
    /// budget halt resumes.
    pub fn step(&mut self) -> &CpuState {
        if self.run_state == RunState::HaltedTrap {
            return &self.state;
        }
        self.run_state = RunState::Running;
        self.state.halt = None;

        match self.step_inner() {
            Ok(()) => {
                // ECALL/EBREAK retire normally but still park the loop.
                if self.state.halt.is_some() {
                    self.run_state = RunState::HaltedTrap;
                }
            }
            Err(fault) => {
                debug!(%fault, pc = self.state.pc, "trap");
                self.state.halt = Some(match fault {
                    Fault::IllegalInstruction { .. } => HaltCause::IllegalInstruction,
                    _ => HaltCause::MemoryFault,
                });
                self.run_state = RunState::HaltedTrap;
            }
        }
        &self.state
    }

    fn step_inner(&mut self) -> Result<(), Fault> {
        let pc = self.state.pc;
        let low = self.state.mem.load_u16(pc)?;

        let (raw, width) = if low & 0b11 == 0b11 {
            (self.state.mem.load_u32(pc)?, 4)
        } else {
            if !self.state.config.ext.c {
                return Err(Fault::IllegalInstruction {
                    raw: u32::from(low),
                    pc,
                });
            }
            let expanded = rvc::expand(low, self.state.config.xlen);
            if expanded == 0 {
                return Err(Fault::IllegalInstruction {
                    raw: u32::from(low),
                    pc,
                });
            }
            (expanded, 2)
        };

        let mut d = decode::decode(raw, pc)?;
        d.width = width;
        trace!(pc, raw, "executing");
        exec::execute(&mut self.state, &d)
    }

    /// Runs until a trap halts the loop or the optional step budget is
    /// exhausted, returning the final state.
    ///
    /// `run(None)` runs until a trap. `run(Some(n))` executes at most `n`
    /// steps and parks in [`RunState::HaltedBudget`] if no trap occurred.
    pub fn run(&mut self, n_steps: Option<u64>) -> &CpuState {
        let mut remaining = n_steps;
        loop {
            if remaining == Some(0) {
                self.run_state = RunState::HaltedBudget;
                break;
            }
            let _ = self.step();
            if self.run_state == RunState::HaltedTrap {
                break;
            }
            if let Some(r) = remaining.as_mut() {
                *r -= 1;
            }
        }
        &self.state
    }
}
