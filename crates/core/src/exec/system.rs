//! SYSTEM instructions: environment calls, breakpoints, CSR accesses, and
//! the small privileged subset test prologues rely on.
//!
//! ECALL and EBREAK do not transfer control anywhere. They record a halt
//! cause and leave the PC at the instruction, so the harness can read the
//! argument registers and the faulting address as-is.

use crate::common::error::Fault;
use crate::core::arch::csr;
use crate::core::state::{CpuState, HaltCause};
use crate::exec::illegal;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::privileged::opcodes;

/// Executes a SYSTEM-opcode instruction.
pub fn execute(state: &mut CpuState, d: &Decoded) -> Result<Option<u64>, Fault> {
    if d.funct3 == 0 {
        return match d.raw {
            opcodes::ECALL => {
                state.halt = Some(HaltCause::EnvironmentCall);
                Ok(Some(state.pc))
            }
            opcodes::EBREAK => {
                state.halt = Some(HaltCause::Breakpoint);
                Ok(Some(state.pc))
            }
            opcodes::MRET => Ok(Some(state.csr.read(csr::MEPC))),
            // Nothing to wait for on a single hart.
            opcodes::WFI => Ok(None),
            _ => Err(illegal(state, d)),
        };
    }

    let addr = d.raw.csr();
    // Immediate forms read the 5-bit zero-extended uimm from the rs1 field.
    let src = match d.funct3 {
        opcodes::CSRRW | opcodes::CSRRS | opcodes::CSRRC => state.read_gpr(d.rs1),
        _ => d.rs1 as u64,
    };
    let old = state.csr.read(addr);
    let new = match d.funct3 {
        opcodes::CSRRW | opcodes::CSRRWI => Some(src),
        // Set/clear forms skip the write when the mask source is x0/uimm 0.
        opcodes::CSRRS | opcodes::CSRRSI => (d.rs1 != 0).then_some(old | src),
        opcodes::CSRRC | opcodes::CSRRCI => (d.rs1 != 0).then_some(old & !src),
        _ => return Err(illegal(state, d)),
    };
    if let Some(val) = new {
        state.csr.write(addr, val);
    }
    state.write_gpr(d.rd, old);
    Ok(None)
}
