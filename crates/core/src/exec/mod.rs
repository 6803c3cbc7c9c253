//! Instruction execution.
//!
//! [`execute`] applies one decoded instruction's semantics to the CPU state:
//! register writes, memory effects, PC update, and trap signaling. Handlers
//! return an optional PC override; sequential flow advances the PC by the
//! encoded instruction width. ECALL and EBREAK leave the PC at the
//! signaling instruction so the harness can report it.
//!
//! Submodules group the semantics by extension family:
//! - [`base`]: RV32I/RV64I integer instructions.
//! - [`mul`]: M extension (multiply/divide with the architected sentinels).
//! - [`amo`]: A extension (LR/SC and AMOs).
//! - [`float`]: F/D/Zfh arithmetic, conversions, and FP loads/stores.
//! - [`bitmanip`]: Zba/Zbb/Zbc/Zbs.
//! - [`system`]: ECALL/EBREAK, CSR accesses, MRET/WFI.

/// A extension (atomics).
pub mod amo;
/// Base integer instructions.
pub mod base;
/// Zba/Zbb/Zbc/Zbs instructions.
pub mod bitmanip;
/// F/D/Zfh instructions.
pub mod float;
/// M extension instructions.
pub mod mul;
/// SYSTEM instructions.
pub mod system;

use crate::common::error::Fault;
use crate::core::state::CpuState;
use crate::isa::instruction::Decoded;
use crate::isa::privileged::opcodes as sys;
use crate::isa::rv64a;
use crate::isa::rv64f;
use crate::isa::rv64i::opcodes;

/// Builds the illegal-instruction fault for the current instruction.
pub(crate) const fn illegal(state: &CpuState, d: &Decoded) -> Fault {
    Fault::IllegalInstruction {
        raw: d.raw,
        pc: state.pc,
    }
}

/// Applies one instruction to the state.
///
/// On success the PC has been advanced (or redirected); on error the PC is
/// left at the faulting instruction.
///
/// # Errors
///
/// [`Fault::IllegalInstruction`], [`Fault::UnmappedPage`], or
/// [`Fault::MisalignedAccess`] depending on the failing operation.
pub fn execute(state: &mut CpuState, d: &Decoded) -> Result<(), Fault> {
    let next = match d.opcode {
        opcodes::OP_LUI
        | opcodes::OP_AUIPC
        | opcodes::OP_JAL
        | opcodes::OP_JALR
        | opcodes::OP_BRANCH
        | opcodes::OP_LOAD
        | opcodes::OP_STORE
        | opcodes::OP_IMM
        | opcodes::OP_REG
        | opcodes::OP_IMM_32
        | opcodes::OP_REG_32
        | opcodes::OP_MISC_MEM => base::execute(state, d)?,
        rv64a::OP_AMO => amo::execute(state, d)?,
        rv64f::OP_LOAD_FP | rv64f::OP_STORE_FP => float::execute_load_store(state, d)?,
        rv64f::OP_FP => float::execute_fp(state, d)?,
        rv64f::OP_FMADD | rv64f::OP_FMSUB | rv64f::OP_FNMSUB | rv64f::OP_FNMADD => {
            float::execute_fma(state, d)?
        }
        sys::OP_SYSTEM => system::execute(state, d)?,
        _ => return Err(illegal(state, d)),
    };

    let target = next.unwrap_or_else(|| state.pc.wrapping_add(d.width));
    state.pc = state.mask_addr(target);
    Ok(())
}
