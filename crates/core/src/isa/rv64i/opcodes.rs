//! Base integer major opcodes.

/// Load instructions (LB, LH, LW, LD, LBU, LHU, LWU).
pub const OP_LOAD: u32 = 0b0000011;
/// Fence instructions (FENCE, FENCE.I).
pub const OP_MISC_MEM: u32 = 0b0001111;
/// Integer register-immediate instructions (ADDI, SLTI, ...).
pub const OP_IMM: u32 = 0b0010011;
/// Add upper immediate to PC.
pub const OP_AUIPC: u32 = 0b0010111;
/// 32-bit register-immediate instructions on RV64 (ADDIW, SLLIW, ...).
pub const OP_IMM_32: u32 = 0b0011011;
/// Store instructions (SB, SH, SW, SD).
pub const OP_STORE: u32 = 0b0100011;
/// Integer register-register instructions (ADD, SUB, ...).
pub const OP_REG: u32 = 0b0110011;
/// Load upper immediate.
pub const OP_LUI: u32 = 0b0110111;
/// 32-bit register-register instructions on RV64 (ADDW, SUBW, ...).
pub const OP_REG_32: u32 = 0b0111011;
/// Conditional branches (BEQ, BNE, BLT, BGE, BLTU, BGEU).
pub const OP_BRANCH: u32 = 0b1100011;
/// Jump and link register.
pub const OP_JALR: u32 = 0b1100111;
/// Jump and link.
pub const OP_JAL: u32 = 0b1101111;
