//! SYSTEM opcode constants (ECALL, EBREAK, CSR accesses, MRET).

/// Major opcode for SYSTEM instructions.
pub const OP_SYSTEM: u32 = 0b1110011;

/// Full instruction word for ECALL.
pub const ECALL: u32 = 0x0000_0073;

/// Full instruction word for EBREAK.
pub const EBREAK: u32 = 0x0010_0073;

/// Full instruction word for MRET.
pub const MRET: u32 = 0x3020_0073;

/// Full instruction word for WFI.
pub const WFI: u32 = 0x1050_0073;

/// CSR read/write (funct3).
pub const CSRRW: u32 = 0b001;
/// CSR read and set bits (funct3).
pub const CSRRS: u32 = 0b010;
/// CSR read and clear bits (funct3).
pub const CSRRC: u32 = 0b011;
/// CSR read/write immediate (funct3).
pub const CSRRWI: u32 = 0b101;
/// CSR read and set bits immediate (funct3).
pub const CSRRSI: u32 = 0b110;
/// CSR read and clear bits immediate (funct3).
pub const CSRRCI: u32 = 0b111;

/// Linux/newlib exit syscall number, used by the conformance-test
/// completion protocol (`a7 == 93`).
pub const SYS_EXIT: u64 = 93;
