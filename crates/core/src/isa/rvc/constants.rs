//! RVC encoding constants.
//!
//! A compressed instruction is identified by its quadrant (low two bits,
//! never 0b11) and a 3-bit funct3 field in bits 15:13.

/// Quadrant 0 (low bits 0b00): stack-pointer-relative allocation and
/// register-relative loads/stores of the popular registers x8-x15.
pub const QUADRANT_0: u16 = 0b00;

/// Quadrant 1 (low bits 0b01): immediates, control flow, and the
/// register-register ALU group.
pub const QUADRANT_1: u16 = 0b01;

/// Quadrant 2 (low bits 0b10): shifts, stack-pointer-relative loads/stores,
/// and the JR/MV/ADD group.
pub const QUADRANT_2: u16 = 0b10;

/// Quadrant 0 funct3 values.
pub mod q0 {
    /// ADDI4SPN: allocate on the stack.
    pub const C_ADDI4SPN: u16 = 0b000;
    /// FLD: load double-precision float.
    pub const C_FLD: u16 = 0b001;
    /// LW: load word.
    pub const C_LW: u16 = 0b010;
    /// LD on RV64; FLW on RV32.
    pub const C_LD_FLW: u16 = 0b011;
    /// FSD: store double-precision float.
    pub const C_FSD: u16 = 0b101;
    /// SW: store word.
    pub const C_SW: u16 = 0b110;
    /// SD on RV64; FSW on RV32.
    pub const C_SD_FSW: u16 = 0b111;
}

/// Quadrant 1 funct3 values.
pub mod q1 {
    /// ADDI (NOP when rd = 0).
    pub const C_ADDI: u16 = 0b000;
    /// ADDIW on RV64; JAL on RV32.
    pub const C_ADDIW_JAL: u16 = 0b001;
    /// LI: load immediate.
    pub const C_LI: u16 = 0b010;
    /// LUI, or ADDI16SP when rd = 2.
    pub const C_LUI_ADDI16SP: u16 = 0b011;
    /// The SRLI/SRAI/ANDI/register-ALU group.
    pub const C_MISC_ALU: u16 = 0b100;
    /// J: unconditional jump.
    pub const C_J: u16 = 0b101;
    /// BEQZ: branch if zero.
    pub const C_BEQZ: u16 = 0b110;
    /// BNEZ: branch if nonzero.
    pub const C_BNEZ: u16 = 0b111;
}

/// Quadrant 2 funct3 values.
pub mod q2 {
    /// SLLI.
    pub const C_SLLI: u16 = 0b000;
    /// FLDSP: load double from the stack.
    pub const C_FLDSP: u16 = 0b001;
    /// LWSP: load word from the stack.
    pub const C_LWSP: u16 = 0b010;
    /// LDSP on RV64; FLWSP on RV32.
    pub const C_LDSP_FLWSP: u16 = 0b011;
    /// The JR/MV/EBREAK/JALR/ADD group.
    pub const C_JR_MV_ADD: u16 = 0b100;
    /// FSDSP: store double to the stack.
    pub const C_FSDSP: u16 = 0b101;
    /// SWSP: store word to the stack.
    pub const C_SWSP: u16 = 0b110;
    /// SDSP on RV64; FSWSP on RV32.
    pub const C_SDSP_FSWSP: u16 = 0b111;
}
