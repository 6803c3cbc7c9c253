//! Instruction encoding structures and bit extraction utilities.
//!
//! The [`InstructionBits`] trait provides direct access to the fixed fields
//! of a 32-bit RISC-V instruction word; [`Decoded`] is the immutable
//! descriptor produced by the decoder and consumed by the executor.

/// Field extraction for raw 32-bit instruction words.
pub trait InstructionBits {
    /// Major opcode (bits 6:0).
    fn opcode(&self) -> u32;
    /// Destination register (bits 11:7).
    fn rd(&self) -> usize;
    /// First source register (bits 19:15).
    fn rs1(&self) -> usize;
    /// Second source register (bits 24:20).
    fn rs2(&self) -> usize;
    /// Third source register for R4-type FMA instructions (bits 31:27).
    fn rs3(&self) -> usize;
    /// Minor opcode (bits 14:12).
    fn funct3(&self) -> u32;
    /// Minor opcode (bits 31:25).
    fn funct7(&self) -> u32;
    /// AMO function code (bits 31:27).
    fn funct5(&self) -> u32;
    /// CSR address for SYSTEM instructions (bits 31:20).
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & 0x7F
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & 0x1F) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & 0x1F) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & 0x1F) as usize
    }

    #[inline(always)]
    fn rs3(&self) -> usize {
        ((self >> 27) & 0x1F) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & 0x7
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & 0x7F
    }

    #[inline(always)]
    fn funct5(&self) -> u32 {
        (self >> 27) & 0x1F
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> 20) & 0xFFF
    }
}

/// A decoded instruction descriptor.
///
/// Produced fresh per decode and never mutated. Compressed instructions are
/// expanded to their canonical 32-bit form before decoding; `width` records
/// the encoded size (2 or 4 bytes) so the executor advances the PC
/// correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Raw 32-bit instruction word (post-expansion for compressed forms).
    pub raw: u32,
    /// Major opcode.
    pub opcode: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Third source register index (R4-type only, 0 otherwise).
    pub rs3: usize,
    /// Minor opcode bits 14:12.
    pub funct3: u32,
    /// Minor opcode bits 31:25.
    pub funct7: u32,
    /// Sign-extended immediate per the opcode's format class (0 for R-type).
    pub imm: i64,
    /// Encoded instruction width in bytes (2 or 4).
    pub width: u64,
}
