//! Bit-level helpers shared by the decoder and executor.

/// Sign-extends the low `bits` bits of `val` to a signed 64-bit value.
///
/// # Arguments
///
/// * `val`  - Raw field value with the payload in its low bits.
/// * `bits` - Width of the payload in bits (1..=32).
#[inline(always)]
pub fn sign_extend(val: u32, bits: u32) -> i64 {
    let shift = 32 - bits;
    (((val << shift) as i32) >> shift) as i64
}

/// Sign-extends a 32-bit value to the 64-bit register representation.
///
/// Used both for W-variant results on RV64 and for every register write when
/// XLEN=32, where registers hold the 32-bit value sign-extended. Keeping the
/// sign-extended form preserves both signed and unsigned comparison order, so
/// one comparison path serves both word widths.
#[inline(always)]
pub fn sext32(val: u32) -> u64 {
    val as i32 as i64 as u64
}
