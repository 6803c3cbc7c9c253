//! ELF executable loading.
//!
//! Accepts little-endian RISC-V executables, copies every loadable segment
//! into the sparse memory, and zero-fills the BSS tail (the span between a
//! segment's file size and its memory size). Anything else, wrong
//! architecture, wrong endianness, a relocatable or shared object, parse
//! failures, is a [`Fault::MalformedImage`].

use crate::common::error::Fault;
use crate::config::Xlen;
use crate::mem::{MAX_ACCESS, Memory};
use object::{Architecture, Object, ObjectKind, ObjectSegment};
use tracing::debug;

/// A loaded executable: populated memory, entry point, and the word width
/// the image was compiled for.
#[derive(Debug)]
pub struct Image {
    /// Memory populated with every loadable segment.
    pub mem: Memory,
    /// ELF entry point.
    pub entry: u64,
    /// Word width from the ELF class.
    pub xlen: Xlen,
}

/// Writes `data` at `addr`, splitting into page-bounded chunks.
fn store_chunked(mem: &mut Memory, addr: u64, data: &[u8]) {
    for (i, chunk) in data.chunks(MAX_ACCESS).enumerate() {
        mem.store(addr + (i * MAX_ACCESS) as u64, chunk);
    }
}

/// Zero-fills `len` bytes at `addr`, mapping the covered pages.
fn zero_fill(mem: &mut Memory, addr: u64, len: u64) {
    let zeros = [0u8; MAX_ACCESS];
    let mut offset = 0;
    while offset < len {
        let chunk = (len - offset).min(MAX_ACCESS as u64);
        mem.store(addr + offset, &zeros[..chunk as usize]);
        offset += chunk;
    }
}

/// Parses an ELF executable and populates a fresh memory from its segments.
///
/// # Errors
///
/// [`Fault::MalformedImage`] if the bytes are not a little-endian RISC-V
/// executable or a segment cannot be read.
pub fn load_elf(bytes: &[u8]) -> Result<Image, Fault> {
    let obj =
        object::File::parse(bytes).map_err(|e| Fault::MalformedImage(e.to_string()))?;

    let xlen = match obj.architecture() {
        Architecture::Riscv32 => Xlen::Rv32,
        Architecture::Riscv64 => Xlen::Rv64,
        other => {
            return Err(Fault::MalformedImage(format!(
                "unsupported architecture {other:?}"
            )));
        }
    };
    if !obj.is_little_endian() {
        return Err(Fault::MalformedImage("big-endian image".into()));
    }
    if obj.kind() != ObjectKind::Executable {
        return Err(Fault::MalformedImage(format!(
            "not an executable ({:?})",
            obj.kind()
        )));
    }

    let mut mem = Memory::new();
    for segment in obj.segments() {
        let data = segment
            .data()
            .map_err(|e| Fault::MalformedImage(e.to_string()))?;
        let addr = segment.address();
        store_chunked(&mut mem, addr, data);
        let size = segment.size();
        if size > data.len() as u64 {
            zero_fill(&mut mem, addr + data.len() as u64, size - data.len() as u64);
        }
        debug!(addr, size, file_size = data.len(), "loaded segment");
    }

    let entry = obj.entry() & xlen.addr_mask();
    debug!(entry, ?xlen, pages = mem.page_count(), "image loaded");
    Ok(Image { mem, entry, xlen })
}
