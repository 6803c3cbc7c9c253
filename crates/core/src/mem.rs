//! Sparse page-backed memory.
//!
//! Backing storage is a mapping from page index (`address / 64 KiB`) to a
//! fixed-size page buffer, allocated lazily on first store. The address space
//! is conceptually the full native word range; memory consumption is
//! proportional to touched pages only.
//!
//! Loads from pages that were never stored to raise
//! [`Fault::UnmappedPage`]; uninitialized reads model unmapped memory and
//! trap instead of silently returning zero. A single access is bounded to
//! 64 KiB and therefore spans at most two pages; cross-page transfers split
//! at the byte offset where the boundary falls. An access ending past the
//! top of the address space wraps around to page zero, so a load there
//! faults unless page zero was stored to.

use crate::common::error::Fault;
use std::collections::HashMap;
use tracing::trace;

/// Page size in bytes (64 KiB).
pub const PAGE_SIZE: u64 = 64 * 1024;

/// Number of bits to shift to convert an address to a page index.
pub const PAGE_SHIFT: u64 = 16;

/// Maximum size of a single load or store, in bytes.
pub const MAX_ACCESS: usize = PAGE_SIZE as usize;

/// Sparse byte-addressable memory.
#[derive(Debug, Default)]
pub struct Memory {
    pages: HashMap<u64, Box<[u8; PAGE_SIZE as usize]>>,
}

impl Memory {
    /// Creates an empty memory with no pages mapped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages currently allocated.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the page containing `addr` has been allocated.
    pub fn is_mapped(&self, addr: u64) -> bool {
        self.pages.contains_key(&(addr >> PAGE_SHIFT))
    }

    /// Loads `size` bytes starting at `addr`.
    ///
    /// `size` must be at most [`MAX_ACCESS`]; a size of zero is a legal no-op
    /// returning an empty vector.
    ///
    /// # Errors
    ///
    /// [`Fault::UnmappedPage`] if any covered page was never stored to.
    pub fn load(&self, addr: u64, size: usize) -> Result<Vec<u8>, Fault> {
        debug_assert!(size <= MAX_ACCESS, "load size {size} exceeds one page");
        if size == 0 {
            return Ok(Vec::new());
        }

        let first = addr >> PAGE_SHIFT;
        let last = addr.wrapping_add(size as u64 - 1) >> PAGE_SHIFT;
        let offset = (addr & (PAGE_SIZE - 1)) as usize;

        let lo = self.page(first, addr)?;
        if first == last {
            return Ok(lo[offset..offset + size].to_vec());
        }

        // The access straddles a page boundary: take the tail of the first
        // page and the head of the second.
        let split = PAGE_SIZE as usize - offset;
        let hi = self.page(last, last << PAGE_SHIFT)?;
        let mut out = Vec::with_capacity(size);
        out.extend_from_slice(&lo[offset..]);
        out.extend_from_slice(&hi[..size - split]);
        Ok(out)
    }

    /// Stores `data` starting at `addr`, allocating and zero-filling any page
    /// first touched by this write.
    ///
    /// `data.len()` must be at most [`MAX_ACCESS`]; an empty slice is a legal
    /// no-op. Always succeeds for valid sizes.
    pub fn store(&mut self, addr: u64, data: &[u8]) {
        debug_assert!(
            data.len() <= MAX_ACCESS,
            "store size {} exceeds one page",
            data.len()
        );
        if data.is_empty() {
            return;
        }

        let first = addr >> PAGE_SHIFT;
        let last = addr.wrapping_add(data.len() as u64 - 1) >> PAGE_SHIFT;
        let offset = (addr & (PAGE_SIZE - 1)) as usize;

        if first == last {
            let page = self.page_mut(first);
            page[offset..offset + data.len()].copy_from_slice(data);
            return;
        }

        let split = PAGE_SIZE as usize - offset;
        let (head, tail) = data.split_at(split);
        self.page_mut(first)[offset..].copy_from_slice(head);
        self.page_mut(last)[..tail.len()].copy_from_slice(tail);
    }

    fn page(&self, index: u64, fault_addr: u64) -> Result<&[u8; PAGE_SIZE as usize], Fault> {
        self.pages
            .get(&index)
            .map(AsRef::as_ref)
            .ok_or(Fault::UnmappedPage { addr: fault_addr })
    }

    fn page_mut(&mut self, index: u64) -> &mut [u8; PAGE_SIZE as usize] {
        self.pages.entry(index).or_insert_with(|| {
            trace!(page = index, "allocating page");
            Box::new([0u8; PAGE_SIZE as usize])
        })
    }

    /// Loads one byte.
    ///
    /// # Errors
    ///
    /// [`Fault::UnmappedPage`] if the page is unmapped.
    pub fn load_u8(&self, addr: u64) -> Result<u8, Fault> {
        Ok(self.load(addr, 1)?[0])
    }

    /// Loads a little-endian u16.
    ///
    /// # Errors
    ///
    /// [`Fault::UnmappedPage`] if any covered page is unmapped.
    pub fn load_u16(&self, addr: u64) -> Result<u16, Fault> {
        let b = self.load(addr, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Loads a little-endian u32.
    ///
    /// # Errors
    ///
    /// [`Fault::UnmappedPage`] if any covered page is unmapped.
    pub fn load_u32(&self, addr: u64) -> Result<u32, Fault> {
        let b = self.load(addr, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Loads a little-endian u64.
    ///
    /// # Errors
    ///
    /// [`Fault::UnmappedPage`] if any covered page is unmapped.
    pub fn load_u64(&self, addr: u64) -> Result<u64, Fault> {
        let b = self.load(addr, 8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Stores one byte.
    pub fn store_u8(&mut self, addr: u64, val: u8) {
        self.store(addr, &[val]);
    }

    /// Stores a little-endian u16.
    pub fn store_u16(&mut self, addr: u64, val: u16) {
        self.store(addr, &val.to_le_bytes());
    }

    /// Stores a little-endian u32.
    pub fn store_u32(&mut self, addr: u64, val: u32) {
        self.store(addr, &val.to_le_bytes());
    }

    /// Stores a little-endian u64.
    pub fn store_u64(&mut self, addr: u64, val: u64) {
        self.store(addr, &val.to_le_bytes());
    }
}
