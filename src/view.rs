//! Chunked view over a readable byte span.
//!
//! Every reinterpretation of raw memory as words or vectors in this crate goes
//! through [`ChunkedView`]. A view built from a slice never reads outside that
//! slice: any chunk that would extend past the end is completed with zero
//! bytes, so the end of the slice acts as the terminator. A view built from a
//! raw pointer performs no bounds checks and relies on the caller contract
//! documented on [`ChunkedView::from_ptr`].

#![allow(unsafe_code)]

use crate::lanes::LANES;
use crate::word::Word;
use core::marker::PhantomData;

/// Typed word/vector accessor over caller-owned bytes.
#[derive(Clone, Copy, Debug)]
pub struct ChunkedView<'a> {
    base: *const u8,
    /// Number of readable bytes starting at `base`; `usize::MAX` when unbounded.
    limit: usize,
    _bytes: PhantomData<&'a [u8]>,
}

impl<'a> ChunkedView<'a> {
    /// Bounded view over `bytes`.
    ///
    /// # Examples
    /// ```
    /// use faststrlen::view::ChunkedView;
    /// let view = ChunkedView::new(b"ab");
    /// assert_eq!(view.read_vector_at(0)[..3], [b'a', b'b', 0]);
    /// ```
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            base: bytes.as_ptr(),
            limit: bytes.len(),
            _bytes: PhantomData,
        }
    }

    /// Unbounded view starting at `ptr`.
    ///
    /// # Safety
    ///
    /// - `ptr` must point to a zero byte at or after it, within one allocation.
    /// - At least [`LANES`] bytes past that zero byte must be readable in the same
    ///   allocation; scans read whole chunks and may overread into this padding.
    /// - The memory must not be written for the lifetime `'a`.
    pub unsafe fn from_ptr(ptr: *const u8) -> Self {
        Self {
            base: ptr,
            limit: usize::MAX,
            _bytes: PhantomData,
        }
    }

    /// Distance of `base + offset` past the previous multiple of `chunk`.
    ///
    /// `chunk` must be a power of two.
    #[inline(always)]
    pub fn misalignment(&self, offset: usize, chunk: usize) -> usize {
        debug_assert!(chunk.is_power_of_two());
        self.base.addr().wrapping_add(offset) & (chunk - 1)
    }

    /// Machine word made of the bytes at `offset..offset + W::BYTES`.
    #[inline(always)]
    pub fn read_word_at<W: Word>(&self, offset: usize) -> W {
        W::load(self, offset)
    }

    /// Vector register's worth of bytes at `offset..offset + LANES`.
    #[inline(always)]
    pub fn read_vector_at(&self, offset: usize) -> [u8; LANES] {
        self.read_array(offset)
    }

    #[inline(always)]
    pub(crate) fn read_array<const N: usize>(&self, offset: usize) -> [u8; N] {
        match offset.checked_add(N) {
            // SAFETY: `offset..offset + N` lies inside the readable span, either
            // checked against the slice length or guaranteed by `from_ptr`'s contract.
            Some(end) if end <= self.limit => unsafe {
                core::ptr::read_unaligned(self.base.add(offset).cast::<[u8; N]>())
            },
            _ => self.read_tail(offset),
        }
    }

    #[cold]
    fn read_tail<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut chunk = [0u8; N];
        if offset < self.limit {
            let avail = self.limit - offset;
            // SAFETY: the `avail` bytes from `offset` end exactly at the slice end.
            let tail = unsafe { core::slice::from_raw_parts(self.base.add(offset), avail) };
            chunk[..avail].copy_from_slice(tail);
        }
        chunk
    }
}
