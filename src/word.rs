//! Word-at-a-time zero byte search.
//!
//! A machine word is tested for a zero byte with the classic borrow trick:
//! subtracting `0x01` from every byte borrows into bit 7 of a zero byte.
//!
//! - [`detect7`] is `(w - LOW) & HIGH`. It never misses a zero byte but also
//!   fires for bytes that already have bit 7 set, so it is only exact for
//!   7-bit-clean data.
//! - [`detect8`] additionally masks with `!w`, which clears bit 7 wherever the
//!   input byte had it set. The result is nonzero exactly when the word holds
//!   a zero byte.
//!
//! [`scan_word`] drives either test over a [`ChunkedView`]: one possibly
//! unaligned word at the start, then aligned words in a 32-byte unrolled stride.

use crate::view::ChunkedView;
use core::ops::{BitAnd, Not};

/// Bytes inspected per unrolled iteration of [`scan_word`], for every word width.
pub const STRIDE: usize = 32;

/// Unsigned machine word the scanner reads from a [`ChunkedView`].
pub trait Word: Copy + Eq + BitAnd<Output = Self> + Not<Output = Self> {
    /// Width in bytes.
    const BYTES: usize;
    /// `0x01` in every byte.
    const LOW: Self;
    /// `0x80` in every byte.
    const HIGH: Self;
    const ZERO: Self;
    /// Words tested per unrolled iteration.
    const UNROLL: usize = STRIDE / Self::BYTES;

    fn wrapping_sub(self, rhs: Self) -> Self;

    /// True if the byte at address offset `index` within the word is zero.
    fn byte_is_zero(self, index: usize) -> bool;

    /// Read the word at `offset` in native byte order.
    fn load(view: &ChunkedView<'_>, offset: usize) -> Self;
}

macro_rules! impl_word {
    ($ty:ty) => {
        impl Word for $ty {
            const BYTES: usize = core::mem::size_of::<$ty>();
            const LOW: Self = <$ty>::MAX / 0xFF;
            const HIGH: Self = Self::LOW << 7;
            const ZERO: Self = 0;

            #[inline(always)]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$ty>::wrapping_sub(self, rhs)
            }

            #[inline(always)]
            fn byte_is_zero(self, index: usize) -> bool {
                // Address order is little-endian significance on LE targets and
                // the reverse on BE targets.
                let shift = if cfg!(target_endian = "little") {
                    index * 8
                } else {
                    (Self::BYTES - 1 - index) * 8
                };
                self & (0xFF << shift) == 0
            }

            #[inline(always)]
            fn load(view: &ChunkedView<'_>, offset: usize) -> Self {
                <$ty>::from_ne_bytes(view.read_array(offset))
            }
        }
    };
}

impl_word!(u32);
impl_word!(u64);

/// Zero test sound only for bytes in `0x00..=0x7F`.
#[inline(always)]
pub fn detect7<W: Word>(word: W) -> W {
    word.wrapping_sub(W::LOW) & W::HIGH
}

/// Zero test sound for every byte value.
///
/// # Examples
/// ```
/// use faststrlen::word::{detect7, detect8};
/// let high = u64::from_ne_bytes([0xFF; 8]);
/// assert_ne!(detect7(high), 0);
/// assert_eq!(detect8(high), 0);
/// ```
#[inline(always)]
pub fn detect8<W: Word>(word: W) -> W {
    detect7(word) & !word
}

/// Which zero test drives a [`scan_word`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detector {
    /// [`detect7`].
    SevenBit,
    /// [`detect8`].
    EightBit,
}

impl Detector {
    #[inline(always)]
    pub fn flags<W: Word>(self, word: W) -> bool {
        let mask = match self {
            Self::SevenBit => detect7(word),
            Self::EightBit => detect8(word),
        };
        mask != W::ZERO
    }
}

/// Offset of the first zero byte of a word flagged by a detector.
///
/// Bytes are tested in address order. The last position is returned without
/// a test, so a word that holds no zero byte reports `W::BYTES - 1`.
#[inline(always)]
pub fn locate<W: Word>(word: W) -> usize {
    for index in 0..W::BYTES - 1 {
        if word.byte_is_zero(index) {
            return index;
        }
    }
    W::BYTES - 1
}

/// Scan for the first word flagged by `detector`, starting at `start`.
///
/// Returns the offset from `start` of the position [`locate`] reports in that
/// word. With [`Detector::EightBit`] this is exactly the distance to the first
/// zero byte. With [`Detector::SevenBit`] it never exceeds that distance.
pub fn scan_word<W: Word>(view: &ChunkedView<'_>, start: usize, detector: Detector) -> usize {
    let first: W = view.read_word_at(start);
    if detector.flags(first) {
        return locate(first);
    }

    // First aligned word strictly after `start`; never revisits `first`.
    let mut at = start + W::BYTES - view.misalignment(start, W::BYTES);
    loop {
        for k in 0..W::UNROLL {
            let offset = at + k * W::BYTES;
            let word: W = view.read_word_at(offset);
            if detector.flags(word) {
                return offset + locate(word) - start;
            }
        }
        at += STRIDE;
    }
}
