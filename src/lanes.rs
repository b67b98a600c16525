//! 16-lane zero byte comparison.
//!
//! A lane detector compares each byte of a 16-byte chunk against zero and
//! packs the results into a [`LaneMask`]: bit `i` is set iff byte `i` is zero,
//! so a chunk without a zero byte yields exactly 0.

#![allow(unsafe_code)]

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

/// Bytes per vector chunk.
pub const LANES: usize = 16;

/// One bit per lane, lowest bit for the lowest address.
pub type LaneMask = u16;

/// Produces the [`LaneMask`] of one chunk.
pub type LaneDetector = fn(&[u8; LANES]) -> LaneMask;

/// SSE2 compare of all 16 lanes against zero.
///
/// SSE2 is part of the x86_64 baseline, so no runtime detection is needed.
#[cfg(target_arch = "x86_64")]
#[inline]
pub fn detect_lanes_sse2(chunk: &[u8; LANES]) -> LaneMask {
    // SAFETY: `chunk` is 16 readable bytes; `loadu` accepts any alignment.
    let v = unsafe { _mm_loadu_si128(chunk.as_ptr().cast::<__m128i>()) };
    let eq = unsafe { _mm_cmpeq_epi8(v, _mm_setzero_si128()) };
    // movemask fills only the low 16 bits.
    unsafe { _mm_movemask_epi8(eq) as LaneMask }
}

/// Byte-by-byte lane compare producing the same mask as the hardware path.
#[inline]
pub fn detect_lanes_portable(chunk: &[u8; LANES]) -> LaneMask {
    chunk
        .iter()
        .enumerate()
        .fold(0, |mask, (lane, &byte)| mask | (LaneMask::from(byte == 0) << lane))
}

/// Hardware lane detector for this target, if one exists.
#[cfg(target_arch = "x86_64")]
pub fn detect_lanes_native() -> Option<LaneDetector> {
    Some(detect_lanes_sse2 as LaneDetector)
}

/// Hardware lane detector for this target, if one exists.
#[cfg(not(target_arch = "x86_64"))]
pub fn detect_lanes_native() -> Option<LaneDetector> {
    None
}
