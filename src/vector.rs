//! Vector-at-a-time zero byte search.

use crate::bitscan::LowestSetBit;
use crate::lanes::{LANES, LaneDetector};
use crate::view::ChunkedView;

/// Offset of the first zero byte, 16 lanes per step.
///
/// Chunks are read at `0, 16, 32, ...` from the view start without alignment
/// handling. The first nonzero lane mask ends the scan.
///
/// # Examples
/// ```
/// use faststrlen::bitscan::lowest_set_bit_native;
/// use faststrlen::lanes::detect_lanes_portable;
/// use faststrlen::vector::scan_vector;
/// use faststrlen::view::ChunkedView;
/// let view = ChunkedView::new(b"hello\0");
/// assert_eq!(scan_vector(&view, detect_lanes_portable, lowest_set_bit_native), 5);
/// ```
#[inline]
pub fn scan_vector(
    view: &ChunkedView<'_>,
    detect: LaneDetector,
    lowest_set_bit: LowestSetBit,
) -> usize {
    let mut offset = 0usize;
    loop {
        let mask = detect(&view.read_vector_at(offset));
        if mask != 0 {
            return offset + lowest_set_bit(u32::from(mask)) as usize;
        }
        offset += LANES;
    }
}
