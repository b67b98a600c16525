//! Strategy selection and the two-pass word composite.
//!
//! [`fast_length`] first runs the cheap 7-bit scan, which can only stop at or
//! before the terminator, then resumes from that offset with the exact 8-bit
//! scan. [`Scanner`] resolves a [`ScanConfig`] once into one of these paths or
//! the vector path.

use crate::bitscan::{LowestSetBit, lowest_set_bit_native, lowest_set_bit_portable};
use crate::config::{BitScan, ChunkSize, LaneBackend, ScanConfig, Strategy};
use crate::lanes::{LaneDetector, detect_lanes_native, detect_lanes_portable};
use crate::vector::scan_vector;
use crate::view::ChunkedView;
use crate::word::{Detector, Word, scan_word};

/// Composite word scan: 7-bit hint followed by an 8-bit pass from the hint.
///
/// The 7-bit pass never misses a zero byte, and a word it flags without
/// holding one reports a position inside that word. The hint is therefore a
/// prefix free of zero bytes and the 8-bit pass only has to cover the rest.
///
/// # Examples
/// ```
/// use faststrlen::scanner::fast_length;
/// use faststrlen::view::ChunkedView;
/// assert_eq!(fast_length::<u64>(&ChunkedView::new(&[0x41, 0xC3, 0x00])), 2);
/// ```
#[inline]
pub fn fast_length<W: Word>(view: &ChunkedView<'_>) -> usize {
    let len7 = scan_word::<W>(view, 0, Detector::SevenBit);
    let len8 = scan_word::<W>(view, len7, Detector::EightBit);
    len7 + len8
}

#[derive(Clone, Copy)]
enum Plan {
    Word(ChunkSize),
    Vector {
        detect: LaneDetector,
        lowest_set_bit: LowestSetBit,
    },
}

/// Configured length scanner.
///
/// Construction resolves the configuration; each call is a pure read of the
/// buffer, so a `Scanner` can be shared freely between threads.
#[derive(Clone, Copy)]
pub struct Scanner {
    config: ScanConfig,
    plan: Plan,
}

impl Scanner {
    /// Word strategy at the native chunk size, without logging.
    pub const fn word() -> Self {
        Self {
            config: ScanConfig::word(),
            plan: Plan::Word(ChunkSize::NATIVE),
        }
    }

    /// Resolve `config` into a scanner.
    ///
    /// The vector strategy with [`LaneBackend::Native`] falls back to the word
    /// strategy on targets without a 128-bit lane compare.
    pub fn new(config: ScanConfig) -> Self {
        let plan = match config.strategy {
            Strategy::Word => Plan::Word(config.chunk_size),
            Strategy::Vector => {
                let detect = match config.lanes {
                    LaneBackend::Native => detect_lanes_native(),
                    LaneBackend::Portable => Some(detect_lanes_portable as LaneDetector),
                };
                let lowest_set_bit: LowestSetBit = match config.bit_scan {
                    BitScan::Native => lowest_set_bit_native,
                    BitScan::Portable => lowest_set_bit_portable,
                };
                match detect {
                    Some(detect) => Plan::Vector {
                        detect,
                        lowest_set_bit,
                    },
                    None => {
                        tracing::warn!(
                            chunk_size = config.chunk_size.bytes(),
                            "128-bit lane compare unavailable on this target, using word scan"
                        );
                        Plan::Word(config.chunk_size)
                    }
                }
            }
        };

        let scanner = Self { config, plan };
        tracing::debug!(
            strategy = %scanner.strategy(),
            chunk_size = config.chunk_size.bytes(),
            lanes = %config.lanes,
            bit_scan = %config.bit_scan,
            "Configured zero byte scanner"
        );
        scanner
    }

    /// Scanner configured from `FASTSTRLEN_*` environment variables.
    pub fn from_env() -> crate::Result<Self> {
        ScanConfig::from_env().map(Self::new)
    }

    /// Configuration this scanner was built from.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Strategy actually in use, after any fallback.
    pub fn strategy(&self) -> Strategy {
        match self.plan {
            Plan::Word(_) => Strategy::Word,
            Plan::Vector { .. } => Strategy::Vector,
        }
    }

    /// Number of bytes before the first zero byte, or `bytes.len()` if none.
    ///
    /// # Examples
    /// ```
    /// use faststrlen::config::ScanConfig;
    /// use faststrlen::scanner::Scanner;
    /// let scanner = Scanner::new(ScanConfig::vector());
    /// assert_eq!(scanner.length(b"hello\0world"), 5);
    /// assert_eq!(scanner.length(b"hello"), 5);
    /// ```
    #[inline]
    pub fn length(&self, bytes: &[u8]) -> usize {
        self.length_in(&ChunkedView::new(bytes))
    }

    /// Number of bytes before the zero byte terminating `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must satisfy the contract of [`ChunkedView::from_ptr`]: a zero byte
    /// at or after it, followed by at least 16 readable bytes.
    #[inline]
    pub unsafe fn length_raw(&self, ptr: *const u8) -> usize {
        // SAFETY: forwarded caller contract.
        let view = unsafe { ChunkedView::from_ptr(ptr) };
        self.length_in(&view)
    }

    #[inline]
    fn length_in(&self, view: &ChunkedView<'_>) -> usize {
        match self.plan {
            Plan::Word(ChunkSize::Four) => fast_length::<u32>(view),
            Plan::Word(ChunkSize::Eight) => fast_length::<u64>(view),
            Plan::Vector {
                detect,
                lowest_set_bit,
            } => scan_vector(view, detect, lowest_set_bit),
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::word()
    }
}

impl core::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .field("strategy", &self.strategy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_len(bytes: &[u8]) -> usize {
        bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
    }

    #[test]
    fn test_fast_length_high_bit_before_terminator() {
        let bytes = [0x41, 0xC3, 0x00];
        let view = ChunkedView::new(&bytes);
        assert_eq!(fast_length::<u64>(&view), 2);
        assert_eq!(fast_length::<u32>(&view), 2);
    }

    #[test]
    fn test_fast_length_false_positive_far_from_terminator() {
        // 7-bit pass stops in the first word; the 8-bit pass must carry on.
        let mut bytes = vec![b'a'; 100];
        bytes[0] = 0xC3;
        bytes[9] = 0xE9;
        bytes[77] = 0;
        let view = ChunkedView::new(&bytes);
        assert!(scan_word::<u64>(&view, 0, Detector::SevenBit) < 77);
        assert_eq!(fast_length::<u64>(&view), 77);
        assert_eq!(fast_length::<u32>(&view), 77);
    }

    #[test]
    fn test_strategy_resolution() {
        assert_eq!(Scanner::new(ScanConfig::word()).strategy(), Strategy::Word);
        let portable = ScanConfig::vector().with_lanes(LaneBackend::Portable);
        assert_eq!(Scanner::new(portable).strategy(), Strategy::Vector);

        let native = Scanner::new(ScanConfig::vector());
        if detect_lanes_native().is_some() {
            assert_eq!(native.strategy(), Strategy::Vector);
        } else {
            assert_eq!(native.strategy(), Strategy::Word);
        }
        assert_eq!(native.config(), &ScanConfig::vector());
    }

    #[test]
    fn test_default_is_word() {
        let scanner = Scanner::default();
        assert_eq!(scanner.strategy(), Strategy::Word);
        assert_eq!(scanner.config(), &ScanConfig::default());
    }

    #[test]
    fn test_every_config_agrees() {
        let mut bytes: Vec<u8> = (1..=255u8).cycle().take(700).collect();
        for nul in [0usize, 1, 7, 8, 31, 32, 33, 255, 256, 511, 699] {
            let saved = bytes[nul];
            bytes[nul] = 0;
            for config in all_configs() {
                let scanner = Scanner::new(config);
                assert_eq!(scanner.length(&bytes), nul, "{config:?}");
                assert_eq!(scanner.length(&bytes[1..]), reference_len(&bytes[1..]));
            }
            bytes[nul] = saved;
        }
    }

    #[test]
    fn test_length_raw_padded_buffer() {
        let mut buf = b"raw pointer input".to_vec();
        buf.extend_from_slice(&[0; 32]);
        for config in all_configs() {
            let scanner = Scanner::new(config);
            assert_eq!(unsafe { scanner.length_raw(buf.as_ptr()) }, 17);
        }
    }

    fn all_configs() -> Vec<ScanConfig> {
        let mut configs = Vec::new();
        for chunk_size in [ChunkSize::Four, ChunkSize::Eight] {
            configs.push(ScanConfig::word().with_chunk_size(chunk_size));
        }
        for lanes in [LaneBackend::Native, LaneBackend::Portable] {
            for bit_scan in [BitScan::Native, BitScan::Portable] {
                configs.push(
                    ScanConfig::vector()
                        .with_lanes(lanes)
                        .with_bit_scan(bit_scan),
                );
            }
        }
        configs
    }
}
