use faststrlen::{
    BitScan, ChunkSize, LaneBackend, ScanConfig, Scanner, length_bounded, length_fast,
    length_fast_raw,
};
use proptest::prelude::*;
use rstest::rstest;

fn reference_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

fn all_configs() -> Vec<ScanConfig> {
    vec![
        ScanConfig::word().with_chunk_size(ChunkSize::Four),
        ScanConfig::word().with_chunk_size(ChunkSize::Eight),
        ScanConfig::vector(),
        ScanConfig::vector().with_lanes(LaneBackend::Portable),
        ScanConfig::vector().with_bit_scan(BitScan::Portable),
        ScanConfig::vector()
            .with_lanes(LaneBackend::Portable)
            .with_bit_scan(BitScan::Portable),
    ]
}

/// Buffer starting at the requested offset from an 8-byte boundary.
struct Shifted {
    store: Vec<u64>,
    shift: usize,
    len: usize,
}

impl Shifted {
    fn new(content: &[u8], shift: usize) -> Self {
        let len = shift + content.len() + 32;
        let mut store = vec![0u64; len.div_ceil(8)];
        let bytes = bytes_mut(&mut store);
        bytes[shift..shift + content.len()].copy_from_slice(content);
        Self { store, shift, len }
    }

    fn bytes(&self) -> &[u8] {
        let all = unsafe { std::slice::from_raw_parts(self.store.as_ptr().cast::<u8>(), self.len) };
        &all[self.shift..]
    }
}

fn bytes_mut(store: &mut [u64]) -> &mut [u8] {
    unsafe { std::slice::from_raw_parts_mut(store.as_mut_ptr().cast::<u8>(), store.len() * 8) }
}

#[rstest]
#[case::hello(b"hello\0".as_slice(), 5)]
#[case::empty(b"\0".as_slice(), 0)]
#[case::thirty_one(b"abcdefghijklmnopqrstuvwxyz01234\0".as_slice(), 31)]
#[case::high_bit(&[0x41u8, 0xC3, 0x00], 2)]
#[case::utf8(b"caf\xC3\xA9 cr\xC3\xA8me\0tail".as_slice(), 12)]
#[case::all_high(&[0xFFu8; 40], 40)]
#[case::no_terminator(b"no terminator here".as_slice(), 18)]
fn length_matches_for_every_config(#[case] input: &[u8], #[case] expected: usize) {
    assert_eq!(length_fast(input), expected);
    for config in all_configs() {
        let scanner = Scanner::new(config);
        assert_eq!(scanner.length(input), expected, "{config:?}");
    }
}

#[rstest]
fn zero_on_chunk_boundary(
    #[values(8, 16, 24, 32, 40, 48, 64, 96, 128)] nul: usize,
    #[values(0, 1, 3, 7)] shift: usize,
) {
    let mut content = vec![b'm'; nul + 40];
    content[nul] = 0;
    let buf = Shifted::new(&content, shift);
    for config in all_configs() {
        assert_eq!(Scanner::new(config).length(buf.bytes()), nul, "{config:?}");
    }
}

#[rstest]
fn raw_pointer_every_alignment(#[values(0, 1, 2, 3, 4, 5, 6, 7)] shift: usize) {
    let content = b"raw \xC3\xA9 pointer string with some length\0";
    let buf = Shifted::new(content, shift);
    let expected = content.len() - 1;
    assert_eq!(unsafe { length_fast_raw(buf.bytes().as_ptr().cast()) }, expected);
    for config in all_configs() {
        let scanner = Scanner::new(config);
        assert_eq!(unsafe { scanner.length_raw(buf.bytes().as_ptr()) }, expected);
    }
}

#[test]
fn bounded_never_exceeds_maxlen() {
    let input = b"bounded length\0";
    assert_eq!(length_bounded(input, 7), 7);
    assert_eq!(length_bounded(input, 14), 14);
    assert_eq!(length_bounded(input, 15), 14);
}

#[test]
fn scanner_from_env_defaults() {
    // Fails only if the environment carries a malformed FASTSTRLEN_* value.
    if std::env::vars().any(|(key, _)| key.starts_with("FASTSTRLEN_")) {
        return;
    }
    let scanner = Scanner::from_env().unwrap();
    assert_eq!(scanner.config(), &ScanConfig::default());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_every_config_matches_reference(
        bytes in proptest::collection::vec(any::<u8>(), 0..300),
        shift in 0usize..8,
    ) {
        let buf = Shifted::new(&bytes, shift);
        // Trailing padding is zero, so the reference sees the same terminator.
        let expected = reference_len(&bytes);
        for config in all_configs() {
            prop_assert_eq!(Scanner::new(config).length(buf.bytes()), expected);
            prop_assert_eq!(Scanner::new(config).length(&bytes), expected);
        }
    }

    #[test]
    fn prop_mostly_ascii_with_high_bytes(
        text in "[a-zA-Z0-9 ]{0,120}",
        high in proptest::collection::vec((0usize..120, 0x80u8..=0xFF), 0..6),
    ) {
        let mut bytes = text.into_bytes();
        for (at, byte) in high {
            if at < bytes.len() {
                bytes[at] = byte;
            }
        }
        let expected = bytes.len();
        bytes.push(0);
        for config in all_configs() {
            prop_assert_eq!(Scanner::new(config).length(&bytes), expected);
        }
    }

    #[test]
    fn prop_bounded_is_min(
        bytes in proptest::collection::vec(any::<u8>(), 0..100),
        maxlen in 0usize..120,
    ) {
        let expected = reference_len(&bytes).min(maxlen);
        prop_assert_eq!(length_bounded(&bytes, maxlen), expected);
    }
}
