//! Lowest-set-bit search over lane masks.

/// Index of the least significant set bit; 32 when the input is 0.
pub type LowestSetBit = fn(u32) -> u32;

const DEBRUIJN: u32 = 0x077C_B531;

const DEBRUIJN_INDEX: [u8; 32] = [
    0, 1, 28, 2, 29, 14, 24, 3, 30, 22, 20, 15, 25, 17, 4, 8, 31, 27, 13, 23, 21, 19, 16, 7, 26,
    12, 18, 6, 11, 5, 10, 9,
];

/// Hardware bit scan via `trailing_zeros`.
#[inline(always)]
pub fn lowest_set_bit_native(bits: u32) -> u32 {
    bits.trailing_zeros()
}

/// Table-driven bit scan for targets without a usable instruction.
#[inline]
pub fn lowest_set_bit_portable(bits: u32) -> u32 {
    if bits == 0 {
        return 32;
    }
    let isolated = bits & bits.wrapping_neg();
    u32::from(DEBRUIJN_INDEX[(isolated.wrapping_mul(DEBRUIJN) >> 27) as usize])
}
