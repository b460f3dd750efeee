//! Bit reversal of the low `n` bits of a register.
//!
//! Reversal runs at most twice per CRC call (entry and exit of a cross-reflected
//! model) and once per parameter during model construction, so it is written as
//! a logarithmic swap-and-mask network: swap adjacent halves of ever smaller
//! blocks (32, 16, 8, 4, 2, 1 bits), starting from the smallest power-of-two
//! block that covers `n`.

// SAFETY: `MASKS` is indexed by `stage`, which counts down from
// `trailing_zeros(span) <= 6` and is decremented before use, so it stays in 0..6.
#![allow(clippy::indexing_slicing)]

use super::dword::Dword;

/// Number of bits in a single register word.
pub const WORD_BITS: u32 = u64::BITS;

/// Swap masks for block sizes 1, 2, 4, 8, 16, 32.
const MASKS: [u64; 6] = [
  0x5555_5555_5555_5555,
  0x3333_3333_3333_3333,
  0x0F0F_0F0F_0F0F_0F0F,
  0x00FF_00FF_00FF_00FF,
  0x0000_FFFF_0000_FFFF,
  0x0000_0000_FFFF_FFFF,
];

/// Low `n` bits set, `0 <= n <= 64`.
#[inline]
#[must_use]
pub const fn ones(n: u32) -> u64 {
  if n >= WORD_BITS { u64::MAX } else { (1u64 << n) - 1 }
}

/// Return the reversal of the low `n` bits of `x`.
///
/// Bits of `x` above `n` are ignored and are zero in the result.
///
/// # Panics
///
/// Panics if `n` is not in `1..=64`.
#[must_use]
pub const fn reverse(x: u64, n: u32) -> u64 {
  assert!(n >= 1 && n <= WORD_BITS, "reverse: bit count must be in 1..=64");

  let span = n.next_power_of_two();
  let mut stage = span.trailing_zeros();
  let mut x = x;
  while stage > 0 {
    stage -= 1;
    let shift = 1u32 << stage;
    let m = MASKS[stage as usize];
    x = ((x >> shift) & m) | ((x & m) << shift);
  }
  (x & ones(span)) >> (span - n)
}

/// Return the reversal of the low `n` bits of a double-width value.
///
/// For `n <= 64` this is [`reverse`] on the low word and the high word is
/// cleared. Above that, the reversed low word becomes the top of the result
/// and bits are carried across the word boundary.
///
/// # Panics
///
/// Panics if `n` is not in `1..=128`.
#[must_use]
pub const fn reverse_dbl(x: Dword, n: u32) -> Dword {
  assert!(n >= 1 && n <= 2 * WORD_BITS, "reverse_dbl: bit count must be in 1..=128");

  if n <= WORD_BITS {
    return Dword::new(0, reverse(x.lo, n));
  }

  let tmp = reverse(x.lo, WORD_BITS);
  let lo = reverse(x.hi, n - WORD_BITS);
  if n < 2 * WORD_BITS {
    Dword::new(tmp >> (2 * WORD_BITS - n), lo | (tmp << (n - WORD_BITS)))
  } else {
    Dword::new(tmp, lo)
  }
}
