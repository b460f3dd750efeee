//! The register abstraction shared by every kernel.
//!
//! All CRC kernels are written once against [`Register`] and instantiated for
//! `u64` (widths up to 64) and [`Dword`] (widths 65..=128). The model picks the
//! instantiation at construction, so a narrow CRC never pays for double-width
//! carries.

use core::{
  fmt,
  ops::{BitAnd, BitXor, BitXorAssign, Shl, Shr},
};

use super::{
  dword::Dword,
  reverse::{reverse, reverse_dbl},
};

/// A fixed-size CRC register.
pub trait Register:
  Copy
  + Eq
  + Default
  + fmt::Debug
  + fmt::LowerHex
  + Send
  + Sync
  + 'static
  + BitXor<Output = Self>
  + BitXorAssign
  + BitAnd<Output = Self>
  + Shl<u32, Output = Self>
  + Shr<u32, Output = Self>
{
  /// Register size in bits (64 or 128).
  const BITS: u32;
  const ZERO: Self;
  const ONE: Self;

  /// Zero-extend a byte.
  fn from_byte(byte: u8) -> Self;

  /// Truncate to the lowest byte.
  fn low_byte(self) -> u8;

  /// Low `n` bits set, `1 <= n <= BITS`.
  fn ones(n: u32) -> Self;

  /// Reverse the low `n` bits, clearing the rest.
  fn reverse(self, n: u32) -> Self;

  /// Truncating conversion from the boundary representation.
  fn from_u128(v: u128) -> Self;

  fn to_u128(self) -> u128;

  /// XOR the register into the leading bytes of a 16-byte block and return
  /// the resulting table indices.
  ///
  /// Reflected registers line up least-significant byte first with the block;
  /// normal (top-aligned) registers line up most-significant byte first. The
  /// block is loaded as one wide integer in the matching byte order.
  fn fold_block(self, block: &[u8; 16], reflect: bool) -> [u8; 16];

  /// Highest byte of the register.
  #[inline]
  fn top_byte(self) -> u8 {
    (self >> (Self::BITS - 8)).low_byte()
  }

  #[inline]
  fn is_odd(self) -> bool {
    (self & Self::ONE) != Self::ZERO
  }
}

impl Register for u64 {
  const BITS: u32 = u64::BITS;
  const ZERO: Self = 0;
  const ONE: Self = 1;

  #[inline]
  fn from_byte(byte: u8) -> Self {
    u64::from(byte)
  }

  #[inline]
  fn low_byte(self) -> u8 {
    self as u8
  }

  #[inline]
  fn ones(n: u32) -> Self {
    super::reverse::ones(n)
  }

  #[inline]
  fn reverse(self, n: u32) -> Self {
    reverse(self, n)
  }

  #[inline]
  fn from_u128(v: u128) -> Self {
    v as u64
  }

  #[inline]
  fn to_u128(self) -> u128 {
    u128::from(self)
  }

  #[inline]
  fn fold_block(self, block: &[u8; 16], reflect: bool) -> [u8; 16] {
    if reflect {
      (u128::from_le_bytes(*block) ^ u128::from(self)).to_le_bytes()
    } else {
      (u128::from_be_bytes(*block) ^ (u128::from(self) << u64::BITS)).to_be_bytes()
    }
  }
}

impl Register for Dword {
  const BITS: u32 = 2 * u64::BITS;
  const ZERO: Self = Dword::ZERO;
  const ONE: Self = Dword::new(0, 1);

  #[inline]
  fn from_byte(byte: u8) -> Self {
    Dword::new(0, u64::from(byte))
  }

  #[inline]
  fn low_byte(self) -> u8 {
    self.lo as u8
  }

  #[inline]
  fn ones(n: u32) -> Self {
    Dword::ones(n)
  }

  #[inline]
  fn reverse(self, n: u32) -> Self {
    reverse_dbl(self, n)
  }

  #[inline]
  fn from_u128(v: u128) -> Self {
    Dword::from(v)
  }

  #[inline]
  fn to_u128(self) -> u128 {
    u128::from(self)
  }

  #[inline]
  fn fold_block(self, block: &[u8; 16], reflect: bool) -> [u8; 16] {
    if reflect {
      (u128::from_le_bytes(*block) ^ u128::from(self)).to_le_bytes()
    } else {
      (u128::from_be_bytes(*block) ^ u128::from(self)).to_be_bytes()
    }
  }
}
