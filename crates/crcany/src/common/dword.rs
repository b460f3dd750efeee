//! Double-width register: a CRC value split across two `u64` words.
//!
//! CRCs wider than 64 bits keep their running register as a `(hi, lo)` pair.
//! Shifts move bits across the word boundary explicitly: shifting left by `k`
//! carries the top `k` bits of `lo` into the bottom of `hi`, and shifting right
//! carries the bottom `k` bits of `hi` into the top of `lo`. Everything else
//! (XOR, AND, OR) is word-wise.

use core::{
  fmt,
  ops::{BitAnd, BitOr, BitXor, BitXorAssign, Shl, Shr},
};

use super::reverse::WORD_BITS;

/// A 128-bit register held as two 64-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dword {
  /// Upper 64 bits.
  pub hi: u64,
  /// Lower 64 bits.
  pub lo: u64,
}

impl Dword {
  /// All bits clear.
  pub const ZERO: Self = Self::new(0, 0);

  #[inline]
  #[must_use]
  pub const fn new(hi: u64, lo: u64) -> Self {
    Self { hi, lo }
  }

  /// Low `n` bits set, `0 <= n <= 128`.
  #[inline]
  #[must_use]
  pub const fn ones(n: u32) -> Self {
    if n <= WORD_BITS {
      Self::new(0, super::reverse::ones(n))
    } else {
      Self::new(super::reverse::ones(n - WORD_BITS), u64::MAX)
    }
  }

  /// Shift left by `n` bits, carrying from `lo` into `hi`. Bits shifted past
  /// bit 127 are discarded.
  #[inline]
  #[must_use]
  pub const fn shift_left(self, n: u32) -> Self {
    match n {
      0 => self,
      1..WORD_BITS => Self::new((self.hi << n) | (self.lo >> (WORD_BITS - n)), self.lo << n),
      WORD_BITS..128 => Self::new(self.lo << (n - WORD_BITS), 0),
      _ => Self::ZERO,
    }
  }

  /// Shift right by `n` bits, carrying from `hi` into `lo`.
  #[inline]
  #[must_use]
  pub const fn shift_right(self, n: u32) -> Self {
    match n {
      0 => self,
      1..WORD_BITS => Self::new(self.hi >> n, (self.lo >> n) | (self.hi << (WORD_BITS - n))),
      WORD_BITS..128 => Self::new(0, self.hi >> (n - WORD_BITS)),
      _ => Self::ZERO,
    }
  }

  #[inline]
  #[must_use]
  pub const fn is_zero(self) -> bool {
    self.hi == 0 && self.lo == 0
  }
}

impl Shl<u32> for Dword {
  type Output = Self;

  #[inline]
  fn shl(self, n: u32) -> Self {
    self.shift_left(n)
  }
}

impl Shr<u32> for Dword {
  type Output = Self;

  #[inline]
  fn shr(self, n: u32) -> Self {
    self.shift_right(n)
  }
}

impl BitXor for Dword {
  type Output = Self;

  #[inline]
  fn bitxor(self, rhs: Self) -> Self {
    Self::new(self.hi ^ rhs.hi, self.lo ^ rhs.lo)
  }
}

impl BitXorAssign for Dword {
  #[inline]
  fn bitxor_assign(&mut self, rhs: Self) {
    self.hi ^= rhs.hi;
    self.lo ^= rhs.lo;
  }
}

impl BitAnd for Dword {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self {
    Self::new(self.hi & rhs.hi, self.lo & rhs.lo)
  }
}

impl BitOr for Dword {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    Self::new(self.hi | rhs.hi, self.lo | rhs.lo)
  }
}

impl From<u64> for Dword {
  #[inline]
  fn from(lo: u64) -> Self {
    Self::new(0, lo)
  }
}

impl From<u128> for Dword {
  #[inline]
  fn from(v: u128) -> Self {
    Self::new((v >> WORD_BITS) as u64, v as u64)
  }
}

impl From<Dword> for u128 {
  #[inline]
  fn from(v: Dword) -> Self {
    (u128::from(v.hi) << WORD_BITS) | u128::from(v.lo)
  }
}

impl fmt::LowerHex for Dword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(&u128::from(*self), f)
  }
}

impl fmt::UpperHex for Dword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::UpperHex::fmt(&u128::from(*self), f)
  }
}
