//! Normalized CRC description in a concrete register type.
//!
//! A [`Shape`] is what the kernels actually run on: the polynomial is stored
//! reflected when the input is reflected (so no kernel ever reflects per bit),
//! `init` is the CRC of the empty message rather than the raw register seed,
//! and the flags are reduced to `reflect` (LSB-first processing) and `reverse`
//! (output orientation differs from processing orientation).
//!
//! Two register layouts are in play:
//!
//! - **Low-aligned**: the CRC occupies bits `0..width`. Used by reflected
//!   kernels and by all polynomial arithmetic (combine, zeros, residue).
//! - **Top-aligned**: non-reflected kernels shift the CRC to the top of the
//!   register so an incoming byte XORs directly into the highest byte,
//!   whatever the width (including widths below 8).

use super::register::Register;
use crate::params::CrcParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape<R> {
  /// CRC width in bits.
  pub width: u32,
  /// Process bits least-significant first.
  pub reflect: bool,
  /// Output orientation is the opposite of `reflect`.
  pub reverse: bool,
  /// Polynomial without the `x^width` term, low-aligned, reflected if `reflect`.
  pub poly: R,
  /// CRC of a zero-length message.
  pub init: R,
  pub xorout: R,
  /// Low `width` bits set.
  pub mask: R,
  /// Bit `width - 1`.
  pub top: R,
  /// Left shift between low- and top-aligned layouts (0 when reflected).
  pub align: u32,
  /// `poly << align`.
  pub poly_aligned: R,
  /// Highest register bit.
  msb: R,
}

impl<R: Register> Shape<R> {
  /// Normalize validated parameters into register form.
  pub fn new(params: &CrcParams) -> Self {
    let width = u32::from(params.width);
    let mut poly = R::from_u128(params.polynomial);
    let mut init = R::from_u128(params.initial);
    let xorout = R::from_u128(params.xor_out);

    if params.reflect_in {
      poly = poly.reverse(width);
    }
    if params.reflect_out {
      init = init.reverse(width);
    }
    init ^= xorout;

    let reflect = params.reflect_in;
    let align = if reflect { 0 } else { R::BITS - width };

    Self {
      width,
      reflect,
      reverse: params.reflect_in != params.reflect_out,
      poly,
      init,
      xorout,
      mask: R::ones(width),
      top: R::ONE << (width - 1),
      align,
      poly_aligned: poly << align,
      msb: R::ONE << (R::BITS - 1),
    }
  }

  /// Convert a boundary CRC into the raw, low-aligned register value.
  #[inline]
  pub fn raw(&self, crc: R) -> R {
    let crc = (crc & self.mask) ^ self.xorout;
    if self.reverse { crc.reverse(self.width) } else { crc }
  }

  /// Inverse of [`raw`](Self::raw).
  #[inline]
  pub fn cooked(&self, reg: R) -> R {
    let reg = if self.reverse { reg.reverse(self.width) } else { reg };
    reg ^ self.xorout
  }

  /// Boundary CRC to kernel register (raw, then top-aligned if normal).
  #[inline]
  pub fn preprocess(&self, crc: R) -> R {
    self.raw(crc) << self.align
  }

  /// Kernel register back to a boundary CRC.
  #[inline]
  pub fn postprocess(&self, reg: R) -> R {
    self.cooked(reg >> self.align)
  }

  /// Advance the kernel register by one input bit already XORed in.
  #[inline(always)]
  fn step<const REFLECT: bool>(&self, reg: R) -> R {
    if REFLECT {
      if reg.is_odd() { (reg >> 1) ^ self.poly } else { reg >> 1 }
    } else if (reg & self.msb) != R::ZERO {
      (reg << 1) ^ self.poly_aligned
    } else {
      reg << 1
    }
  }

  /// Feed one whole byte into a kernel register, one bit at a time.
  #[inline]
  pub fn feed_byte(&self, reg: R, byte: u8) -> R {
    self.feed_bits(reg, byte, 8)
  }

  /// Feed the first `n` bits (`1..=8`) of `byte` into a kernel register.
  ///
  /// "First" means the low bits for reflected models and the high bits
  /// otherwise; the unused bits are masked off before they can reach the
  /// register.
  #[inline]
  pub fn feed_bits(&self, reg: R, byte: u8, n: u32) -> R {
    if self.reflect {
      self.feed_bits_as::<true>(reg, byte, n)
    } else {
      self.feed_bits_as::<false>(reg, byte, n)
    }
  }

  /// [`feed_bits`](Self::feed_bits) with the orientation fixed at compile
  /// time. `REFLECT` must equal `self.reflect`.
  #[inline(always)]
  pub fn feed_bits_as<const REFLECT: bool>(&self, reg: R, byte: u8, n: u32) -> R {
    debug_assert!((1..=8).contains(&n));
    debug_assert_eq!(REFLECT, self.reflect);
    let mut reg = if REFLECT {
      reg ^ R::from_byte(byte & (0xFF >> (8 - n)))
    } else {
      reg ^ (R::from_byte(byte & (0xFF << (8 - n))) << (R::BITS - 8))
    };
    for _ in 0..n {
      reg = self.step::<REFLECT>(reg);
    }
    reg
  }

  /// `x^0` in low-aligned polynomial form.
  #[inline]
  pub fn x0(&self) -> R {
    if self.reflect { self.top } else { R::ONE }
  }

  /// Multiply a low-aligned polynomial by `x` modulo the generator.
  ///
  /// This is also one zero bit pushed through a low-aligned register.
  #[inline]
  pub fn times_x(&self, b: R) -> R {
    if self.reflect {
      if b.is_odd() { (b >> 1) ^ self.poly } else { b >> 1 }
    } else {
      let carry = (b & self.top) != R::ZERO;
      let b = (b << 1) & self.mask;
      if carry { b ^ self.poly } else { b }
    }
  }
}
