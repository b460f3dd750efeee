//! Bitwise reference engine.
//!
//! This is the source of truth for every other kernel: it processes input one
//! bit at a time straight from the Rocksoft definition, needs no tables, and
//! handles any bit length, including a partial final byte. The table kernels
//! also use it to finish trailing bits.
//!
//! | Parameter | Description |
//! |-----------|-------------|
//! | `width`   | CRC width in bits (1..=128) |
//! | `poly`    | Generator polynomial (reflected for LSB-first CRCs) |
//! | `init`    | Initial register value |
//! | `refin`   | Reflect input bytes |
//! | `refout`  | Reflect output before final XOR |
//! | `xorout`  | Final XOR value |

use super::{register::Register, shape::Shape};

/// Split `data` into whole bytes and an optional trailing `(byte, nbits)`.
///
/// # Panics
///
/// Panics if `bits` exceeds `data.len() * 8`.
#[inline]
pub fn split_bits(data: &[u8], bits: usize) -> (&[u8], Option<(u8, u32)>) {
  assert!(
    bits / 8 <= data.len() && (bits % 8 == 0 || bits / 8 < data.len()),
    "bit length {bits} exceeds a {}-byte buffer",
    data.len()
  );
  let (whole, rest) = data.split_at(bits / 8);
  // `bits % 8 < 8`, so the cast is lossless.
  let tail = match (bits % 8) as u32 {
    0 => None,
    n => rest.first().map(|&b| (b, n)),
  };
  (whole, tail)
}

#[inline(always)]
fn feed_as<R: Register, const REFLECT: bool>(shape: &Shape<R>, mut reg: R, data: &[u8], bits: usize) -> R {
  let (whole, tail) = split_bits(data, bits);
  for &b in whole {
    reg = shape.feed_bits_as::<REFLECT>(reg, b, 8);
  }
  if let Some((b, n)) = tail {
    reg = shape.feed_bits_as::<REFLECT>(reg, b, n);
  }
  reg
}

/// Feed `bits` bits of `data` into a kernel register.
#[inline]
pub fn feed<R: Register>(shape: &Shape<R>, reg: R, data: &[u8], bits: usize) -> R {
  if shape.reflect {
    feed_as::<R, true>(shape, reg, data, bits)
  } else {
    feed_as::<R, false>(shape, reg, data, bits)
  }
}

/// Update `crc` with the first `bits` bits of `data`.
///
/// `crc` is a boundary value: start from the model's `init`, then thread each
/// result back in to process a message in pieces.
///
/// # Panics
///
/// Panics if `bits` exceeds `data.len() * 8`.
#[must_use]
pub fn bitwise<R: Register>(shape: &Shape<R>, crc: R, data: &[u8], bits: usize) -> R {
  let reg = shape.preprocess(crc);
  shape.postprocess(feed(shape, reg, data, bits))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{common::dword::Dword, params::CrcParams};

  const CHECK: &[u8] = b"123456789";

  fn check<R: Register>(p: CrcParams) -> u128 {
    let s: Shape<R> = Shape::new(&p);
    bitwise(&s, s.init, CHECK, CHECK.len() * 8).to_u128()
  }

  #[test]
  fn catalog_check_values() {
    assert_eq!(check::<u64>(CrcParams::CRC32_ISO_HDLC), 0xCBF4_3926);
    assert_eq!(check::<u64>(CrcParams::CRC32_ISCSI), 0xE306_9283);
    assert_eq!(check::<u64>(CrcParams::CRC16_XMODEM), 0x31C3);
    assert_eq!(check::<u64>(CrcParams::CRC16_IBM_3740), 0x29B1);
    assert_eq!(check::<u64>(CrcParams::CRC12_UMTS), 0xDAF);
    assert_eq!(check::<u64>(CrcParams::CRC5_USB), 0x19);
    assert_eq!(check::<u64>(CrcParams::CRC64_XZ), 0x995D_C9BB_DF19_39FA);
    assert_eq!(check::<Dword>(CrcParams::CRC82_DARC), 0x0_9ea8_3f62_5023_801f_d612);
  }

  #[test]
  fn dword_register_agrees_with_word_register() {
    for p in [CrcParams::CRC32_ISO_HDLC, CrcParams::CRC12_UMTS, CrcParams::CRC64_XZ] {
      assert_eq!(check::<Dword>(p), check::<u64>(p), "{p:?}");
    }
  }

  #[test]
  fn empty_input_returns_crc_unchanged() {
    let s: Shape<u64> = Shape::new(&CrcParams::CRC12_UMTS);
    assert_eq!(bitwise(&s, 0x123, &[], 0), 0x123);
    assert_eq!(bitwise(&s, s.init, &[0xFF], 0), s.init);
  }

  #[test]
  fn incremental() {
    let s: Shape<u64> = Shape::new(&CrcParams::CRC32_ISO_HDLC);
    let (a, b) = CHECK.split_at(4);
    let crc = bitwise(&s, s.init, a, a.len() * 8);
    assert_eq!(bitwise(&s, crc, b, b.len() * 8), 0xCBF4_3926);
  }

  #[test]
  fn partial_byte_splits_like_bits() {
    // 13 bits = one byte, then 5 bits of the next.
    let s: Shape<u64> = Shape::new(&CrcParams::CRC16_XMODEM);
    let data = [0xA5, 0xF8];
    let whole = bitwise(&s, s.init, &data, 13);
    let first = bitwise(&s, s.init, &data[..1], 8);
    assert_eq!(bitwise(&s, first, &data[1..], 5), whole);
    // Bits past the length never matter.
    assert_eq!(bitwise(&s, s.init, &[0xA5, 0xFF], 13), whole);
  }

  #[test]
  fn split_bits_boundaries() {
    let data = [1u8, 2, 3];
    assert_eq!(split_bits(&data, 24), (&data[..], None));
    assert_eq!(split_bits(&data, 17), (&data[..2], Some((3, 1))));
    assert_eq!(split_bits(&data, 0), (&data[..0], None));
  }

  #[test]
  #[should_panic(expected = "exceeds")]
  fn too_many_bits_panics() {
    let _ = split_bits(&[0u8; 2], 17);
  }
}
