//! Table-driven kernels: byte-at-a-time and slice-by-16.
//!
//! Both run on the kernel register form described in [`shape`](super::shape)
//! and are generic over the register, so a single implementation serves
//! reflected and non-reflected models of any width.
//!
//! # Algorithm Overview
//!
//! Slice-by-16 XORs the register into the leading bytes of a 16-byte block,
//! then replaces the register with the XOR of 16 lookups, one per block
//! position. A `u64` register only reaches the first 8 bytes; a double
//! register covers the whole block.
//!
//! Each kernel resolves the model's orientation once per call and runs a loop
//! monomorphized for it.
//!
//! | Register | Bytes/iter | Tables | Memory |
//! |----------|------------|--------|--------|
//! | `u64` | 1 | 256 x u64 | 2 KiB |
//! | `u64` | 16 | 16 x 256 x u64 | 32 KiB |
//! | `Dword` | 16 | 16 x 256 x Dword | 64 KiB |

use super::{
  reference::split_bits,
  register::Register,
  shape::Shape,
  tables::{ByteTable, SLICES, SliceTable},
};

// ─────────────────────────────────────────────────────────────────────────────
// Byte table
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn bytes_reg<R: Register, const REFLECT: bool>(table: &ByteTable<R>, mut reg: R, data: &[u8]) -> R {
  for &b in data {
    reg = table.step::<REFLECT>(reg, b);
  }
  reg
}

#[inline(always)]
fn bytewise_as<R: Register, const REFLECT: bool>(
  shape: &Shape<R>,
  table: &ByteTable<R>,
  reg: R,
  data: &[u8],
  bits: usize,
) -> R {
  let (whole, tail) = split_bits(data, bits);
  let reg = bytes_reg::<R, REFLECT>(table, reg, whole);
  match tail {
    Some((b, n)) => shape.feed_bits_as::<REFLECT>(reg, b, n),
    None => reg,
  }
}

/// Update `crc` with `bits` bits of `data`, one byte per table lookup.
///
/// Trailing bits of a partial byte go through the bit loop.
#[must_use]
pub fn bytewise<R: Register>(shape: &Shape<R>, table: &ByteTable<R>, crc: R, data: &[u8], bits: usize) -> R {
  let reg = shape.preprocess(crc);
  let reg = if shape.reflect {
    bytewise_as::<R, true>(shape, table, reg, data, bits)
  } else {
    bytewise_as::<R, false>(shape, table, reg, data, bits)
  };
  shape.postprocess(reg)
}

// ─────────────────────────────────────────────────────────────────────────────
// Slice-by-16
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn slice16_as<R: Register, const REFLECT: bool>(
  shape: &Shape<R>,
  slice: &SliceTable<R>,
  byte: &ByteTable<R>,
  mut reg: R,
  data: &[u8],
  bits: usize,
) -> R {
  let (whole, tail) = split_bits(data, bits);
  let (blocks, rest) = whole.as_chunks::<SLICES>();

  for block in blocks {
    reg = slice.lookup16(&reg.fold_block(block, REFLECT));
  }
  reg = bytes_reg::<R, REFLECT>(byte, reg, rest);
  match tail {
    Some((b, n)) => shape.feed_bits_as::<REFLECT>(reg, b, n),
    None => reg,
  }
}

/// Update `crc` with `bits` bits of `data`, 16 bytes per iteration.
///
/// Fewer than 16 trailing bytes use the byte table; trailing bits use the bit
/// loop.
#[must_use]
pub fn slice16<R: Register>(
  shape: &Shape<R>,
  slice: &SliceTable<R>,
  byte: &ByteTable<R>,
  crc: R,
  data: &[u8],
  bits: usize,
) -> R {
  let reg = shape.preprocess(crc);
  let reg = if shape.reflect {
    slice16_as::<R, true>(shape, slice, byte, reg, data, bits)
  } else {
    slice16_as::<R, false>(shape, slice, byte, reg, data, bits)
  };
  shape.postprocess(reg)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use alloc::vec::Vec;

  use super::*;
  use crate::{
    common::{dword::Dword, reference::bitwise},
    params::CrcParams,
  };

  fn data(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) ^ (i >> 3)) as u8).collect()
  }

  fn agree<R: Register>(p: CrcParams) {
    let s: Shape<R> = Shape::new(&p);
    let b = ByteTable::build(&s).unwrap();
    let sl = SliceTable::build(&s, &b).unwrap();
    for len in [0usize, 1, 7, 15, 16, 17, 31, 32, 33, 100, 257] {
      let d = data(len);
      for bits in [len * 8, (len * 8).saturating_sub(3)] {
        let want = bitwise(&s, s.init, &d, bits);
        assert_eq!(bytewise(&s, &b, s.init, &d, bits), want, "bytewise {p:?} bits={bits}");
        assert_eq!(slice16(&s, &sl, &b, s.init, &d, bits), want, "slice16 {p:?} bits={bits}");
      }
    }
  }

  #[test]
  fn word_kernels_agree_with_reference() {
    for p in [
      CrcParams::CRC32_ISO_HDLC,
      CrcParams::CRC16_XMODEM,
      CrcParams::CRC12_UMTS,
      CrcParams::CRC5_USB,
      CrcParams::CRC64_XZ,
    ] {
      agree::<u64>(p);
    }
  }

  #[test]
  fn dword_kernels_agree_with_reference() {
    agree::<Dword>(CrcParams::CRC82_DARC);
    agree::<Dword>(CrcParams::CRC32_ISO_HDLC);
    agree::<Dword>(CrcParams::CRC12_UMTS);
    agree::<Dword>(CrcParams {
      width: 100,
      polynomial: 0x8_0000_0000_0000_0000_0000_0107,
      initial: 0xF_0F0F_0F0F_0F0F_0F0F_0F0F_0F0F,
      reflect_in: false,
      reflect_out: false,
      xor_out: 0x3,
    });
  }

  #[test]
  fn cross_reflected_models_in_both_orientations() {
    // refin != refout: the loop orientation follows the input side only.
    agree::<u64>(CrcParams {
      width: 16,
      polynomial: 0x8005,
      initial: 0xFFFF,
      reflect_in: true,
      reflect_out: false,
      xor_out: 0,
    });
    agree::<u64>(CrcParams {
      width: 16,
      polynomial: 0x8005,
      initial: 0xFFFF,
      reflect_in: false,
      reflect_out: true,
      xor_out: 0,
    });
    agree::<Dword>(CrcParams {
      width: 82,
      polynomial: 0x0_308c_0111_0114_0144_0411,
      initial: 0,
      reflect_in: false,
      reflect_out: true,
      xor_out: 0,
    });
  }

  #[test]
  fn narrow_normal_width() {
    // CRC-3/GSM: width below 8, non-reflected.
    agree::<u64>(CrcParams {
      width: 3,
      polynomial: 0x3,
      initial: 0,
      reflect_in: false,
      reflect_out: false,
      xor_out: 0x7,
    });
  }

  #[test]
  fn slice16_incremental() {
    let p = CrcParams::CRC64_XZ;
    let s: Shape<u64> = Shape::new(&p);
    let b = ByteTable::build(&s).unwrap();
    let sl = SliceTable::build(&s, &b).unwrap();
    let d = data(1000);
    let all = slice16(&s, &sl, &b, s.init, &d, d.len() * 8);
    for split in [1, 16, 333, 999] {
      let (x, y) = d.split_at(split);
      let crc = slice16(&s, &sl, &b, s.init, x, x.len() * 8);
      assert_eq!(slice16(&s, &sl, &b, crc, y, y.len() * 8), all);
    }
  }

  #[test]
  fn crc32_check_value_all_kernels() {
    let s: Shape<u64> = Shape::new(&CrcParams::CRC32_ISO_HDLC);
    let b = ByteTable::build(&s).unwrap();
    let sl = SliceTable::build(&s, &b).unwrap();
    let d = b"123456789123456789";
    assert_eq!(bytewise(&s, &b, s.init, &d[..9], 72), 0xCBF4_3926);
    assert_eq!(slice16(&s, &sl, &b, s.init, &d[..9], 72), 0xCBF4_3926);
    assert_eq!(
      slice16(&s, &sl, &b, s.init, d, 144),
      bitwise(&s, s.init, d, 144)
    );
  }
}
