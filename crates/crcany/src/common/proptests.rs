//! Property tests for the generic kernels over random models.
//!
//! Every model is drawn from the full parameter space (width 1..=128, any odd
//! polynomial, either reflection on each side), and checked on both register
//! types where the width allows:
//!
//! 1. **Kernel equivalence**: bitwise, bytewise and slice-by-16 agree, including
//!    on partial final bytes.
//! 2. **Chunking**: threading the CRC through two calls equals one call.
//! 3. **Combine / zeros**: polynomial arithmetic matches feeding real bytes.
//! 4. **Residue**: a message followed by its own CRC leaves the residue in the
//!    register (byte-multiple widths, same reflection on both sides).

#![cfg(all(test, not(miri)))]

extern crate std;

use alloc::vec::Vec;

use proptest::prelude::*;

use super::{
  combine::{build_table, combine, residue, zeros},
  dword::Dword,
  portable::{bytewise, slice16},
  reference::bitwise,
  register::Register,
  reverse::{reverse, reverse_dbl},
  shape::Shape,
  tables::{ByteTable, SliceTable},
};
use crate::params::CrcParams;

fn arb_params() -> impl Strategy<Value = CrcParams> {
  (1u16..=128, any::<u128>(), any::<u128>(), any::<bool>(), any::<bool>(), any::<u128>()).prop_map(
    |(width, poly, init, reflect_in, reflect_out, xor_out)| {
      let mask = if width == 128 { u128::MAX } else { (1u128 << width) - 1 };
      CrcParams {
        width,
        polynomial: (poly & mask) | 1,
        initial: init & mask,
        reflect_in,
        reflect_out,
        xor_out: xor_out & mask,
      }
    },
  )
}

/// Byte-multiple widths with matching input/output reflection: the models
/// whose CRC appends to the message as whole bytes in processing order.
fn arb_codeword_params() -> impl Strategy<Value = CrcParams> {
  (1u16..=16, any::<u128>(), any::<u128>(), any::<bool>(), any::<u128>()).prop_map(
    |(bytes, poly, init, reflect, xor_out)| {
      let width = bytes * 8;
      let mask = if width == 128 { u128::MAX } else { (1u128 << width) - 1 };
      CrcParams {
        width,
        polynomial: (poly & mask) | 1,
        initial: init & mask,
        reflect_in: reflect,
        reflect_out: reflect,
        xor_out: xor_out & mask,
      }
    },
  )
}

fn check_kernels<R: Register>(p: &CrcParams, data: &[u8], cut: usize, drop_bits: usize) -> Result<(), TestCaseError> {
  let s: Shape<R> = Shape::new(p);
  let b = ByteTable::build(&s).unwrap();
  let sl = SliceTable::build(&s, &b).unwrap();
  let bits = (data.len() * 8).saturating_sub(drop_bits);

  let want = bitwise(&s, s.init, data, bits);
  prop_assert_eq!(bytewise(&s, &b, s.init, data, bits), want);
  prop_assert_eq!(slice16(&s, &sl, &b, s.init, data, bits), want);

  let (x, y) = data.split_at(cut.min(data.len()));
  let whole = bitwise(&s, s.init, data, data.len() * 8);
  let first = slice16(&s, &sl, &b, s.init, x, x.len() * 8);
  prop_assert_eq!(slice16(&s, &sl, &b, first, y, y.len() * 8), whole);

  let t = build_table(&s).unwrap();
  let crc_x = bitwise(&s, s.init, x, x.len() * 8);
  let crc_y = bitwise(&s, s.init, y, y.len() * 8);
  prop_assert_eq!(combine(&s, &t, crc_x, crc_y, (y.len() * 8) as u64), whole);
  Ok(())
}

fn check_zeros<R: Register>(p: &CrcParams, data: &[u8], n: usize) -> Result<(), TestCaseError> {
  let s: Shape<R> = Shape::new(p);
  let t = build_table(&s).unwrap();
  let crc = bitwise(&s, s.init, data, data.len() * 8);
  let padded = bitwise(&s, crc, &alloc::vec![0u8; n], n * 8);
  let bits = (n * 8) as u64;
  prop_assert_eq!(zeros(&s, Some(&t), crc, bits, 0), padded);
  prop_assert_eq!(zeros(&s, Some(&t), crc, bits, u64::MAX), padded);
  Ok(())
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(128))]

  #[test]
  fn kernels_agree_on_random_models(
    p in arb_params(),
    data in proptest::collection::vec(any::<u8>(), 0..=300),
    cut in any::<usize>(),
    drop_bits in 0usize..8,
  ) {
    let cut = cut % (data.len() + 1);
    if p.fits_word() {
      check_kernels::<u64>(&p, &data, cut, drop_bits)?;
    }
    check_kernels::<Dword>(&p, &data, cut, drop_bits)?;
  }

  #[test]
  fn zeros_matches_zero_bytes(
    p in arb_params(),
    data in proptest::collection::vec(any::<u8>(), 0..=64),
    n in 0usize..200,
  ) {
    if p.fits_word() {
      check_zeros::<u64>(&p, &data, n)?;
    }
    check_zeros::<Dword>(&p, &data, n)?;
  }

  #[test]
  fn residue_of_valid_codeword(p in arb_codeword_params(), data in proptest::collection::vec(any::<u8>(), 0..=32)) {
    let s: Shape<Dword> = Shape::new(&p);
    let crc = u128::from(bitwise(&s, s.init, &data, data.len() * 8));
    let nbytes = usize::from(p.width / 8);
    let mut codeword: Vec<u8> = data.clone();
    if p.reflect_in {
      codeword.extend_from_slice(&crc.to_le_bytes()[..nbytes]);
    } else {
      codeword.extend_from_slice(&crc.to_be_bytes()[16 - nbytes..]);
    }
    let after = u128::from(bitwise(&s, s.init, &codeword, codeword.len() * 8));
    prop_assert_eq!(after ^ p.xor_out, u128::from(residue(&s)));
  }

  #[test]
  fn reverse_is_an_involution(x in any::<u64>(), n in 1u32..=64) {
    let x = x & super::reverse::ones(n);
    prop_assert_eq!(reverse(reverse(x, n), n), x);
  }

  #[test]
  fn reverse_dbl_is_an_involution(x in any::<u128>(), n in 1u32..=128) {
    let x = Dword::from(if n == 128 { x } else { x & ((1u128 << n) - 1) });
    prop_assert_eq!(reverse_dbl(reverse_dbl(x, n), n), x);
  }
}
