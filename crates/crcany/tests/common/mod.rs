//! Helpers shared by the integration tests.

#![allow(dead_code)]

use crcany::{CrcParams, Model};

pub fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed | 1;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

/// Textbook MSB-first shift register over `u128`, reflecting input bytes and
/// the output register explicitly. Shares no code with the crate.
pub fn rocksoft_bits(p: &CrcParams, data: &[u8], bits: usize) -> u128 {
  let w = u32::from(p.width);
  let mask = if w == 128 { u128::MAX } else { (1u128 << w) - 1 };
  let top = 1u128 << (w - 1);
  let mut reg = p.initial;
  for (i, &byte) in data.iter().enumerate() {
    let used = bits.saturating_sub(i * 8).min(8);
    if used == 0 {
      break;
    }
    let b = if p.reflect_in { byte.reverse_bits() } else { byte };
    for k in 0..used {
      let bit = (b >> (7 - k)) & 1 == 1;
      let msb = reg & top != 0;
      reg = (reg << 1) & mask;
      if msb != bit {
        reg ^= p.polynomial;
      }
    }
  }
  if p.reflect_out {
    reg = reg.reverse_bits() >> (128 - w);
  }
  reg ^ p.xor_out
}

pub fn rocksoft(p: &CrcParams, data: &[u8]) -> u128 {
  rocksoft_bits(p, data, data.len() * 8)
}

pub fn built(p: CrcParams) -> Model {
  let mut m = Model::from_params(p).unwrap();
  m.build_tables().unwrap();
  m
}

/// Any valid model: width 1..=128, odd polynomial, either reflection.
pub fn arb_params() -> impl proptest::strategy::Strategy<Value = CrcParams> {
  use proptest::prelude::*;

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
