//! Differential fuzzing of all kernels on arbitrary models.
//!
//! Checks bitwise, bytewise and slice-by-16 against each other for any model
//! the fuzzer can describe, and against the `crc` crate for catalog models.

#![no_main]

use arbitrary::Arbitrary;
use crcany::{CrcParams, Kernel, Model};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  width: u8,
  poly: u128,
  init: u128,
  reflect_in: bool,
  reflect_out: bool,
  xor_out: u128,
  drop_bits: u8,
  data: Vec<u8>,
}

const CRC32: crc::Crc<u32> = crc::Crc::<u32>::new(&crc::CRC_32_ISO_HDLC);
const CRC64: crc::Crc<u64> = crc::Crc::<u64>::new(&crc::CRC_64_XZ);
const CRC82: crc::Crc<u128> = crc::Crc::<u128>::new(&crc::CRC_82_DARC);

fuzz_target!(|input: Input| {
  let width = u16::from(input.width % 128) + 1;
  let mask = if width == 128 { u128::MAX } else { (1u128 << width) - 1 };
  let params = CrcParams {
    width,
    polynomial: (input.poly & mask) | 1,
    initial: input.init & mask,
    reflect_in: input.reflect_in,
    reflect_out: input.reflect_out,
    xor_out: input.xor_out & mask,
  };
  let Ok(mut model) = Model::from_params(params) else {
    panic!("normalized parameters rejected: {params:?}");
  };
  model.build_tables().unwrap();

  let data = &input.data;
  let bits = (data.len() * 8).saturating_sub(usize::from(input.drop_bits % 8));
  let reference = model.bitwise_bits(model.init(), data, bits);
  for kernel in [Kernel::Bytewise, Kernel::Slice16] {
    assert_eq!(model.apply_bits(kernel, model.init(), data, bits), reference, "{kernel} {params:?}");
  }

  for (p, oracle) in [
    (CrcParams::CRC32_ISO_HDLC, u128::from(CRC32.checksum(data))),
    (CrcParams::CRC64_XZ, u128::from(CRC64.checksum(data))),
    (CrcParams::CRC82_DARC, CRC82.checksum(data)),
  ] {
    let mut m = Model::from_params(p).unwrap();
    m.build_tables().unwrap();
    assert_eq!(m.slice16(m.init(), data), oracle, "{p:?}");
  }
});
