//! Fuzz target for the streaming hasher.
//!
//! Feeds arbitrary chunk patterns through `Crc` with every kernel and checks
//! the result against a one-shot call.

#![no_main]

use arbitrary::Arbitrary;
use crcany::{Checksum, Crc, CrcParams, Kernel, Model};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  wide: bool,
  data: Vec<u8>,
  chunk_sizes: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let params = if input.wide { CrcParams::CRC82_DARC } else { CrcParams::CRC32_ISCSI };
  let mut model = Model::from_params(params).unwrap();
  model.build_tables().unwrap();

  let data = &input.data;
  let expected = model.bitwise(model.init(), data);

  for kernel in Kernel::ALL {
    let mut hasher = Crc::new(&model, kernel);
    let mut rest = data.as_slice();
    let mut sizes = input.chunk_sizes.iter().map(|&s| usize::from(s).max(1)).cycle();
    while !rest.is_empty() {
      let size = sizes.next().unwrap_or(rest.len()).min(rest.len());
      let (head, tail) = rest.split_at(size);
      hasher.update(head);
      rest = tail;
    }
    assert_eq!(hasher.finalize(), expected, "{kernel}");

    hasher.reset();
    assert_eq!(hasher.finalize(), model.init());
  }
});
