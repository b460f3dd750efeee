//! Fuzz target for combine and zeros.
//!
//! Splits the input at arbitrary points, folds the pieces back together with
//! `combine`, and checks zero padding against feeding real zero bytes.

#![no_main]

use arbitrary::Arbitrary;
use crcany::{CrcParams, Model, parallel::combine_checksums};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  model: u8,
  data: Vec<u8>,
  splits: Vec<usize>,
  zeros: u16,
}

const MODELS: [CrcParams; 6] = [
  CrcParams::CRC32_ISO_HDLC,
  CrcParams::CRC16_XMODEM,
  CrcParams::CRC12_UMTS,
  CrcParams::CRC5_USB,
  CrcParams::CRC64_XZ,
  CrcParams::CRC82_DARC,
];

fuzz_target!(|input: Input| {
  let params = MODELS[usize::from(input.model) % MODELS.len()];
  let mut model = Model::from_params(params).unwrap();
  model.build_tables().unwrap();

  let data = &input.data;
  let expected = model.slice16(model.init(), data);

  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.push(data.len());
  splits.sort_unstable();
  splits.dedup();

  let mut parts = Vec::new();
  let mut prev = 0;
  for split in splits {
    let chunk = &data[prev..split];
    parts.push((model.bytewise(model.init(), chunk), chunk.len()));
    prev = split;
  }
  assert_eq!(combine_checksums(&model, &parts), Some(expected), "{params:?}");

  let n = usize::from(input.zeros);
  let mut padded = data.clone();
  padded.resize(data.len() + n, 0);
  assert_eq!(model.zeros(expected, n), model.slice16(model.init(), &padded), "{params:?} zeros={n}");
});
