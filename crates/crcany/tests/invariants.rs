//! Differential tests against the `crc` crate catalog and an independent
//! straight-line Rocksoft implementation.

mod common;

use common::{built, gen_bytes, rocksoft, rocksoft_bits};
use crcany::{Checksum, ChecksumCombine, Crc, CrcParams, Kernel, Model};

fn check_model(name: &str, p: CrcParams, check: u128, residue: u128, oracle: impl Fn(&[u8]) -> u128) {
  let m = built(p);
  assert_eq!(m.check(), check, "{name}: check");
  assert_eq!(m.residue(), residue, "{name}: residue");

  let lengths = [0usize, 1, 2, 7, 8, 15, 16, 17, 31, 32, 33, 255, 256, 1024, 1031];
  for &len in &lengths {
    let data = gen_bytes(len, 0x0123_4567_89ab_cdef ^ len as u64);
    let want = oracle(&data);
    assert_eq!(rocksoft(&p, &data), want, "{name}: rocksoft len={len}");
    for k in Kernel::ALL {
      assert_eq!(m.apply(k, m.init(), &data), want, "{name}: {k} len={len}");
    }

    let splits = [0usize, 1, len / 2, len.saturating_sub(1), len];
    for split in splits.into_iter().filter(|&s| s <= len) {
      let (a, b) = data.split_at(split);

      let mut h = Crc::new(&m, Kernel::Slice16);
      h.update(a);
      h.update(b);
      assert_eq!(h.finalize(), want, "{name}: streaming split={split}");

      let combined = h.combine(h.checksum(a), h.checksum(b), b.len());
      assert_eq!(combined, want, "{name}: combine split={split}");
    }
  }
}

macro_rules! against_crc_crate {
  ($($test:ident: $w:ty = $alg:path;)+) => {
    $(
      #[test]
      fn $test() {
        let alg = &$alg;
        let params = CrcParams {
          width: u16::from(alg.width),
          polynomial: u128::from(alg.poly),
          initial: u128::from(alg.init),
          reflect_in: alg.refin,
          reflect_out: alg.refout,
          xor_out: u128::from(alg.xorout),
        };
        let oracle = crc::Crc::<$w>::new(alg);
        check_model(
          stringify!($alg),
          params,
          u128::from(alg.check),
          u128::from(alg.residue),
          |d| u128::from(oracle.checksum(d)),
        );
      }
    )+
  };
}

against_crc_crate! {
  crc3_gsm: u8 = crc::CRC_3_GSM;
  crc5_usb: u8 = crc::CRC_5_USB;
  crc7_mmc: u8 = crc::CRC_7_MMC;
  crc8_smbus: u8 = crc::CRC_8_SMBUS;
  crc10_atm: u16 = crc::CRC_10_ATM;
  crc12_umts: u16 = crc::CRC_12_UMTS;
  crc16_arc: u16 = crc::CRC_16_ARC;
  crc16_xmodem: u16 = crc::CRC_16_XMODEM;
  crc16_genibus: u16 = crc::CRC_16_GENIBUS;
  crc24_openpgp: u32 = crc::CRC_24_OPENPGP;
  crc31_philips: u32 = crc::CRC_31_PHILIPS;
  crc32_iso_hdlc: u32 = crc::CRC_32_ISO_HDLC;
  crc32_iscsi: u32 = crc::CRC_32_ISCSI;
  crc32_bzip2: u32 = crc::CRC_32_BZIP2;
  crc40_gsm: u64 = crc::CRC_40_GSM;
  crc64_xz: u64 = crc::CRC_64_XZ;
  crc64_go_iso: u64 = crc::CRC_64_GO_ISO;
  crc64_we: u64 = crc::CRC_64_WE;
  crc82_darc: u128 = crc::CRC_82_DARC;
}

#[test]
fn concrete_scenarios() {
  let crc32 = Model::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF).unwrap();
  assert_eq!(crc32.bitwise(crc32.init(), b"123456789"), 0xCBF4_3926);
  let xmodem = Model::new(16, 0x1021, 0x0000, false, false, 0x0000).unwrap();
  assert_eq!(xmodem.bitwise(xmodem.init(), b"123456789"), 0x31C3);
}

#[test]
fn wide_models_without_catalog_entries() {
  // Widths the catalog never uses, on both sides of the register boundary.
  for (width, reflect_in, reflect_out) in [
    (63u16, false, false),
    (64, false, true),
    (65, true, true),
    (96, false, false),
    (127, true, false),
    (128, false, false),
    (128, true, true),
  ] {
    let mask = if width == 128 { u128::MAX } else { (1u128 << width) - 1 };
    let p = CrcParams {
      width,
      polynomial: (0x9E37_79B9_7F4A_7C15_F39C_C060_5CED_C835 & mask) | 1,
      initial: 0xDEAD_BEEF_CAFE_BABE_0123_4567_89AB_CDEF & mask,
      reflect_in,
      reflect_out,
      xor_out: 0x5555_5555_5555_5555_5555_5555_5555_5555 & mask,
    };
    let m = built(p);
    for len in [0usize, 9, 16, 47, 300] {
      let data = gen_bytes(len, u64::from(width));
      let want = rocksoft(&p, &data);
      for k in Kernel::ALL {
        assert_eq!(m.apply(k, m.init(), &data), want, "width={width} {k} len={len}");
      }
    }
  }
}

#[test]
fn partial_final_byte_matches_rocksoft() {
  for p in [CrcParams::CRC16_XMODEM, CrcParams::CRC32_ISO_HDLC, CrcParams::CRC12_UMTS, CrcParams::CRC82_DARC] {
    let m = built(p);
    let data = gen_bytes(40, 7);
    for bits in [1usize, 3, 8, 13, 127, 129, 319] {
      let want = rocksoft_bits(&p, &data, bits);
      for k in Kernel::ALL {
        assert_eq!(m.apply_bits(k, m.init(), &data, bits), want, "{p:?} {k} bits={bits}");
      }
    }
  }
}

#[test]
fn zeros_matches_zero_bytes() {
  for p in [CrcParams::CRC32_ISCSI, CrcParams::CRC5_USB, CrcParams::CRC82_DARC] {
    let m = built(p);
    let crc = m.bitwise(m.init(), b"prefix");
    for n in [0usize, 1, 63, 64, 65, 1000, 4096] {
      assert_eq!(m.zeros(crc, n), m.slice16(crc, &vec![0u8; n]), "{p:?} n={n}");
    }
  }
}

#[test]
fn combine_with_large_second_length() {
  // Exercise the exponent walk over many bits without allocating gigabytes:
  // zeros(crc(A), n) == combine(crc(A), crc(0^n), n) by construction.
  let m = built(CrcParams::CRC64_XZ);
  let crc_a = m.bitwise(m.init(), b"abc");
  let n = 1usize << 20;
  let crc_zeros = m.zeros(m.init(), n);
  assert_eq!(m.combine(crc_a, crc_zeros, n), m.zeros(crc_a, n));
}
