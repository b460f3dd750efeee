//! GF(2) polynomial arithmetic for CRC combination and zero padding.
//!
//! When you have `crc(A)` and `crc(B)`, you can compute `crc(A || B)` without
//! reprocessing `A`. A low-aligned register is an element of `GF(2)[x] / G(x)`,
//! and shifting `n` zero bits through it multiplies by `x^n`:
//!
//! ```text
//! crc(A || B) = (crc(A) ^ crc("")) * x^bitlen(B) mod G(x)  ^  crc(B)
//! ```
//!
//! `x^n mod G` comes from square-and-multiply over a table of `x^(2^k) mod G`.
//! For polynomials where `x` has small multiplicative order the squares start
//! repeating; the table records where, and exponent walks wrap through the
//! cycle instead of running off the end.

use super::{
  register::Register,
  shape::Shape,
  tables::{COMB_MAX, CombTable, TableKind, try_with_capacity},
};
use crate::error::TableError;

/// `a(x) * b(x) mod G(x)` on low-aligned operands.
///
/// Walks the coefficients of `a` from `x^0` upward, adding the matching power
/// of `b` into the product. Stops as soon as no higher coefficients remain.
#[inline]
#[must_use]
pub fn multmodp<R: Register>(shape: &Shape<R>, mut a: R, mut b: R) -> R {
  let mut prod = R::ZERO;
  loop {
    if shape.reflect {
      if (a & shape.top) != R::ZERO {
        prod ^= b;
        a ^= shape.top;
      }
      if a == R::ZERO {
        break;
      }
      a = a << 1;
    } else {
      if a.is_odd() {
        prod ^= b;
        a ^= R::ONE;
      }
      if a == R::ZERO {
        break;
      }
      a = a >> 1;
    }
    b = shape.times_x(b);
  }
  prod
}

/// Square `x^1` until the table is full or a power repeats.
pub fn build_table<R: Register>(shape: &Shape<R>) -> Result<CombTable<R>, TableError> {
  let mut entries = try_with_capacity(TableKind::Combine, COMB_MAX)?;

  let mut sq = shape.times_x(shape.x0());
  entries.push(sq);
  let mut back = None;
  while entries.len() < COMB_MAX {
    sq = multmodp(shape, sq, sq);
    if let Some(j) = entries.iter().position(|&e| e == sq) {
      back = Some(j);
      break;
    }
    entries.push(sq);
  }

  Ok(CombTable {
    cycle: entries.len(),
    entries,
    back,
  })
}

/// `x^n mod G(x)`, low-aligned.
#[must_use]
pub fn xnmodp<R: Register>(shape: &Shape<R>, table: &CombTable<R>, mut n: u64) -> R {
  let mut xp = shape.x0();
  let mut k = 0;
  while n != 0 {
    if n & 1 != 0 {
      xp = multmodp(shape, table.get(k), xp);
    }
    n >>= 1;
    k += 1;
    if k == table.cycle {
      k = match table.back {
        Some(back) => back,
        // Without a repeat the table covers every bit of a u64.
        None => unreachable!("exponent walk ran past a {}-entry combine table", table.cycle),
      };
    }
  }
  xp
}

/// CRC of `A || B` from `crc1 = crc(A)`, `crc2 = crc(B)` and `bitlen(B)`.
#[must_use]
pub fn combine<R: Register>(shape: &Shape<R>, table: &CombTable<R>, crc1: R, crc2: R, len2: u64) -> R {
  let mut crc1 = (crc1 ^ shape.init) & shape.mask;
  let mut crc2 = crc2 & shape.mask;
  if shape.reverse {
    crc1 = crc1.reverse(shape.width);
    crc2 = crc2.reverse(shape.width);
  }
  let crc = multmodp(shape, xnmodp(shape, table, len2), crc1) ^ crc2;
  if shape.reverse { crc.reverse(shape.width) } else { crc }
}

/// Push `n` zero bits through `crc`.
///
/// Counts up to `bitwise_max` use the bit loop; larger counts need the
/// combine table.
///
/// # Panics
///
/// Panics if `n > bitwise_max` and `table` is `None`.
#[must_use]
pub fn zeros<R: Register>(shape: &Shape<R>, table: Option<&CombTable<R>>, crc: R, n: u64, bitwise_max: u64) -> R {
  let mut reg = shape.raw(crc);
  if n <= bitwise_max {
    for _ in 0..n {
      reg = shape.times_x(reg);
    }
  } else if reg != R::ZERO {
    let Some(table) = table else {
      panic!("zeros over {n} bits needs the combine table; call build_combine_table first");
    };
    reg = multmodp(shape, xnmodp(shape, table, n), reg);
  }
  shape.cooked(reg)
}

/// Register contents after a valid codeword, before the final XOR.
#[must_use]
pub fn residue<R: Register>(shape: &Shape<R>) -> R {
  let mut reg = if shape.reverse { shape.xorout.reverse(shape.width) } else { shape.xorout };
  for _ in 0..shape.width {
    reg = shape.times_x(reg);
  }
  if shape.reverse { reg.reverse(shape.width) } else { reg }
}
