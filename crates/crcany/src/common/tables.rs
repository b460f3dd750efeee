//! Owned lookup tables and their index arithmetic.
//!
//! Tables are heap-allocated on demand, written once by a builder and read-only
//! afterwards. Entries are raw kernel registers: the byte table holds the
//! register after feeding byte `k` into a zero register, and level `n` of the
//! slice table holds the same register pushed through `n` further zero bytes.
//! Neither `xor_out` nor the output reversal ever enters a table, so levels
//! derive from one another with the plain byte recurrence.
//!
//! Entries are stored as registers rather than raw memory, and the slice
//! kernel loads input blocks with explicit little- or big-endian reads, so
//! the layout is the same on every host.

// SAFETY: Every index here is a `u8` into a 256-entry array, or a level below
// `SLICES` into a `SLICES`-entry array. Bounds are statically guaranteed.
#![allow(clippy::indexing_slicing)]

use alloc::{boxed::Box, vec::Vec};
use core::{fmt, mem::size_of};

use super::{register::Register, shape::Shape};
use crate::error::TableError;

/// Bytes consumed per slice-by-16 iteration, and number of slice levels.
pub const SLICES: usize = 16;

/// Upper bound on combination table entries: enough for any 64-bit exponent.
pub const COMB_MAX: usize = 67;

/// Identifies one of a model's lazily built tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
  /// 256 entries for the byte-at-a-time kernel.
  Byte,
  /// 16 x 256 entries for the slice-by-16 kernel.
  Slice,
  /// Powers `x^(2^k) mod G` for combine and zeros.
  Combine,
}

impl TableKind {
  pub const ALL: [Self; 3] = [Self::Byte, Self::Slice, Self::Combine];

  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Byte => "byte",
      Self::Slice => "slice",
      Self::Combine => "combine",
    }
  }
}

impl fmt::Display for TableKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Allocation
// ─────────────────────────────────────────────────────────────────────────────

fn alloc_error<T>(kind: TableKind, n: usize) -> TableError {
  TableError::Alloc {
    kind,
    bytes: n.saturating_mul(size_of::<T>()),
  }
}

/// An empty `Vec` with room for exactly `n` elements, reporting failure.
pub(crate) fn try_with_capacity<T>(kind: TableKind, n: usize) -> Result<Vec<T>, TableError> {
  let mut v = Vec::new();
  v.try_reserve_exact(n).map_err(|_| alloc_error::<T>(kind, n))?;
  Ok(v)
}

fn try_vec<T: Copy>(kind: TableKind, n: usize, fill: T) -> Result<Vec<T>, TableError> {
  let mut v = try_with_capacity(kind, n)?;
  v.resize(n, fill);
  Ok(v)
}

/// Allocate a boxed array on the heap without touching the stack.
fn try_boxed<T: Copy, const N: usize>(kind: TableKind, fill: T) -> Result<Box<[T; N]>, TableError> {
  try_vec(kind, N, fill)?
    .into_boxed_slice()
    .try_into()
    .map_err(|_| alloc_error::<T>(kind, N))
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte table
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq)]
pub struct ByteTable<R>(Box<[R; 256]>);

impl<R: Register> ByteTable<R> {
  pub fn build(shape: &Shape<R>) -> Result<Self, TableError> {
    let mut table = try_boxed::<R, 256>(TableKind::Byte, R::ZERO)?;
    for (k, slot) in (0..=u8::MAX).zip(table.iter_mut()) {
      *slot = shape.feed_byte(R::ZERO, k);
    }
    Ok(Self(table))
  }

  #[inline(always)]
  pub fn get(&self, index: u8) -> R {
    self.0[usize::from(index)]
  }

  /// Push one byte through a kernel register. `REFLECT` is the model's
  /// orientation.
  #[inline(always)]
  pub fn step<const REFLECT: bool>(&self, reg: R, byte: u8) -> R {
    if REFLECT {
      (reg >> 8) ^ self.get(reg.low_byte() ^ byte)
    } else {
      (reg << 8) ^ self.get(reg.top_byte() ^ byte)
    }
  }

  pub const fn bytes() -> usize {
    256 * size_of::<R>()
  }
}

impl<R> fmt::Debug for ByteTable<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ByteTable").finish_non_exhaustive()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slice table
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq)]
pub struct SliceTable<R>(Box<[[R; 256]; SLICES]>);

impl<R: Register> SliceTable<R> {
  /// Derive all levels from an already built byte table.
  pub fn build(shape: &Shape<R>, byte: &ByteTable<R>) -> Result<Self, TableError> {
    let mut levels = try_boxed::<[R; 256], SLICES>(TableKind::Slice, [R::ZERO; 256])?;
    levels[0] = *byte.0;
    for n in 1..SLICES {
      let (done, rest) = levels.split_at_mut(n);
      for (slot, &prev) in rest[0].iter_mut().zip(done[n - 1].iter()) {
        *slot = if shape.reflect { byte.step::<true>(prev, 0) } else { byte.step::<false>(prev, 0) };
      }
    }
    Ok(Self(levels))
  }

  /// Entry `byte` of table `level`.
  #[inline(always)]
  pub fn at(&self, level: usize, byte: u8) -> R {
    self.0[level][usize::from(byte)]
  }

  /// Fold 16 folded block bytes into a register.
  ///
  /// Byte `i` of `idx` is followed by `15 - i` more bytes of the block, so
  /// it is looked up at that level.
  #[inline(always)]
  pub fn lookup16(&self, idx: &[u8; SLICES]) -> R {
    let mut acc = R::ZERO;
    for (i, &b) in idx.iter().enumerate() {
      acc ^= self.at(SLICES - 1 - i, b);
    }
    acc
  }

  pub const fn bytes() -> usize {
    SLICES * 256 * size_of::<R>()
  }
}

impl<R> fmt::Debug for SliceTable<R> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SliceTable").finish_non_exhaustive()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Combination table
// ─────────────────────────────────────────────────────────────────────────────

/// `x^(2^k) mod G` for `k` in `0..len`, low-aligned.
///
/// When squaring revisits an earlier power, the table stops there:
/// `entries[cycle]` would equal `entries[back]`, and every later power repeats
/// the loop `back..cycle`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombTable<R> {
  pub(crate) entries: Vec<R>,
  pub(crate) cycle: usize,
  pub(crate) back: Option<usize>,
}

impl<R: Register> CombTable<R> {
  #[inline]
  pub fn get(&self, k: usize) -> R {
    self.entries[k]
  }

  /// Length of the linear prefix (table length).
  #[inline]
  #[must_use]
  pub fn cycle(&self) -> usize {
    self.cycle
  }

  /// Index the walk wraps to after `cycle`, if squaring repeated.
  #[inline]
  #[must_use]
  pub fn back(&self) -> Option<usize> {
    self.back
  }

  pub fn bytes(&self) -> usize {
    self.entries.capacity() * size_of::<R>()
  }
}
