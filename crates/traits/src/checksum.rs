//! Streaming checksum traits.
//!
//! Traits for checksum state machines whose algorithm is chosen at runtime
//! (a CRC model, a kernel), so construction lives on the implementor rather
//! than on the trait.
//!
//! - **Streaming**: Incremental updates for large data
//! - **Parallelism**: Combine operation for parallel chunk processing

use core::fmt::Debug;

/// Incremental checksum state.
///
/// # Usage
///
/// ```rust,ignore
/// use crcany::{Crc, Kernel, Model};
/// use traits::Checksum;
///
/// let mut model = Model::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF)?;
/// model.build_tables()?;
///
/// let mut hasher = Crc::new(&model, Kernel::Slice16);
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// let crc = hasher.finalize();
/// ```
///
/// # Implementor Requirements
///
/// - `finalize()` must be idempotent (calling multiple times returns same value)
/// - `reset()` must restore the state it was constructed with
pub trait Checksum: Clone {
  /// The checksum output type.
  type Output: Copy + Eq + Debug;

  /// Update the state with additional data.
  fn update(&mut self, data: &[u8]);

  /// Update the state with multiple non-contiguous buffers.
  ///
  /// Semantics are identical to calling [`update`](Self::update) on each buffer
  /// in order.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Update the state with `std::io::IoSlice` buffers.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Return the checksum of everything processed so far.
  ///
  /// Does not consume the state; further updates continue from the same point.
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the state to how it was constructed.
  fn reset(&mut self);

  /// Feed `data` into a fresh copy of this state and return the checksum.
  ///
  /// The receiver is only used as a template; it is not modified.
  #[inline]
  #[must_use]
  fn checksum(&self, data: &[u8]) -> Self::Output {
    let mut h = self.clone();
    h.reset();
    h.update(data);
    h.finalize()
  }
}

/// Checksums that support parallel computation via combination.
///
/// The combine operation computes `crc(A || B)` from `crc(A)`, `crc(B)`, and `len(B)`
/// in O(log n) time:
///
/// ```text
/// crc(A || B) = (crc(A) ^ crc(empty)) * x^(8*len(B)) mod G(x) XOR crc(B)
/// ```
pub trait ChecksumCombine: Checksum {
  /// Combine two checksums.
  ///
  /// * `crc_a` - Checksum of the first part (A)
  /// * `crc_b` - Checksum of the second part (B)
  /// * `len_b` - Length of the second part in bytes
  #[must_use]
  fn combine(&self, crc_a: Self::Output, crc_b: Self::Output, len_b: usize) -> Self::Output;
}
