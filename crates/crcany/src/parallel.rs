//! Parallel CRC computation.
//!
//! Two layers, both built on `combine`:
//!
//! - [`Model::parallel`] (`std`): a fork-join orchestrator that splits the
//!   input into one block per worker, runs slice-by-16 on each block on its
//!   own scoped thread, joins, then folds the partial CRCs left to right.
//! - [`checksum_chunks`] / [`combine_checksums`]: helpers for callers that
//!   bring their own parallelism (rayon, a task pool, another machine). These
//!   work without `std`.
//!
//! # Example: With Rayon (user brings dependency)
//!
//! ```ignore
//! use rayon::prelude::*;
//! use crcany::{Kernel, parallel::combine_checksums};
//!
//! let parts: Vec<(u128, usize)> = data
//!     .par_chunks(1 << 20)
//!     .map(|chunk| (model.slice16(model.init(), chunk), chunk.len()))
//!     .collect();
//! let crc = combine_checksums(&model, &parts);
//! ```

use crate::model::{Kernel, Model};
#[cfg(feature = "std")]
use crate::{TableKind, config, error::ParallelError, model::bits_of};

/// CRC of the concatenation of `chunks`, each computed independently with
/// `kernel` and merged with `combine`.
///
/// Returns `model.init()` for no chunks.
///
/// # Panics
///
/// Panics if the combine table, or a table `kernel` needs, is not built.
///
/// # Example
///
/// ```
/// use crcany::{Kernel, Model, params::CrcParams, parallel::checksum_chunks};
///
/// let mut model = Model::from_params(CrcParams::CRC32_ISCSI)?;
/// model.build_tables()?;
/// let data = b"hello world";
/// let chunks: Vec<&[u8]> = data.chunks(4).collect();
/// assert_eq!(
///   checksum_chunks(&model, Kernel::Bytewise, &chunks),
///   model.bytewise(model.init(), data)
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
#[track_caller]
pub fn checksum_chunks(model: &Model, kernel: Kernel, chunks: &[&[u8]]) -> u128 {
  chunks.iter().fold(model.init(), |acc, chunk| {
    let part = model.apply(kernel, model.init(), chunk);
    model.combine(acc, part, chunk.len())
  })
}

/// Merge `(crc, byte_len)` pairs, in message order, into one CRC.
///
/// Returns `None` for an empty slice.
///
/// # Panics
///
/// Panics if the combine table is not built and more than one pair is given.
#[must_use]
#[track_caller]
pub fn combine_checksums(model: &Model, checksums: &[(u128, usize)]) -> Option<u128> {
  let ((first, _), rest) = checksums.split_first()?;
  Some(
    rest
      .iter()
      .fold(*first, |acc, &(crc, len)| model.combine(acc, crc, len)),
  )
}

// ─────────────────────────────────────────────────────────────────────────────
// Fork-join orchestrator
// ─────────────────────────────────────────────────────────────────────────────

/// Threads for a run: the request, or the configured count when the request
/// is 0 or exceeds it.
#[cfg(feature = "std")]
#[inline]
const fn worker_count(requested: usize, configured: usize) -> usize {
  if requested == 0 || requested > configured { configured } else { requested }
}

#[cfg(feature = "std")]
impl Model {
  /// Slice-by-16 CRC of `data` starting from `crc`, split across threads.
  ///
  /// `workers == 0` uses the configured worker count (see
  /// [`config`](crate::config)); larger requests are capped at it. Inputs
  /// shorter than the configured minimum run on the calling thread. The
  /// result always equals `self.slice16(crc, data)`.
  ///
  /// # Errors
  ///
  /// - [`ParallelError::TableNotBuilt`] if the byte, slice or combine table
  ///   is missing. Checked before any thread starts.
  /// - [`ParallelError::Spawn`] if the OS refuses a thread.
  /// - [`ParallelError::WorkerPanicked`] if a worker panics.
  pub fn parallel(&self, crc: u128, data: &[u8], workers: usize) -> Result<u128, ParallelError> {
    let tunables = config::get();
    self.parallel_with(crc, data, worker_count(workers, tunables.workers), tunables.parallel_min_len)
  }

  pub(crate) fn parallel_with(
    &self,
    crc: u128,
    data: &[u8],
    workers: usize,
    min_len: usize,
  ) -> Result<u128, ParallelError> {
    for kind in TableKind::ALL {
      if !self.has_table(kind) {
        return Err(ParallelError::TableNotBuilt(kind));
      }
    }

    let blocks = workers.min(data.len());
    if blocks <= 1 || data.len() < min_len {
      return Ok(self.slice16(crc, data));
    }

    // Later blocks are uniform; the first absorbs the remainder.
    let block_len = data.len() / blocks;
    let (first, rest) = data.split_at(data.len() - block_len * (blocks - 1));
    let init = self.init();

    std::thread::scope(|scope| {
      let handles = rest
        .chunks(block_len)
        .enumerate()
        .map(|(i, block)| {
          std::thread::Builder::new()
            .name(std::format!("crcany-worker-{}", i + 1))
            .spawn_scoped(scope, move || self.slice16(init, block))
        })
        .collect::<Result<alloc::vec::Vec<_>, _>>()
        .map_err(ParallelError::Spawn)?;

      let mut acc = self.slice16(crc, first);
      for handle in handles {
        let part = handle.join().map_err(|_| ParallelError::WorkerPanicked)?;
        acc = self.combine_bits(acc, part, bits_of(block_len));
      }
      Ok(acc)
    })
  }
}
