//! Runtime tunables (compiled defaults + environment overrides).
//!
//! This module centralizes the knobs that trade speed for nothing else:
//! - where `zeros()` switches from the bit loop to `x^n mod G`
//! - when the parallel orchestrator bothers spawning threads, and how many
//!
//! With `std`, the environment and the available parallelism are read once,
//! on first use, and the resolved values are cached:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CRCANY_ZEROS_BITWISE_MAX` | 512 bits |
//! | `CRCANY_PARALLEL_MIN_LEN` | 16 KiB |
//! | `CRCANY_WORKERS` | available parallelism |
//!
//! Empty or unparsable values are ignored.

/// Largest zero-bit count `zeros()` handles with the bit loop.
pub const DEFAULT_ZEROS_BITWISE_MAX: u64 = 512;

/// Inputs shorter than this are never split across threads.
pub const DEFAULT_PARALLEL_MIN_LEN: usize = 16 * 1024;

/// Effective tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tunables {
  /// Bit counts up to this use the bit loop in `zeros()`.
  pub zeros_bitwise_max: u64,
  /// Minimum input length, in bytes, for a multi-threaded run.
  pub parallel_min_len: usize,
  /// Workers used when the caller asks for 0. Always at least 1.
  pub workers: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Overrides {
  zeros_bitwise_max: Option<u64>,
  parallel_min_len: Option<usize>,
  workers: Option<usize>,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn parse<T: core::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    let value = value.trim();
    if value.is_empty() {
      return None;
    }
    value.parse::<T>().ok()
  }

  Overrides {
    zeros_bitwise_max: parse("CRCANY_ZEROS_BITWISE_MAX"),
    parallel_min_len: parse("CRCANY_PARALLEL_MIN_LEN"),
    workers: parse("CRCANY_WORKERS"),
  }
}

#[cfg(feature = "std")]
fn default_workers() -> usize {
  std::thread::available_parallelism().map_or(1, core::num::NonZeroUsize::get)
}

#[inline]
#[must_use]
fn resolve(ov: Overrides, workers: usize) -> Tunables {
  Tunables {
    zeros_bitwise_max: ov.zeros_bitwise_max.unwrap_or(DEFAULT_ZEROS_BITWISE_MAX),
    parallel_min_len: ov.parallel_min_len.unwrap_or(DEFAULT_PARALLEL_MIN_LEN),
    workers: ov.workers.unwrap_or(workers).max(1),
  }
}

/// Resolved tunables, computed on first use. Later calls touch no
/// environment or OS state.
#[cfg(feature = "std")]
#[must_use]
pub fn cached() -> &'static Tunables {
  use std::sync::OnceLock;
  static TUNABLES: OnceLock<Tunables> = OnceLock::new();
  TUNABLES.get_or_init(|| resolve(read_env_overrides(), default_workers()))
}

/// Get the effective tunables.
#[cfg(feature = "std")]
#[inline]
#[must_use]
pub fn get() -> Tunables {
  *cached()
}

/// Get the effective tunables (compiled defaults, one worker).
#[cfg(not(feature = "std"))]
#[inline]
#[must_use]
pub fn get() -> Tunables {
  resolve(Overrides::default(), 1)
}
