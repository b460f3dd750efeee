//! Error types.

use core::fmt;

use crate::common::tables::TableKind;

/// Model parameter that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
  Polynomial,
  Initial,
  XorOut,
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Polynomial => "polynomial",
      Self::Initial => "initial value",
      Self::XorOut => "xor_out",
    })
  }
}

/// Rejected model parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
  /// Width outside `1..=128`.
  #[error("CRC width {0} is outside 1..=128")]
  Width(u16),
  /// A parameter has bits set at or above `width`.
  #[error("{field} does not fit in {width} bits")]
  OutOfRange { field: Field, width: u16 },
  /// The generator's `x^0` coefficient is zero.
  #[error("polynomial must have its lowest bit set")]
  EvenPolynomial,
}

/// A table builder could not obtain memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
  #[error("failed to allocate {bytes} bytes for the {kind} table")]
  Alloc { kind: TableKind, bytes: usize },
}

/// Failure of [`Model::parallel`](crate::Model::parallel).
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum ParallelError {
  /// Reported before any worker is started.
  #[error("the {0} table must be built before a parallel run")]
  TableNotBuilt(TableKind),
  #[error("failed to spawn a worker thread")]
  Spawn(#[source] std::io::Error),
  #[error("a worker thread panicked")]
  WorkerPanicked,
}
