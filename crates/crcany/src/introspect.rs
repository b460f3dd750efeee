//! Model introspection.
//!
//! A cheap, allocation-free snapshot of what a [`Model`] resolved to and which
//! kernels its current tables allow.
//!
//! # Examples
//!
//! ```
//! use crcany::{Kernel, Model, params::CrcParams};
//!
//! let mut model = Model::from_params(CrcParams::CRC82_DARC)?;
//! model.build_byte_table()?;
//!
//! let info = model.info();
//! assert!(info.supports(Kernel::Bytewise));
//! assert!(!info.supports(Kernel::Slice16));
//! println!("{info}");
//! // width=82 strategy=reflected/dword kernels=[reference/bitwise, portable/bytewise] tables=4096B
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use core::fmt;

use crate::model::{Kernel, Model, Strategy};

/// Snapshot of a model's configuration and table state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
  width: u16,
  strategy: Strategy,
  reverse: bool,
  kernels: [bool; 3],
  table_bytes: usize,
  combine_cycle: Option<(usize, Option<usize>)>,
}

impl ModelInfo {
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u16 {
    self.width
  }

  #[inline]
  #[must_use]
  pub const fn strategy(&self) -> Strategy {
    self.strategy
  }

  /// Whether the model is cross-reflected.
  #[inline]
  #[must_use]
  pub const fn reverse(&self) -> bool {
    self.reverse
  }

  /// Whether `kernel` could run when the snapshot was taken.
  #[inline]
  #[must_use]
  pub fn supports(&self, kernel: Kernel) -> bool {
    matches!(self.kernels.get(kernel as usize), Some(true))
  }

  /// Names of the kernels usable with the tables built so far.
  pub fn kernel_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    Kernel::ALL
      .into_iter()
      .filter(|&k| self.supports(k))
      .map(Kernel::name)
  }

  /// Heap bytes held by tables.
  #[inline]
  #[must_use]
  pub const fn table_bytes(&self) -> usize {
    self.table_bytes
  }

  /// Combine table length and wrap index, if that table is built.
  #[inline]
  #[must_use]
  pub const fn combine_cycle(&self) -> Option<(usize, Option<usize>)> {
    self.combine_cycle
  }
}

impl Model {
  /// Snapshot of this model for diagnostics.
  #[must_use]
  pub fn info(&self) -> ModelInfo {
    ModelInfo {
      width: self.width(),
      strategy: self.strategy(),
      reverse: self.reverse(),
      kernels: Kernel::ALL.map(|k| self.supports(k)),
      table_bytes: self.table_bytes(),
      combine_cycle: self.combine_cycle(),
    }
  }
}

impl fmt::Display for ModelInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "width={} strategy={}", self.width, self.strategy)?;
    if self.reverse {
      f.write_str(" reversed")?;
    }
    f.write_str(" kernels=[")?;
    for (i, name) in self.kernel_names().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    write!(f, "] tables={}B", self.table_bytes)?;
    match self.combine_cycle {
      Some((len, Some(back))) => write!(f, " combine={len}->{back}"),
      Some((len, None)) => write!(f, " combine={len}"),
      None => Ok(()),
    }
  }
}

impl fmt::Debug for ModelInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ModelInfo")
      .field("width", &self.width)
      .field("strategy", &format_args!("{}", self.strategy))
      .field("reverse", &self.reverse)
      .field("kernels", &format_args!("{:?}", self.kernels))
      .field("table_bytes", &self.table_bytes)
      .field("combine_cycle", &self.combine_cycle)
      .finish()
  }
}
