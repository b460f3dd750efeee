//! Streaming hasher over a borrowed model.

use traits::{Checksum, ChecksumCombine};

use crate::model::{Kernel, Model};

/// Incremental CRC state bound to a [`Model`] and a caller-chosen [`Kernel`].
///
/// # Example
///
/// ```
/// use crcany::{Checksum, ChecksumCombine, Crc, Kernel, Model, params::CrcParams};
///
/// let mut model = Model::from_params(CrcParams::CRC32_ISO_HDLC)?;
/// model.build_tables()?;
///
/// let mut hasher = Crc::new(&model, Kernel::Slice16);
/// hasher.update(b"1234");
/// hasher.update(b"56789");
/// assert_eq!(hasher.finalize(), 0xCBF4_3926);
///
/// let a = hasher.checksum(b"1234");
/// let b = hasher.checksum(b"56789");
/// assert_eq!(hasher.combine(a, b, 5), 0xCBF4_3926);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Crc<'m> {
  model: &'m Model,
  kernel: Kernel,
  start: u128,
  state: u128,
}

impl<'m> Crc<'m> {
  /// Start a new message.
  ///
  /// # Panics
  ///
  /// Panics if a table `kernel` needs has not been built.
  #[must_use]
  #[track_caller]
  pub fn new(model: &'m Model, kernel: Kernel) -> Self {
    Self::resume(model, kernel, model.init())
  }

  /// Continue a message whose CRC so far is `crc`.
  ///
  /// [`reset`](Checksum::reset) returns to `crc`, not to the empty message.
  /// [`checksum`](Checksum::checksum) still starts from the empty message, so
  /// its results feed [`combine`](ChecksumCombine::combine) directly.
  ///
  /// # Panics
  ///
  /// Panics if a table `kernel` needs has not been built.
  #[must_use]
  #[track_caller]
  pub fn resume(model: &'m Model, kernel: Kernel, crc: u128) -> Self {
    assert!(
      model.supports(kernel),
      "kernel {kernel} needs tables {:?}; build them first",
      kernel.required_tables()
    );
    Self {
      model,
      kernel,
      start: crc,
      state: crc,
    }
  }

  /// Feed the first `bits` bits of `data`.
  ///
  /// Bit-granular updates compose: the message is the concatenation of every
  /// bit fed so far, in order.
  ///
  /// # Panics
  ///
  /// Panics if `bits > data.len() * 8`.
  #[track_caller]
  pub fn update_bits(&mut self, data: &[u8], bits: usize) {
    self.state = self.model.apply_bits(self.kernel, self.state, data, bits);
  }

  #[inline]
  #[must_use]
  pub fn kernel(&self) -> Kernel {
    self.kernel
  }

  #[inline]
  #[must_use]
  pub fn model(&self) -> &'m Model {
    self.model
  }
}

impl Checksum for Crc<'_> {
  type Output = u128;

  #[inline]
  fn update(&mut self, data: &[u8]) {
    self.state = self.model.apply(self.kernel, self.state, data);
  }

  #[inline]
  fn finalize(&self) -> u128 {
    self.state
  }

  #[inline]
  fn reset(&mut self) {
    self.state = self.start;
  }

  #[inline]
  fn checksum(&self, data: &[u8]) -> u128 {
    self.model.apply(self.kernel, self.model.init(), data)
  }
}

impl ChecksumCombine for Crc<'_> {
  /// # Panics
  ///
  /// Panics if the model's combine table has not been built.
  fn combine(&self, crc_a: u128, crc_b: u128, len_b: usize) -> u128 {
    self.model.combine(crc_a, crc_b, len_b)
  }
}
