//! The CRC model: normalized parameters plus lazily built tables.
//!
//! A [`Model`] resolves its register type once, at construction: widths up to
//! 64 run on a single `u64`, wider models on a [`Dword`]. Every operation
//! dispatches on that choice with a single `match`, then runs the shared
//! generic kernel. CRC values cross the API as `u128`, right-aligned in the
//! low `width` bits; bits above `width` in inputs are ignored.
//!
//! # Tables
//!
//! | Table | Built by | Needed by |
//! |-------|----------|-----------|
//! | byte | [`Model::build_byte_table`] | [`Model::bytewise`], [`Model::slice16`] |
//! | slice | [`Model::build_slice_table`] | [`Model::slice16`] |
//! | combine | [`Model::build_combine_table`] | [`Model::combine`], large [`Model::zeros`] |
//!
//! Tables are never built implicitly. Calling a kernel whose table is missing
//! is a contract violation and panics.

use core::fmt;

use crate::{
  common::{
    combine,
    dword::Dword,
    portable,
    reference,
    register::Register,
    shape::Shape,
    tables::{ByteTable, CombTable, SliceTable, TableKind},
  },
  config,
  error::{ModelError, TableError},
  params::CrcParams,
};

/// The catalog check input.
pub const CHECK_INPUT: &[u8] = b"123456789";

// ─────────────────────────────────────────────────────────────────────────────
// Strategy / Kernel
// ─────────────────────────────────────────────────────────────────────────────

/// Register layout and bit order, resolved once per model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
  /// LSB-first, width <= 64.
  ReflectedWord,
  /// MSB-first, width <= 64.
  NormalWord,
  /// LSB-first, width 65..=128.
  ReflectedDword,
  /// MSB-first, width 65..=128.
  NormalDword,
}

impl Strategy {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::ReflectedWord => "reflected/word",
      Self::NormalWord => "normal/word",
      Self::ReflectedDword => "reflected/dword",
      Self::NormalDword => "normal/dword",
    }
  }

  #[must_use]
  pub const fn is_dword(self) -> bool {
    matches!(self, Self::ReflectedDword | Self::NormalDword)
  }
}

impl fmt::Display for Strategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Computation kernel, chosen by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Kernel {
  /// One bit at a time; needs no tables.
  #[default]
  Bitwise,
  /// One byte per lookup; needs the byte table.
  Bytewise,
  /// Sixteen bytes per iteration; needs the byte and slice tables.
  Slice16,
}

impl Kernel {
  pub const ALL: [Self; 3] = [Self::Bitwise, Self::Bytewise, Self::Slice16];

  /// Stable kernel name, e.g. `"portable/slice16"`.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Bitwise => "reference/bitwise",
      Self::Bytewise => "portable/bytewise",
      Self::Slice16 => "portable/slice16",
    }
  }

  /// Tables that must be built before this kernel runs.
  #[must_use]
  pub const fn required_tables(self) -> &'static [TableKind] {
    match self {
      Self::Bitwise => &[],
      Self::Bytewise => &[TableKind::Byte],
      Self::Slice16 => &[TableKind::Byte, TableKind::Slice],
    }
  }
}

impl fmt::Display for Kernel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine (one register type)
// ─────────────────────────────────────────────────────────────────────────────

#[cold]
#[inline(never)]
#[track_caller]
fn missing_table(kind: TableKind, op: &str) -> ! {
  panic!("{op} needs the {kind} table; build it first")
}

#[derive(Clone, Debug)]
struct Tables<R> {
  byte: Option<ByteTable<R>>,
  slice: Option<SliceTable<R>>,
  comb: Option<CombTable<R>>,
}

impl<R> Default for Tables<R> {
  fn default() -> Self {
    Self {
      byte: None,
      slice: None,
      comb: None,
    }
  }
}

#[derive(Clone, Debug)]
struct Engine<R> {
  shape: Shape<R>,
  tables: Tables<R>,
}

impl<R: Register> Engine<R> {
  fn new(params: &CrcParams) -> Self {
    Self {
      shape: Shape::new(params),
      tables: Tables::default(),
    }
  }

  #[inline]
  fn reg(v: u128) -> R {
    R::from_u128(v)
  }

  fn has(&self, kind: TableKind) -> bool {
    match kind {
      TableKind::Byte => self.tables.byte.is_some(),
      TableKind::Slice => self.tables.slice.is_some(),
      TableKind::Combine => self.tables.comb.is_some(),
    }
  }

  fn build_byte(&mut self) -> Result<(), TableError> {
    if self.tables.byte.is_none() {
      self.tables.byte = Some(ByteTable::build(&self.shape)?);
    }
    Ok(())
  }

  #[track_caller]
  fn build_slice(&mut self) -> Result<(), TableError> {
    if self.tables.slice.is_none() {
      let Some(byte) = self.tables.byte.as_ref() else {
        missing_table(TableKind::Byte, "build_slice_table")
      };
      self.tables.slice = Some(SliceTable::build(&self.shape, byte)?);
    }
    Ok(())
  }

  fn build_comb(&mut self) -> Result<(), TableError> {
    if self.tables.comb.is_none() {
      self.tables.comb = Some(combine::build_table(&self.shape)?);
    }
    Ok(())
  }

  fn table_bytes(&self) -> usize {
    let byte = if self.tables.byte.is_some() { ByteTable::<R>::bytes() } else { 0 };
    let slice = if self.tables.slice.is_some() { SliceTable::<R>::bytes() } else { 0 };
    let comb = self.tables.comb.as_ref().map_or(0, CombTable::bytes);
    byte + slice + comb
  }

  fn bitwise(&self, crc: u128, data: &[u8], bits: usize) -> u128 {
    reference::bitwise(&self.shape, Self::reg(crc), data, bits).to_u128()
  }

  #[track_caller]
  fn bytewise(&self, crc: u128, data: &[u8], bits: usize) -> u128 {
    let Some(byte) = self.tables.byte.as_ref() else {
      missing_table(TableKind::Byte, "bytewise")
    };
    portable::bytewise(&self.shape, byte, Self::reg(crc), data, bits).to_u128()
  }

  #[track_caller]
  fn slice16(&self, crc: u128, data: &[u8], bits: usize) -> u128 {
    let Some(slice) = self.tables.slice.as_ref() else {
      missing_table(TableKind::Slice, "slice16")
    };
    let Some(byte) = self.tables.byte.as_ref() else {
      missing_table(TableKind::Byte, "slice16")
    };
    portable::slice16(&self.shape, slice, byte, Self::reg(crc), data, bits).to_u128()
  }

  #[track_caller]
  fn combine(&self, crc1: u128, crc2: u128, len2: u64) -> u128 {
    let Some(comb) = self.tables.comb.as_ref() else {
      missing_table(TableKind::Combine, "combine")
    };
    combine::combine(&self.shape, comb, Self::reg(crc1), Self::reg(crc2), len2).to_u128()
  }

  #[track_caller]
  fn zeros(&self, crc: u128, n: u64, bitwise_max: u64) -> u128 {
    combine::zeros(&self.shape, self.tables.comb.as_ref(), Self::reg(crc), n, bitwise_max).to_u128()
  }

  fn residue(&self) -> u128 {
    combine::residue(&self.shape).to_u128()
  }

  fn comb_cycle(&self) -> Option<(usize, Option<usize>)> {
    self.tables.comb.as_ref().map(|t| (t.cycle(), t.back()))
  }
}

#[derive(Clone, Debug)]
enum Core {
  Word(Engine<u64>),
  Dword(Engine<Dword>),
}

/// Run `$body` with `$e` bound to the model's engine, whatever its register.
macro_rules! dispatch {
  ($core:expr, $e:ident => $body:expr) => {
    match $core {
      Core::Word($e) => $body,
      Core::Dword($e) => $body,
    }
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Model
// ─────────────────────────────────────────────────────────────────────────────

/// A CRC definition, ready to compute.
///
/// # Examples
///
/// ```
/// use crcany::Model;
///
/// let mut crc32 = Model::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF)?;
/// assert_eq!(crc32.bitwise(crc32.init(), b"123456789"), 0xCBF4_3926);
///
/// crc32.build_tables()?;
/// let (a, b) = b"123456789".split_at(4);
/// let crc_a = crc32.slice16(crc32.init(), a);
/// let crc_b = crc32.slice16(crc32.init(), b);
/// assert_eq!(crc32.combine(crc_a, crc_b, b.len()), 0xCBF4_3926);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Model {
  params: CrcParams,
  core: Core,
}

impl Model {
  /// Normalize catalog parameters into a model.
  ///
  /// `poly` omits the `x^width` term. No tables are allocated.
  ///
  /// # Errors
  ///
  /// See [`CrcParams::validate`].
  pub fn new(
    width: u16,
    poly: u128,
    init: u128,
    reflect_in: bool,
    reflect_out: bool,
    xor_out: u128,
  ) -> Result<Self, ModelError> {
    Self::from_params(CrcParams {
      width,
      polynomial: poly,
      initial: init,
      reflect_in,
      reflect_out,
      xor_out,
    })
  }

  /// Normalize a parameter set into a model.
  ///
  /// # Errors
  ///
  /// See [`CrcParams::validate`].
  pub fn from_params(params: CrcParams) -> Result<Self, ModelError> {
    params.validate()?;
    let core = if params.fits_word() {
      Core::Word(Engine::new(&params))
    } else {
      Core::Dword(Engine::new(&params))
    };
    Ok(Self { params, core })
  }

  // ── Accessors ──────────────────────────────────────────────────────────────

  /// The parameters this model was built from.
  #[inline]
  #[must_use]
  pub const fn params(&self) -> CrcParams {
    self.params
  }

  #[inline]
  #[must_use]
  pub const fn width(&self) -> u16 {
    self.params.width
  }

  /// CRC of the empty message; the starting value for every kernel.
  #[must_use]
  pub fn init(&self) -> u128 {
    dispatch!(&self.core, e => e.shape.init.to_u128())
  }

  /// Whether input is processed LSB-first.
  #[inline]
  #[must_use]
  pub const fn reflect(&self) -> bool {
    self.params.reflect_in
  }

  /// Whether output orientation differs from processing orientation.
  #[inline]
  #[must_use]
  pub const fn reverse(&self) -> bool {
    self.params.reflect_in != self.params.reflect_out
  }

  #[must_use]
  pub const fn strategy(&self) -> Strategy {
    match (&self.core, self.params.reflect_in) {
      (Core::Word(_), true) => Strategy::ReflectedWord,
      (Core::Word(_), false) => Strategy::NormalWord,
      (Core::Dword(_), true) => Strategy::ReflectedDword,
      (Core::Dword(_), false) => Strategy::NormalDword,
    }
  }

  #[must_use]
  pub fn has_table(&self, kind: TableKind) -> bool {
    dispatch!(&self.core, e => e.has(kind))
  }

  /// Whether `kernel` can run with the tables built so far.
  #[must_use]
  pub fn supports(&self, kernel: Kernel) -> bool {
    kernel.required_tables().iter().all(|&k| self.has_table(k))
  }

  /// Heap bytes held by built tables.
  #[must_use]
  pub fn table_bytes(&self) -> usize {
    dispatch!(&self.core, e => e.table_bytes())
  }

  /// Combine table length and wrap target, if the table is built.
  #[must_use]
  pub fn combine_cycle(&self) -> Option<(usize, Option<usize>)> {
    dispatch!(&self.core, e => e.comb_cycle())
  }

  // ── Tables ─────────────────────────────────────────────────────────────────

  /// Build the 256-entry byte table. A no-op if already built.
  ///
  /// # Errors
  ///
  /// [`TableError::Alloc`] if memory cannot be obtained; the model stays
  /// usable by kernels that do not need this table.
  pub fn build_byte_table(&mut self) -> Result<(), TableError> {
    dispatch!(&mut self.core, e => e.build_byte())
  }

  /// Build the 16 x 256 slice table. A no-op if already built.
  ///
  /// # Errors
  ///
  /// [`TableError::Alloc`] if memory cannot be obtained.
  ///
  /// # Panics
  ///
  /// Panics if the byte table has not been built.
  #[track_caller]
  pub fn build_slice_table(&mut self) -> Result<(), TableError> {
    dispatch!(&mut self.core, e => e.build_slice())
  }

  /// Build the `x^(2^k) mod G` table. A no-op if already built.
  ///
  /// # Errors
  ///
  /// [`TableError::Alloc`] if memory cannot be obtained.
  pub fn build_combine_table(&mut self) -> Result<(), TableError> {
    dispatch!(&mut self.core, e => e.build_comb())
  }

  /// Build the byte, slice and combine tables, in that order.
  ///
  /// # Errors
  ///
  /// The first [`TableError`] encountered; tables built before it are kept.
  pub fn build_tables(&mut self) -> Result<(), TableError> {
    self.build_byte_table()?;
    self.build_slice_table()?;
    self.build_combine_table()
  }

  /// Drop every table. The model can rebuild them later.
  pub fn release_tables(&mut self) {
    dispatch!(&mut self.core, e => e.tables = Tables::default());
  }

  // ── Kernels ────────────────────────────────────────────────────────────────

  /// Bit-at-a-time update of `crc` with `data`.
  #[must_use]
  pub fn bitwise(&self, crc: u128, data: &[u8]) -> u128 {
    self.bitwise_bits(crc, data, data.len() * 8)
  }

  /// Bit-at-a-time update with the first `bits` bits of `data`.
  ///
  /// A partial final byte contributes its low bits for reflected models and
  /// its high bits otherwise.
  ///
  /// # Panics
  ///
  /// Panics if `bits > data.len() * 8`.
  #[must_use]
  #[track_caller]
  pub fn bitwise_bits(&self, crc: u128, data: &[u8], bits: usize) -> u128 {
    dispatch!(&self.core, e => e.bitwise(crc, data, bits))
  }

  /// Byte-table update of `crc` with `data`.
  ///
  /// # Panics
  ///
  /// Panics if the byte table has not been built.
  #[must_use]
  #[track_caller]
  pub fn bytewise(&self, crc: u128, data: &[u8]) -> u128 {
    self.bytewise_bits(crc, data, data.len() * 8)
  }

  /// Byte-table update with the first `bits` bits of `data`.
  ///
  /// # Panics
  ///
  /// Panics if the byte table has not been built or `bits > data.len() * 8`.
  #[must_use]
  #[track_caller]
  pub fn bytewise_bits(&self, crc: u128, data: &[u8], bits: usize) -> u128 {
    dispatch!(&self.core, e => e.bytewise(crc, data, bits))
  }

  /// Slice-by-16 update of `crc` with `data`.
  ///
  /// # Panics
  ///
  /// Panics if the byte or slice table has not been built.
  #[must_use]
  #[track_caller]
  pub fn slice16(&self, crc: u128, data: &[u8]) -> u128 {
    self.slice16_bits(crc, data, data.len() * 8)
  }

  /// Slice-by-16 update with the first `bits` bits of `data`.
  ///
  /// # Panics
  ///
  /// Panics if the byte or slice table has not been built or
  /// `bits > data.len() * 8`.
  #[must_use]
  #[track_caller]
  pub fn slice16_bits(&self, crc: u128, data: &[u8], bits: usize) -> u128 {
    dispatch!(&self.core, e => e.slice16(crc, data, bits))
  }

  /// Update with the given kernel.
  ///
  /// # Panics
  ///
  /// Panics if a table `kernel` needs has not been built.
  #[must_use]
  #[track_caller]
  pub fn apply(&self, kernel: Kernel, crc: u128, data: &[u8]) -> u128 {
    self.apply_bits(kernel, crc, data, data.len() * 8)
  }

  /// Update with the given kernel and bit length.
  ///
  /// # Panics
  ///
  /// Panics if a table `kernel` needs has not been built or
  /// `bits > data.len() * 8`.
  #[must_use]
  #[track_caller]
  pub fn apply_bits(&self, kernel: Kernel, crc: u128, data: &[u8], bits: usize) -> u128 {
    match kernel {
      Kernel::Bitwise => self.bitwise_bits(crc, data, bits),
      Kernel::Bytewise => self.bytewise_bits(crc, data, bits),
      Kernel::Slice16 => self.slice16_bits(crc, data, bits),
    }
  }

  // ── Polynomial arithmetic ──────────────────────────────────────────────────

  /// CRC of `A || B` from `crc1 = crc(A)`, `crc2 = crc(B)` and `len2 = len(B)`
  /// in bytes.
  ///
  /// # Panics
  ///
  /// Panics if the combine table has not been built.
  #[must_use]
  #[track_caller]
  pub fn combine(&self, crc1: u128, crc2: u128, len2: usize) -> u128 {
    self.combine_bits(crc1, crc2, bits_of(len2))
  }

  /// Like [`combine`](Self::combine), with the length of `B` in bits.
  ///
  /// # Panics
  ///
  /// Panics if the combine table has not been built.
  #[must_use]
  #[track_caller]
  pub fn combine_bits(&self, crc1: u128, crc2: u128, len2: u64) -> u128 {
    dispatch!(&self.core, e => e.combine(crc1, crc2, len2))
  }

  /// Append `bytes` zero bytes to the message behind `crc`.
  ///
  /// # Panics
  ///
  /// Panics if the count exceeds the bit-loop threshold (see
  /// [`config`](crate::config)) and the combine table has not been built.
  #[must_use]
  #[track_caller]
  pub fn zeros(&self, crc: u128, bytes: usize) -> u128 {
    self.zeros_bits(crc, bits_of(bytes))
  }

  /// Append `bits` zero bits to the message behind `crc`.
  ///
  /// # Panics
  ///
  /// Panics if `bits` exceeds the bit-loop threshold and the combine table
  /// has not been built.
  #[must_use]
  #[track_caller]
  pub fn zeros_bits(&self, crc: u128, bits: u64) -> u128 {
    let max = config::get().zeros_bitwise_max;
    dispatch!(&self.core, e => e.zeros(crc, bits, max))
  }

  // ── Catalog values ─────────────────────────────────────────────────────────

  /// CRC of the ASCII string `"123456789"`.
  #[must_use]
  pub fn check(&self) -> u128 {
    self.bitwise(self.init(), CHECK_INPUT)
  }

  /// Register contents after an error-free codeword, before the final XOR.
  #[must_use]
  pub fn residue(&self) -> u128 {
    dispatch!(&self.core, e => e.residue())
  }
}

/// Bit length of `bytes` bytes.
#[inline]
pub(crate) fn bits_of(bytes: usize) -> u64 {
  (bytes as u64).wrapping_mul(8)
}

impl TryFrom<CrcParams> for Model {
  type Error = ModelError;

  fn try_from(params: CrcParams) -> Result<Self, Self::Error> {
    Self::from_params(params)
  }
}
