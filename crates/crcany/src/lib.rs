//! Generic CRC engine for any model up to 128 bits wide.
//!
//! A [`Model`] is built from the six catalog parameters (width, polynomial,
//! init, reflect-in, reflect-out, xor-out) and offers three kernels the caller
//! chooses between, plus polynomial arithmetic on finished CRCs.
//!
//! # Kernels
//!
//! | Kernel | Tables | Bytes/iter | Name |
//! |--------|--------|------------|------|
//! | [`Model::bitwise`] | none | 1/8 | `reference/bitwise` |
//! | [`Model::bytewise`] | byte (256 entries) | 1 | `portable/bytewise` |
//! | [`Model::slice16`] | byte + slice (16 x 256) | 16 | `portable/slice16` |
//!
//! All three accept a bit length, so messages need not end on a byte
//! boundary, and all three resume from any CRC they returned.
//!
//! # Combine and zeros
//!
//! [`Model::combine`] computes `crc(A || B)` from `crc(A)`, `crc(B)` and
//! `len(B)` in O(log n); [`Model::zeros`] appends zero bytes the same way.
//! [`Model::parallel`] (`std`) builds on both to split slice-by-16 across
//! threads.
//!
//! # Example
//!
//! ```rust
//! use crcany::{Checksum, Crc, Kernel, Model};
//!
//! // CRC-32/ISO-HDLC
//! let mut model = Model::new(32, 0x04C1_1DB7, 0xFFFF_FFFF, true, true, 0xFFFF_FFFF)?;
//! assert_eq!(model.check(), 0xCBF4_3926);
//!
//! model.build_tables()?;
//! let mut hasher = Crc::new(&model, Kernel::Slice16);
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), 0xCBF4_3926);
//!
//! let (a, b) = b"123456789".split_at(4);
//! let crc = model.combine(model.slice16(model.init(), a), model.slice16(model.init(), b), b.len());
//! assert_eq!(crc, 0xCBF4_3926);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (tables need `alloc`). Disable the `std`
//! feature to drop the threaded orchestrator and environment configuration:
//!
//! ```toml
//! [dependencies]
//! crcany = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod common;

pub mod config;
pub mod error;
pub mod introspect;
mod model;
pub mod parallel;
pub mod params;
mod stream;

pub use common::{
  dword::Dword,
  reverse::{reverse, reverse_dbl},
  tables::TableKind,
};
#[cfg(feature = "std")]
pub use error::ParallelError;
pub use error::{Field, ModelError, TableError};
pub use introspect::ModelInfo;
pub use model::{CHECK_INPUT, Kernel, Model, Strategy};
pub use params::CrcParams;
pub use stream::Crc;
// Re-export traits for convenience
pub use traits::{Checksum, ChecksumCombine};
