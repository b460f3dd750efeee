//! Core checksum traits for the crcany workspace.
//!
//! This crate provides the streaming traits that checksum state machines
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Checksum`] | Incremental update / finalize / reset |
//! | [`ChecksumCombine`] | O(log n) combination of independently computed checksums |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;

pub use checksum::{Checksum, ChecksumCombine};
