//! Register-generic CRC machinery.
//!
//! This module provides:
//! - Bit reversal and the double-width register
//! - The [`Register`](register::Register) abstraction the kernels are written against
//! - Bitwise, byte-table and slice-by-16 kernels
//! - GF(2) arithmetic for `combine()`, `zeros()` and residues

pub mod combine;
pub mod dword;
pub mod portable;
pub mod reference;
pub mod register;
pub mod reverse;
pub mod shape;
pub mod tables;

#[cfg(test)]
mod proptests;
