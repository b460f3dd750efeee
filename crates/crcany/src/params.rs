//! CRC model parameters.
//!
//! Parameters follow the conventions of the
//! [CRC Catalogue](https://reveng.sourceforge.io/crc-catalogue/): the
//! polynomial omits its implicit `x^width` term, and `reflect_out` applies to
//! the register before `xor_out`.

use crate::error::{Field, ModelError};

/// Largest supported CRC width (two 64-bit registers).
pub const MAX_WIDTH: u16 = 128;

/// Raw, un-normalized CRC parameters.
///
/// Values are right-aligned in the low `width` bits of a `u128`.
///
/// # Reflection
///
/// "Reflected" means bit-reversed. Reflected input maps to LSB-first
/// processing; a model whose `reflect_in` and `reflect_out` differ is
/// supported but rare (CRC-12/UMTS is the usual example).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CrcParams {
  /// Width in bits (`1..=128`).
  pub width: u16,
  /// Generator polynomial (without the implicit high bit).
  pub polynomial: u128,
  /// Initial value of the CRC register.
  pub initial: u128,
  /// Reflect input bytes before processing.
  pub reflect_in: bool,
  /// Reflect the final register before XOR.
  pub reflect_out: bool,
  /// XOR value applied to the final register.
  pub xor_out: u128,
}

impl CrcParams {
  /// CRC-32 (ISO-HDLC) - Ethernet, gzip, PNG, zip
  pub const CRC32_ISO_HDLC: Self = Self {
    width: 32,
    polynomial: 0x04C1_1DB7,
    initial: 0xFFFF_FFFF,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0xFFFF_FFFF,
  };

  /// CRC-32C (Castagnoli) - iSCSI, SCTP, ext4
  pub const CRC32_ISCSI: Self = Self {
    width: 32,
    polynomial: 0x1EDC_6F41,
    initial: 0xFFFF_FFFF,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0xFFFF_FFFF,
  };

  /// CRC-16/XMODEM
  pub const CRC16_XMODEM: Self = Self {
    width: 16,
    polynomial: 0x1021,
    initial: 0x0000,
    reflect_in: false,
    reflect_out: false,
    xor_out: 0x0000,
  };

  /// CRC-16/IBM-3740 (often called CCITT-FALSE)
  pub const CRC16_IBM_3740: Self = Self {
    width: 16,
    polynomial: 0x1021,
    initial: 0xFFFF,
    reflect_in: false,
    reflect_out: false,
    xor_out: 0x0000,
  };

  /// CRC-12/UMTS - non-reflected input, reflected output
  pub const CRC12_UMTS: Self = Self {
    width: 12,
    polynomial: 0x80F,
    initial: 0x000,
    reflect_in: false,
    reflect_out: true,
    xor_out: 0x000,
  };

  /// CRC-5/USB
  pub const CRC5_USB: Self = Self {
    width: 5,
    polynomial: 0x05,
    initial: 0x1F,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0x1F,
  };

  /// CRC-64/XZ - XZ Utils, 7-Zip
  pub const CRC64_XZ: Self = Self {
    width: 64,
    polynomial: 0x42F0_E1EB_A9EA_3693,
    initial: 0xFFFF_FFFF_FFFF_FFFF,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0xFFFF_FFFF_FFFF_FFFF,
  };

  /// CRC-82/DARC - the only catalogued CRC wider than 64 bits
  pub const CRC82_DARC: Self = Self {
    width: 82,
    polynomial: 0x0_308c_0111_0114_0144_0411,
    initial: 0,
    reflect_in: true,
    reflect_out: true,
    xor_out: 0,
  };

  /// Check the parameters without normalizing them.
  ///
  /// # Errors
  ///
  /// - [`ModelError::Width`] if `width` is 0 or above [`MAX_WIDTH`].
  /// - [`ModelError::OutOfRange`] if a value has bits at or above `width`.
  /// - [`ModelError::EvenPolynomial`] if the polynomial's low bit is clear.
  pub const fn validate(&self) -> Result<(), ModelError> {
    let width = self.width;
    if width == 0 || width > MAX_WIDTH {
      return Err(ModelError::Width(width));
    }
    let excess = if width == MAX_WIDTH { 0 } else { !0u128 << width };
    if self.polynomial & excess != 0 {
      return Err(ModelError::OutOfRange {
        field: Field::Polynomial,
        width,
      });
    }
    if self.initial & excess != 0 {
      return Err(ModelError::OutOfRange {
        field: Field::Initial,
        width,
      });
    }
    if self.xor_out & excess != 0 {
      return Err(ModelError::OutOfRange {
        field: Field::XorOut,
        width,
      });
    }
    if self.polynomial & 1 == 0 {
      return Err(ModelError::EvenPolynomial);
    }
    Ok(())
  }

  /// Whether the model fits a single 64-bit register.
  #[inline]
  #[must_use]
  pub const fn fits_word(&self) -> bool {
    self.width as u32 <= u64::BITS
  }
}
