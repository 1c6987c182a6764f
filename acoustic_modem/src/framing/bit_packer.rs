use std::sync::OnceLock;

use bitvec::prelude::*;

/// A single bit on the channel.
pub type Bit = bool;
/// The bits of one byte, least significant bit first.
pub type ByteBits = [Bit; BitPacker::BYTE_SIZE];

/// Byte <-> bits lookup, precomputed for all 256 byte values.
pub struct BitPacker {
  to_bits: [ByteBits; 256],
}

impl BitPacker {
  /// number of bits in one byte
  pub const BYTE_SIZE: usize = 8;

  pub fn new() -> Self {
    let mut to_bits = [[false; Self::BYTE_SIZE]; 256];
    for (byte, bits) in (0..=u8::MAX).zip(to_bits.iter_mut()) {
      bits
        .iter_mut()
        .zip(byte.view_bits::<Lsb0>())
        .for_each(|(slot, bit)| *slot = *bit);
    }
    Self { to_bits }
  }

  /// The instance shared by the whole process, built on first use.
  pub fn shared() -> &'static BitPacker {
    static PACKER: OnceLock<BitPacker> = OnceLock::new();
    PACKER.get_or_init(BitPacker::new)
  }

  /// bit `k` of the result is `(byte >> k) & 1`
  pub fn to_bits(&self, byte: u8) -> ByteBits {
    self.to_bits[byte as usize]
  }

  /// the reverse process of [`BitPacker::to_bits`].
  pub fn to_byte(&self, bits: &ByteBits) -> u8 {
    let mut byte = 0_u8;
    byte
      .view_bits_mut::<Lsb0>()
      .iter_mut()
      .zip(bits)
      .for_each(|(mut slot, bit)| *slot = *bit);
    byte
  }
}

impl Default for BitPacker {
  fn default() -> Self {
    Self::new()
  }
}
