use super::{Bit, BitPacker, ByteBits, FrameDecoder, Framer};

/// Frame `data` and expand every coded byte into bits,
/// in frame order, byte order, then least significant bit first.
pub fn encode<I>(data: I, framer: &Framer) -> impl Iterator<Item = Bit>
where
  I: IntoIterator<Item = u8>,
{
  let packer = BitPacker::shared();
  framer.encode(data).flatten().flat_map(move |byte| packer.to_bits(byte))
}

/// Regroup bits into bytes.
/// A trailing group shorter than a byte is dropped.
pub fn to_bytes<I>(bits: I) -> ByteGroups<I::IntoIter>
where
  I: IntoIterator<Item = Bit>,
{
  ByteGroups {
    bits: bits.into_iter(),
    packer: BitPacker::shared(),
  }
}

/// Recover the payload chunks from a bit stream, lazily.
/// Each pulled chunk pulls just the bits of one frame.
pub fn decode<I>(bits: I, framer: &mut Framer) -> FrameDecoder<'_, ByteGroups<I::IntoIter>>
where
  I: IntoIterator<Item = Bit>,
{
  framer.decode(to_bytes(bits))
}

/// Bytes regrouped from a bit stream, see [`to_bytes`].
pub struct ByteGroups<I> {
  bits: I,
  packer: &'static BitPacker,
}

impl<I> Iterator for ByteGroups<I>
where
  I: Iterator<Item = Bit>,
{
  type Item = u8;

  fn next(&mut self) -> Option<u8> {
    let mut group: ByteBits = [false; BitPacker::BYTE_SIZE];
    for bit in group.iter_mut() {
      *bit = self.bits.next()?;
    }
    Some(self.packer.to_byte(&group))
  }
}
