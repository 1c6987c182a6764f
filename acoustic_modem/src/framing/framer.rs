use std::iter::Fuse;

use log::{debug, warn};
use reed_solomon::{Decoder, Encoder};

use crate::error::FramingError;

/// A chunk of payload bytes before error correction coding.
pub type Block = Vec<u8>;
/// A length prefix followed by a Reed-Solomon coded [`Block`].
pub type Frame = Vec<u8>;

/// Wraps blocks into length prefixed, Reed-Solomon protected frames and back.
///
/// A framer lives for one encode or decode session.
/// It keeps the largest number of symbol errors corrected in any single frame of that session.
pub struct Framer {
  ecc_symbols: usize,
  decoder: Decoder,
  max_errors: usize,
}

impl Framer {
  /// maximum number of bytes of a coded block
  pub const BLOCK_SIZE: usize = 255;
  /// default number of parity symbols per frame
  pub const ECC_SYMBOLS: usize = 6;
  /// number of bytes of the length prefix
  pub const PREFIX_LEN: usize = 1;
  /// the block terminating a stream
  pub const EOF: &'static [u8] = &[];

  pub fn new() -> Self {
    Self {
      ecc_symbols: Self::ECC_SYMBOLS,
      decoder: Decoder::new(Self::ECC_SYMBOLS),
      max_errors: 0,
    }
  }

  /// A framer with `ecc_symbols` parity symbols per frame,
  /// correcting up to `ecc_symbols / 2` symbol errors.
  pub fn with_ecc(ecc_symbols: usize) -> Result<Self, FramingError> {
    if ecc_symbols == 0 || ecc_symbols >= Self::BLOCK_SIZE {
      return Err(FramingError::InvalidEcc(ecc_symbols));
    }
    Ok(Self {
      ecc_symbols,
      decoder: Decoder::new(ecc_symbols),
      max_errors: 0,
    })
  }

  pub fn ecc_symbols(&self) -> usize {
    self.ecc_symbols
  }

  /// maximum number of payload bytes in one block
  pub fn payload_size(&self) -> usize {
    Self::BLOCK_SIZE - self.ecc_symbols
  }

  /// The largest number of errors corrected in one frame during this session.
  pub fn max_errors(&self) -> usize {
    self.max_errors
  }

  /// Split `data` into blocks and frame them, lazily.
  /// The last frame carries the EOF block.
  pub fn encode<I>(&self, data: I) -> FrameEncoder<I::IntoIter>
  where
    I: IntoIterator<Item = u8>,
  {
    FrameEncoder {
      data: data.into_iter().fuse(),
      encoder: Encoder::new(self.ecc_symbols),
      payload_size: self.payload_size(),
      done: false,
    }
  }

  /// Unwrap the frames in `data`, lazily.
  /// The sequence ends after the EOF frame, or after the first error.
  pub fn decode<I>(&mut self, data: I) -> FrameDecoder<'_, I::IntoIter>
  where
    I: IntoIterator<Item = u8>,
  {
    FrameDecoder {
      framer: self,
      data: data.into_iter(),
      done: false,
    }
  }

  /// error correct a coded block and update the error statistics
  fn unpack(&mut self, mut coded: Vec<u8>) -> Result<Block, FramingError> {
    let (block, errors) = self
      .decoder
      .correct_err_count(&mut coded, None)
      .map_err(|_| FramingError::Uncorrectable)?;
    if errors > 0 {
      debug!("corrected {errors} symbol errors in a frame of {} bytes", coded.len());
    }
    self.max_errors = self.max_errors.max(errors);
    Ok(block.data().to_vec())
  }
}

impl Default for Framer {
  fn default() -> Self {
    Self::new()
  }
}

/// Lazy sequence of frames produced by [`Framer::encode`].
pub struct FrameEncoder<I> {
  data: Fuse<I>,
  encoder: Encoder,
  payload_size: usize,
  done: bool,
}

impl<I> FrameEncoder<I> {
  fn pack(&self, block: &[u8]) -> Frame {
    let coded = self.encoder.encode(block);
    let mut frame = Vec::with_capacity(Framer::PREFIX_LEN + coded.len());
    frame.push(coded.len() as u8);
    frame.extend_from_slice(&coded);
    frame
  }
}

impl<I> Iterator for FrameEncoder<I>
where
  I: Iterator<Item = u8>,
{
  type Item = Frame;

  fn next(&mut self) -> Option<Frame> {
    if self.done {
      return None;
    }
    let block: Block = self.data.by_ref().take(self.payload_size).collect();
    // input exhausted: this is the EOF frame
    self.done = block.is_empty();
    Some(self.pack(&block))
  }
}

/// Lazy sequence of blocks produced by [`Framer::decode`].
pub struct FrameDecoder<'f, I> {
  framer: &'f mut Framer,
  data: I,
  done: bool,
}

impl<'f, I> FrameDecoder<'f, I> {
  /// The largest number of errors corrected in one frame so far.
  pub fn max_errors(&self) -> usize {
    self.framer.max_errors
  }
}

impl<'f, I> FrameDecoder<'f, I>
where
  I: Iterator<Item = u8>,
{
  /// read one frame, `Ok(None)` on the EOF frame
  fn next_block(&mut self) -> Result<Option<Block>, FramingError> {
    let length = self.data.next().ok_or(FramingError::TruncatedPrefix)? as usize;
    if !(self.framer.ecc_symbols..=Framer::BLOCK_SIZE).contains(&length) {
      return Err(FramingError::InvalidPrefix { length });
    }
    let coded: Vec<u8> = self.data.by_ref().take(length).collect();
    if coded.len() < length {
      return Err(FramingError::TruncatedPayload {
        expected: length,
        actual: coded.len(),
      });
    }

    let block = self.framer.unpack(coded)?;
    if block == Framer::EOF {
      debug!("EOF frame detected");
      if self.framer.max_errors > 0 {
        warn!("max errors corrected: {}", self.framer.max_errors);
      }
      return Ok(None);
    }
    Ok(Some(block))
  }
}

impl<'f, I> Iterator for FrameDecoder<'f, I>
where
  I: Iterator<Item = u8>,
{
  type Item = Result<Block, FramingError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }
    let result = self.next_block().transpose();
    self.done = !matches!(result, Some(Ok(_)));
    result
  }
}
