use std::io::Read;

use log::warn;

use super::ReadStream;
use crate::{
  config::DefaultConfig,
  traits::{InStream, OutStream},
};

/// Lazy sequence over an [`InStream`], reading one block at a time.
///
/// The sequence ends at the end of the stream or at the first read error,
/// which is held until [`StreamIter::take_error`] picks it up.
pub struct StreamIter<S, T, E> {
  stream: S,
  block: Vec<T>,
  pos: usize,
  len: usize,
  total: usize,
  error: Option<E>,
  done: bool,
}

/// samples pulled from a sample stream
pub type SampleReader<S, E> = StreamIter<S, f32, E>;
/// bytes pulled from a [`Read`] implementor
pub type ByteSource<R> = StreamIter<ReadStream<R>, u8, std::io::Error>;

impl<S, T, E> StreamIter<S, T, E>
where
  S: InStream<T, E>,
  T: Copy + Default,
{
  pub fn new(stream: S) -> Self {
    Self::with_block_size(stream, DefaultConfig::BUFFER_SIZE)
  }

  pub fn with_block_size(stream: S, block_size: usize) -> Self {
    Self {
      stream,
      block: vec![T::default(); block_size.max(1)],
      pos: 0,
      len: 0,
      total: 0,
      error: None,
      done: false,
    }
  }
}

impl<R: Read> ByteSource<R> {
  pub fn from_reader(reader: R) -> Self {
    Self::new(ReadStream::new(reader))
  }
}

impl<S, T, E> StreamIter<S, T, E> {
  /// number of elements yielded so far
  pub fn total(&self) -> usize {
    self.total
  }

  /// the read error that ended the sequence, if any
  pub fn take_error(&mut self) -> Option<E> {
    self.error.take()
  }

  pub fn into_inner(self) -> S {
    self.stream
  }
}

impl<S, T, E> Iterator for StreamIter<S, T, E>
where
  S: InStream<T, E>,
  T: Copy,
{
  type Item = T;

  fn next(&mut self) -> Option<T> {
    if self.pos == self.len {
      if self.done {
        return None;
      }
      match self.stream.read(&mut self.block) {
        Ok(0) => {
          self.done = true;
          return None;
        }
        Ok(n) => {
          self.pos = 0;
          self.len = n;
        }
        Err(e) => {
          self.error = Some(e);
          self.done = true;
          return None;
        }
      }
    }
    let x = self.block[self.pos];
    self.pos += 1;
    self.total += 1;
    Some(x)
  }
}

/// Tee of a sample sequence into an [`OutStream`], e.g. to record the received audio.
///
/// A write error stops the dump, not the sequence; [`Dump::finish`] reports it.
pub struct Dump<I, S, E> {
  samples: I,
  sink: S,
  block: Vec<f32>,
  error: Option<E>,
}

impl<I, S, E> Dump<I, S, E>
where
  S: OutStream<f32, E>,
{
  pub fn new(samples: I, sink: S) -> Self {
    Self {
      samples,
      sink,
      block: Vec::with_capacity(DefaultConfig::BUFFER_SIZE),
      error: None,
    }
  }

  fn write_block(&mut self) {
    if self.error.is_none() {
      if let Err(e) = self.sink.write_exact(&self.block) {
        warn!("audio dump stopped on a write error");
        self.error = Some(e);
      }
    }
    self.block.clear();
  }

  /// Write out the pending samples and give back the sink.
  pub fn finish(mut self) -> Result<S, E> {
    self.write_block();
    if let Some(e) = self.error.take() {
      return Err(e);
    }
    self.sink.flush()?;
    Ok(self.sink)
  }
}

impl<I, S, E> Iterator for Dump<I, S, E>
where
  I: Iterator<Item = f32>,
  S: OutStream<f32, E>,
{
  type Item = f32;

  fn next(&mut self) -> Option<f32> {
    let x = self.samples.next()?;
    self.block.push(x);
    if self.block.len() == DefaultConfig::BUFFER_SIZE {
      self.write_block();
    }
    Some(x)
  }
}
