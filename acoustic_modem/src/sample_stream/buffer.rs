use std::collections::VecDeque;
use std::convert::Infallible;

use crate::traits::{InStream, OutStream};

/// A FIFO of blocks, reading out whatever is written into it.
#[derive(Clone, Debug)]
pub struct Buffer<T> {
  blocks: VecDeque<Vec<T>>,
}

impl<T> Buffer<T> {
  pub fn new() -> Self {
    Self {
      blocks: Default::default(),
    }
  }
  /// append a chunk of data into the buffer
  pub fn push(&mut self, block: Vec<T>) {
    if !block.is_empty() {
      self.blocks.push_back(block);
    }
  }
  /// number of buffered elements
  pub fn len(&self) -> usize {
    self.blocks.iter().map(Vec::len).sum()
  }
  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }
  /// drain the whole buffer into one vector
  pub fn into_vec(self) -> Vec<T> {
    self.blocks.into_iter().flatten().collect()
  }
}

impl<T: Clone> Buffer<T> {
  /// append a chunk of data, with slice
  pub fn push_slice(&mut self, src: &[T]) {
    self.push(src.to_vec());
  }

  /// fetch a chunk of data to fill the slice.
  /// return the number of poped elements.
  pub fn pop_slice(&mut self, dest: &mut [T]) -> usize {
    let n = dest.len();
    let mut i = 0;
    while i < n {
      let Some(mut block) = self.blocks.pop_front() else {
        break;
      };
      let m = std::cmp::min(n - i, block.len());
      dest[i..i + m].iter_mut().zip(block.drain(..m)).for_each(|(x, y)| *x = y);
      i += m;
      if !block.is_empty() {
        self.blocks.push_front(block);
      }
    }
    i
  }
}

impl<T> Default for Buffer<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> FromIterator<T> for Buffer<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut buffer = Self::new();
    buffer.push(iter.into_iter().collect());
    buffer
  }
}

impl<T: Clone> InStream<T, Infallible> for Buffer<T> {
  fn read(&mut self, buf: &mut [T]) -> Result<usize, Infallible> {
    Ok(self.pop_slice(buf))
  }
}

impl<T: Clone> OutStream<T, Infallible> for Buffer<T> {
  fn write(&mut self, buf: &[T]) -> Result<usize, Infallible> {
    self.push_slice(buf);
    Ok(buf.len())
  }

  fn write_exact(&mut self, buf: &[T]) -> Result<(), Infallible> {
    self.push_slice(buf);
    Ok(())
  }
}
