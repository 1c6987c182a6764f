use std::io::{ErrorKind, Read};

use crate::traits::InStream;

/// Bytes read from a [`std::io::Read`] implementor.
pub struct ReadStream<R>(R);

impl<R: Read> ReadStream<R> {
  pub fn new(reader: R) -> Self {
    Self(reader)
  }

  pub fn into_inner(self) -> R {
    self.0
  }
}

impl<R: Read> InStream<u8, std::io::Error> for ReadStream<R> {
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error> {
    loop {
      match self.0.read(buf) {
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        result => return result,
      }
    }
  }
}
