/// Read continuously data of type `T` from [`InStream`].
/// Might encounter error of type `E`
pub trait InStream<T, E> {
  /// Read data to a slice.
  /// Return the number of elements read, `0` at the end of the stream.
  fn read(&mut self, buf: &mut [T]) -> Result<usize, E>;
  /// Read data to fill a slice.
  /// Return the number of elements read,
  /// which is smaller than `buf.len()` only when the stream is exhausted.
  fn read_exact(&mut self, buf: &mut [T]) -> Result<usize, E> {
    let mut n = 0;
    while n < buf.len() {
      match self.read(&mut buf[n..])? {
        0 => break,
        m => n += m,
      }
    }
    Ok(n)
  }
}
/// Write data of type `T` continuously into [`OutStream`].
/// Might encounter error of type `E`
pub trait OutStream<T, E> {
  /// Write data from a slice.
  /// Return the number of elements accepted.
  fn write(&mut self, buf: &[T]) -> Result<usize, E>;
  /// Write data from a slice.
  /// The function will not return until all the data are written.
  fn write_exact(&mut self, buf: &[T]) -> Result<(), E>;
  /// Push buffered data to the underlying device or file.
  fn flush(&mut self) -> Result<(), E> {
    Ok(())
  }
}
