/// blockwise in-memory buffer, readable and writable
mod buffer;
pub use buffer::Buffer;

/// WAV file sample streams with hound
mod hound_stream;
pub use hound_stream::{HoundInStream, HoundOutStream};

/// byte stream IO with `std::io` readers
mod io_stream;
pub use io_stream::ReadStream;

/// lazy sequences over streams
mod adapters;
pub use adapters::{ByteSource, Dump, SampleReader, StreamIter};

#[cfg(test)]
mod tests;
