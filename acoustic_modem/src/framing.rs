//! Byte stream <-> frames <-> bits.
//!
//! A frame is `[length prefix: u8][Reed-Solomon coded block]`.
//! The last frame of every stream carries the empty block (EOF).
//! Bits are emitted least significant first.

/// byte <-> bit tuple lookup
mod bit_packer;
pub use bit_packer::{Bit, BitPacker, ByteBits};

/// blocks <-> length prefixed Reed-Solomon frames
mod framer;
pub use framer::{Block, Frame, FrameDecoder, FrameEncoder, Framer};

/// frames <-> bits pipelines
pub mod bitstream;
