use thiserror::Error;

/// Shorthand for results carrying the crate [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top level error of send/recv operations.
#[derive(Debug, Error)]
pub enum Error {
  /// frame stream could not be decoded
  #[error("framing error: {0}")]
  Framing(#[from] FramingError),

  /// reconfiguration record exchange failed
  #[error("negotiation error: {0}")]
  Negotiation(#[from] NegotiationError),

  /// invalid modem parameters
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  /// byte source or sink failure
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// WAV sample stream failure
  #[error("WAV stream error: {0}")]
  Wav(#[from] hound::Error),

  /// carrier detection or demodulation failure reported by a PHY collaborator
  #[error("carrier error: {0}")]
  Carrier(String),
}

impl From<std::convert::Infallible> for Error {
  fn from(never: std::convert::Infallible) -> Self {
    match never {}
  }
}

/// Errors while unwrapping frames.
/// All of them are fatal to the current decode session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FramingError {
  /// stream ended where a length prefix was expected
  #[error("missing prefix data")]
  TruncatedPrefix,

  /// stream ended inside the coded payload
  #[error("missing payload data: expected {expected} bytes, got {actual}")]
  TruncatedPayload { expected: usize, actual: usize },

  /// the prefix cannot describe a coded payload of this framer
  #[error("invalid frame length prefix {length}")]
  InvalidPrefix { length: usize },

  /// more symbol errors than the parity symbols can correct
  #[error("uncorrectable frame")]
  Uncorrectable,

  /// the number of parity symbols leaves no room for payload
  #[error("invalid number of ECC symbols: {0}")]
  InvalidEcc(usize),
}

/// Errors while agreeing on the working configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NegotiationError {
  /// the bootstrap frame session ended before a full record arrived
  #[error("malformed reconfiguration record: received {received} bytes")]
  MalformedRecord { received: usize },

  /// the record describes an unusable configuration
  #[error("reconfiguration record: {0}")]
  Config(#[from] ConfigError),
}

/// Invalid [`crate::Configuration`] parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
  #[error("sample rate must be positive, got {0}")]
  InvalidSampleRate(f64),

  #[error("symbol duration {0}s is shorter than one sample")]
  InvalidSymbolDuration(f64),

  #[error("constellation size must be a power of 2 (at least 2), got {0}")]
  ConstellationSize(usize),

  #[error("invalid carrier band [{low}, {high}] Hz")]
  InvalidBand { low: f64, high: f64 },

  /// the configuration cannot be carried by the 4-byte reconfiguration record
  #[error("{field} = {value} does not fit the reconfiguration record")]
  NotNegotiable { field: &'static str, value: f64 },

  #[error("no preset for {0} kb/s")]
  UnknownBitrate(u32),
}
