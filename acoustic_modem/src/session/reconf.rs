use log::warn;

use crate::{
  config::Configuration,
  error::{ConfigError, NegotiationError},
};

/// number of bytes of a reconfiguration record
pub const RECORD_SIZE: usize = 4;
/// silence between the record and the working configuration's preamble, in seconds
pub const RECONF_SILENCE: f64 = 0.1;

/// The working configuration as sent over the bootstrap configuration:
/// `[Fs / 1 kHz, npoints - 1, first carrier / 1 kHz, last carrier / 1 kHz]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconfRecord {
  pub sample_rate_khz: u8,
  pub max_symbol: u8,
  pub low_khz: u8,
  pub high_khz: u8,
}

/// floor `value` into a record byte
fn field(name: &'static str, value: f64) -> Result<u8, ConfigError> {
  let floor = value.floor();
  if !(0.0..=u8::MAX as f64).contains(&floor) {
    return Err(ConfigError::NotNegotiable { field: name, value });
  }
  Ok(floor as u8)
}

impl ReconfRecord {
  /// Frequencies are rounded down to whole kHz.
  pub fn from_config(config: &Configuration) -> Result<Self, ConfigError> {
    let frequencies = config.frequencies();
    let low = frequencies.first().copied().unwrap_or(config.band()[0]);
    let high = frequencies.last().copied().unwrap_or(config.band()[1]);
    let record = Self {
      sample_rate_khz: field("sample rate (kHz)", config.fs() / 1e3)?,
      max_symbol: field("constellation size - 1", (config.npoints() - 1) as f64)?,
      low_khz: field("first carrier (kHz)", low / 1e3)?,
      high_khz: field("last carrier (kHz)", high / 1e3)?,
    };
    // the receiver must be able to rebuild a configuration from the rounded values
    record.into_config().map_err(|e| match e {
      ConfigError::InvalidSampleRate(_) | ConfigError::InvalidSymbolDuration(_) => ConfigError::NotNegotiable {
        field: "sample rate (kHz)",
        value: config.fs() / 1e3,
      },
      _ => ConfigError::NotNegotiable {
        field: "carrier band (kHz)",
        value: low / 1e3,
      },
    })?;
    Ok(record)
  }

  pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
    [self.sample_rate_khz, self.max_symbol, self.low_khz, self.high_khz]
  }

  /// Parse the first [`RECORD_SIZE`] bytes of `bytes`.
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, NegotiationError> {
    let Some(&[sample_rate_khz, max_symbol, low_khz, high_khz]) = bytes.get(..RECORD_SIZE) else {
      return Err(NegotiationError::MalformedRecord { received: bytes.len() });
    };
    if bytes.len() > RECORD_SIZE {
      warn!("ignoring {} bytes after the reconfiguration record", bytes.len() - RECORD_SIZE);
    }
    Ok(Self {
      sample_rate_khz,
      max_symbol,
      low_khz,
      high_khz,
    })
  }

  /// The configuration described by the record, with default timings.
  pub fn into_config(self) -> Result<Configuration, ConfigError> {
    Configuration::new(
      self.sample_rate_khz as f64 * 1e3,
      self.max_symbol as usize + 1,
      [self.low_khz as f64 * 1e3, self.high_khz as f64 * 1e3],
    )
  }
}
