use std::fmt;

use hound::WavSpec;

use crate::error::ConfigError;

/// Defaults shared by every [`Configuration`] and the sample streams.
pub struct DefaultConfig;
impl DefaultConfig {
  pub const CHANNELS: u16 = 1;
  pub const SAMPLE_RATE: f64 = 32000.0;
  pub const SYMBOL_DURATION: f64 = 0.001;
  pub const NPOINTS: usize = 64;
  pub const FREQUENCIES: [f64; 2] = [1e3, 8e3];
  pub const BITS_PER_SAMPLE: u16 = 16;
  /// number of samples moved per stream read
  pub const BUFFER_SIZE: usize = 4096;
  /// silence before the training preamble, in seconds
  pub const SILENCE_START: f64 = 0.5;
  /// silence after the payload, in seconds
  pub const SILENCE_STOP: f64 = 0.5;
  /// samples skipped by the receiver before carrier detection, in seconds
  pub const SKIP_START: f64 = 0.1;
  /// PCM full scale of the integer sample format
  pub const SCALING: f32 = 32000.0;
}

/// Modem parameters. Immutable once built;
/// everything derived from them is computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
  fs: f64,
  tsym: f64,
  npoints: usize,
  band: [f64; 2],
  silence_start: f64,
  silence_stop: f64,
  skip_start: f64,
}

impl Configuration {
  /// Sample rate `fs` (Hz), constellation size `npoints`,
  /// carrier band `[low, high]` (Hz, equal bounds for a single carrier).
  /// Timings take the [`DefaultConfig`] values.
  pub fn new(fs: f64, npoints: usize, band: [f64; 2]) -> Result<Self, ConfigError> {
    let config = Self {
      fs,
      tsym: DefaultConfig::SYMBOL_DURATION,
      npoints,
      band,
      silence_start: DefaultConfig::SILENCE_START,
      silence_stop: DefaultConfig::SILENCE_STOP,
      skip_start: DefaultConfig::SKIP_START,
    };
    config.validate()
  }

  fn validate(self) -> Result<Self, ConfigError> {
    if !(self.fs.is_finite() && self.fs > 0.0) {
      return Err(ConfigError::InvalidSampleRate(self.fs));
    }
    // at least one sample per symbol and one symbol per second
    if !(self.tsym.is_finite() && self.tsym * self.fs >= 1.0 && self.baud() > 0) {
      return Err(ConfigError::InvalidSymbolDuration(self.tsym));
    }
    if self.npoints < 2 || !self.npoints.is_power_of_two() {
      return Err(ConfigError::ConstellationSize(self.npoints));
    }
    let [low, high] = self.band;
    if !(low > 0.0 && low <= high && high <= self.fs / 2.0) {
      return Err(ConfigError::InvalidBand { low, high });
    }
    Ok(self)
  }

  /// Preset for a bitrate in kb/s, see [`bitrates`].
  pub fn from_bitrate(kbps: u32) -> Result<Self, ConfigError> {
    PRESETS
      .iter()
      .find(|(rate, ..)| *rate == kbps)
      .ok_or(ConfigError::UnknownBitrate(kbps))
      .and_then(|&(_, fs, npoints, band)| Self::new(fs, npoints, band))
  }

  pub fn with_symbol_duration(mut self, tsym: f64) -> Result<Self, ConfigError> {
    self.tsym = tsym;
    self.validate()
  }

  pub fn with_silence(mut self, start: f64, stop: f64) -> Self {
    self.silence_start = start.max(0.0);
    self.silence_stop = stop.max(0.0);
    self
  }

  pub fn with_skip_start(mut self, skip_start: f64) -> Self {
    self.skip_start = skip_start.max(0.0);
    self
  }

  /// sample rate in Hz
  pub fn fs(&self) -> f64 {
    self.fs
  }
  /// symbol duration in seconds
  pub fn tsym(&self) -> f64 {
    self.tsym
  }
  /// number of constellation points
  pub fn npoints(&self) -> usize {
    self.npoints
  }
  /// carrier band `[low, high]` in Hz
  pub fn band(&self) -> [f64; 2] {
    self.band
  }
  pub fn silence_start(&self) -> f64 {
    self.silence_start
  }
  pub fn silence_stop(&self) -> f64 {
    self.silence_stop
  }
  pub fn skip_start(&self) -> f64 {
    self.skip_start
  }

  /// number of samples in one symbol
  pub fn samples_per_symbol(&self) -> usize {
    (self.tsym * self.fs).round() as usize
  }
  /// symbols per second
  pub fn baud(&self) -> usize {
    (1.0 / self.tsym).round() as usize
  }
  /// Carrier frequencies: the band stepped by the baud rate.
  pub fn frequencies(&self) -> Vec<f64> {
    let [low, high] = self.band;
    let step = self.baud() as f64;
    let count = ((high - low) / step + 1e-9).floor() as usize + 1;
    (0..count).map(|i| low + step * i as f64).collect()
  }
  pub fn carrier_count(&self) -> usize {
    self.frequencies().len()
  }
  /// the carrier used for detection and training
  pub fn fc(&self) -> f64 {
    self.band[0]
  }
  pub fn bits_per_symbol(&self) -> usize {
    self.npoints.trailing_zeros() as usize
  }
  pub fn bits_per_baud(&self) -> usize {
    self.bits_per_symbol() * self.carrier_count()
  }
  /// raw modem bitrate in bits per second
  pub fn modem_bps(&self) -> usize {
    self.baud() * self.bits_per_baud()
  }
  /// number of samples spanning `secs` seconds
  pub fn samples_for(&self, secs: f64) -> usize {
    (self.fs * secs) as usize
  }
}

impl Default for Configuration {
  fn default() -> Self {
    Self {
      fs: DefaultConfig::SAMPLE_RATE,
      tsym: DefaultConfig::SYMBOL_DURATION,
      npoints: DefaultConfig::NPOINTS,
      band: DefaultConfig::FREQUENCIES,
      silence_start: DefaultConfig::SILENCE_START,
      silence_stop: DefaultConfig::SILENCE_STOP,
      skip_start: DefaultConfig::SKIP_START,
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{:.1} kb/s ({}-QAM x {} carriers) Fs={:.1} kHz Fc={:.1} kHz",
      self.modem_bps() as f64 / 1e3,
      self.npoints,
      self.carrier_count(),
      self.fs / 1e3,
      self.fc() / 1e3
    )
  }
}

impl From<&Configuration> for WavSpec {
  fn from(config: &Configuration) -> WavSpec {
    WavSpec {
      channels: DefaultConfig::CHANNELS,
      sample_rate: config.fs as u32,
      bits_per_sample: DefaultConfig::BITS_PER_SAMPLE,
      sample_format: hound::SampleFormat::Int,
    }
  }
}

/// bitrate (kb/s), sample rate, constellation size, carrier band
type Preset = (u32, f64, usize, [f64; 2]);

const PRESETS: [Preset; 18] = [
  (1, 8e3, 2, [2e3, 2e3]),
  (2, 8e3, 4, [2e3, 2e3]),
  (4, 8e3, 16, [2e3, 2e3]),
  (8, 8e3, 16, [1e3, 2e3]),
  (12, 16e3, 16, [3e3, 5e3]),
  (16, 16e3, 16, [2e3, 5e3]),
  (20, 16e3, 16, [2e3, 6e3]),
  (24, 16e3, 16, [1e3, 6e3]),
  (28, 32e3, 16, [3e3, 9e3]),
  (32, 32e3, 16, [2e3, 9e3]),
  (36, 32e3, 64, [4e3, 9e3]),
  (42, 32e3, 64, [4e3, 10e3]),
  (48, 32e3, 64, [3e3, 10e3]),
  (54, 32e3, 64, [2e3, 10e3]),
  (60, 32e3, 64, [2e3, 11e3]),
  (64, 32e3, 256, [3e3, 10e3]),
  (72, 32e3, 256, [2e3, 10e3]),
  (80, 32e3, 256, [2e3, 11e3]),
];

/// All presets, ordered by bitrate (kb/s).
pub fn bitrates() -> impl Iterator<Item = (u32, Configuration)> {
  PRESETS
    .iter()
    .filter_map(|&(kbps, fs, npoints, band)| Configuration::new(fs, npoints, band).ok().map(|c| (kbps, c)))
}

/// the preset with the highest bitrate
pub fn fastest() -> Configuration {
  bitrates().last().map(|(_, c)| c).unwrap_or_default()
}

/// the preset with the lowest bitrate
pub fn slowest() -> Configuration {
  bitrates().next().map(|(_, c)| c).unwrap_or_default()
}

#[cfg(test)]
mod tests;
