//! Contracts of the signal processing collaborators.
//!
//! The link layer drives these but does not implement the waveform;
//! [`crate::line_code::LineCode`] is a reference implementor.

use crate::{config::Configuration, error::Result, framing::Bit};

/// A lazily pulled sequence of PCM samples.
pub type Samples<'a> = Box<dyn Iterator<Item = f32> + 'a>;
/// A lazily pulled sequence of demodulated bits.
pub type Bits<'a> = Box<dyn Iterator<Item = Bit> + 'a>;

/// Turns bits into samples and writes them to its sample sink.
pub trait Modulator {
  /// Write `len` samples of silence.
  fn silence(&mut self, len: usize) -> Result<()>;
  /// Write the training preamble the receiver's detector locks on.
  fn start(&mut self) -> Result<()>;
  /// Modulate every bit of `bits` and write the signal.
  fn modulate<I: Iterator<Item = Bit>>(&mut self, bits: I) -> Result<()>;
  /// Switch to another configuration, keeping the sample sink.
  /// [`Modulator::offset`] restarts from zero.
  fn reconfigure(&mut self, config: &Configuration) -> Result<()>;
  /// Number of samples written since the last (re)configuration.
  fn offset(&self) -> usize;
}

/// Result of carrier detection.
pub struct Detection<'a> {
  /// the signal, synchronized to the first payload symbol
  pub signal: Samples<'a>,
  /// estimated received amplitude
  pub amplitude: f32,
  /// estimated relative sampling frequency error
  pub freq_error: f32,
}

/// Carrier detection and frequency/gain estimation.
pub trait Detector {
  /// Consume `signal` until the carrier of `config` is found and its training preamble passed.
  fn detect<'a>(&mut self, config: &Configuration, signal: Samples<'a>) -> Result<Detection<'a>>;
}

/// Resampling with a frequency correction factor.
pub trait Sampler {
  /// Resample `signal` by `freq` (`1.0` keeps the rate).
  fn resample<'a>(&mut self, signal: Samples<'a>, freq: f32) -> Samples<'a>;
}

/// Samples to bits.
pub trait Demodulator {
  /// Demodulate `samples` scaled by `gain`.
  fn demodulate<'a>(&mut self, config: &Configuration, samples: Samples<'a>, gain: f32) -> Result<Bits<'a>>;
}

/// The receiving side of a PHY: detection, resampling and demodulation.
pub trait PhyRx: Detector + Sampler + Demodulator {}
impl<T> PhyRx for T where T: Detector + Sampler + Demodulator {}
