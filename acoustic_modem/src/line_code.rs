use std::marker::PhantomData;

use log::debug;

use crate::{
  config::{Configuration, DefaultConfig},
  error::{Error, Result},
  framing::Bit,
  traits::{Bits, Detection, Detector, Demodulator, Modulator, OutStream, Sampler, Samples},
};

/// Baseband NRZ line code: every bit is one symbol of
/// `samples_per_symbol` samples at `+gain` (`1`) or `-gain` (`0`).
///
/// The training preamble is [`LineCode::TRAINING_SYMBOLS`] positive symbols
/// followed by one negative sync symbol.
/// The receiver skips silence, measures the amplitude over the training symbols
/// and locks on the sync symbol.
pub struct LineCode<S = (), E = Error> {
  sink: S,
  config: Configuration,
  gain: f32,
  threshold: f32,
  offset: usize,
  _error: PhantomData<fn() -> E>,
}

impl LineCode {
  /// A line code with no sample sink, for the receiving side.
  pub fn receiver() -> Self {
    Self::new((), &Configuration::default())
  }
}

impl<S, E> LineCode<S, E> {
  /// number of positive symbols in the training preamble
  pub const TRAINING_SYMBOLS: usize = 16;
  /// absolute sample values below this are taken as silence
  pub const SILENCE_THRESHOLD: f32 = 1e-2;

  /// A line code writing to `sink` with the symbol timing of `config`.
  pub fn new(sink: S, config: &Configuration) -> Self {
    Self {
      sink,
      config: config.clone(),
      gain: 1.0,
      threshold: Self::SILENCE_THRESHOLD,
      offset: 0,
      _error: PhantomData,
    }
  }

  /// Output amplitude. Also scales the silence threshold of detection.
  pub fn with_gain(mut self, gain: f32) -> Self {
    self.gain = gain;
    self.threshold = Self::SILENCE_THRESHOLD * gain.abs().min(1.0);
    self
  }

  pub fn config(&self) -> &Configuration {
    &self.config
  }

  pub fn into_sink(self) -> S {
    self.sink
  }
}

impl<S, E> LineCode<S, E>
where
  S: OutStream<f32, E>,
  Error: From<E>,
{
  fn write(&mut self, samples: &[f32]) -> Result<()> {
    self.sink.write_exact(samples)?;
    self.offset += samples.len();
    Ok(())
  }

  fn symbols<I: Iterator<Item = Bit>>(&mut self, bits: I) -> Result<()> {
    let sps = self.config.samples_per_symbol();
    let mut block = Vec::with_capacity(DefaultConfig::BUFFER_SIZE + sps);
    for bit in bits {
      let level = if bit { self.gain } else { -self.gain };
      block.extend(std::iter::repeat(level).take(sps));
      if block.len() >= DefaultConfig::BUFFER_SIZE {
        self.write(&block)?;
        block.clear();
      }
    }
    self.write(&block)
  }
}

impl<S, E> Modulator for LineCode<S, E>
where
  S: OutStream<f32, E>,
  Error: From<E>,
{
  fn silence(&mut self, len: usize) -> Result<()> {
    let zeros = vec![0.0; DefaultConfig::BUFFER_SIZE.min(len)];
    let mut left = len;
    while left > 0 {
      let n = left.min(zeros.len());
      self.write(&zeros[..n])?;
      left -= n;
    }
    Ok(())
  }

  fn start(&mut self) -> Result<()> {
    let training = std::iter::repeat(true).take(Self::TRAINING_SYMBOLS);
    self.symbols(training.chain(std::iter::once(false)))
  }

  fn modulate<I: Iterator<Item = Bit>>(&mut self, bits: I) -> Result<()> {
    self.symbols(bits)
  }

  fn reconfigure(&mut self, config: &Configuration) -> Result<()> {
    self.sink.flush()?;
    self.config = config.clone();
    self.offset = 0;
    Ok(())
  }

  fn offset(&self) -> usize {
    self.offset
  }
}

impl<S, E> Detector for LineCode<S, E> {
  fn detect<'a>(&mut self, config: &Configuration, mut signal: Samples<'a>) -> Result<Detection<'a>> {
    let sps = config.samples_per_symbol();
    let expected = Self::TRAINING_SYMBOLS * sps;
    let no_carrier = || Error::Carrier(format!("no carrier detected at {:.1} kHz", config.fc() / 1e3));

    let (mut run, mut sum) = (0_usize, 0.0_f32);
    loop {
      let x = signal.next().ok_or_else(no_carrier)?;
      if x > self.threshold {
        run += 1;
        sum += x;
      } else if x < -self.threshold && run >= expected / 2 {
        break;
      } else {
        run = 0;
        sum = 0.0;
      }
    }
    // rest of the sync symbol
    if signal.by_ref().take(sps - 1).count() < sps - 1 {
      return Err(Error::Carrier("signal ended inside the sync symbol".into()));
    }
    debug!("training preamble of {run} samples, {expected} expected");

    Ok(Detection {
      signal,
      amplitude: sum / run as f32,
      freq_error: run as f32 / expected as f32 - 1.0,
    })
  }
}

impl<S, E> Sampler for LineCode<S, E> {
  fn resample<'a>(&mut self, signal: Samples<'a>, freq: f32) -> Samples<'a> {
    if freq == 1.0 || !(freq.is_finite() && freq > 0.0) {
      return signal;
    }
    Box::new(Resample {
      signal,
      step: 1.0 / freq as f64,
      produced: 0,
      consumed: 0,
      last: 0.0,
    })
  }
}

impl<S, E> Demodulator for LineCode<S, E> {
  fn demodulate<'a>(&mut self, config: &Configuration, mut samples: Samples<'a>, gain: f32) -> Result<Bits<'a>> {
    let sps = config.samples_per_symbol();
    Ok(Box::new(std::iter::from_fn(move || {
      let mut sum = 0.0;
      for _ in 0..sps {
        sum += samples.next()?;
      }
      Some(sum * gain > 0.0)
    })))
  }
}

/// nearest neighbour resampling
struct Resample<'a> {
  signal: Samples<'a>,
  /// input samples per output sample
  step: f64,
  produced: usize,
  consumed: usize,
  last: f32,
}

impl<'a> Iterator for Resample<'a> {
  type Item = f32;

  fn next(&mut self) -> Option<f32> {
    let target = (self.produced as f64 * self.step).round() as usize;
    self.produced += 1;
    while self.consumed <= target {
      self.last = self.signal.next()?;
      self.consumed += 1;
    }
    Some(self.last)
  }
}

#[cfg(test)]
mod tests;
