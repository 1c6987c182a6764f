use std::{
  fs::File,
  io::{BufReader, BufWriter, Read, Seek, Write},
  path::Path,
};

use hound::{Error as WavError, SampleFormat, WavReader, WavWriter};

use crate::{
  config::{Configuration, DefaultConfig},
  traits::{InStream, OutStream},
};

/// Samples read from a WAV file, integer PCM scaled into `[-1, 1]`.
pub struct HoundInStream<R: Read> {
  reader: WavReader<R>,
  scaling: f32,
}

/// Samples written to a 16-bit PCM WAV file.
pub struct HoundOutStream<W: Write + Seek>(WavWriter<W>);

impl<R: Read> HoundInStream<R> {
  pub fn new(reader: WavReader<R>) -> Self {
    let bits = reader.spec().bits_per_sample;
    let scaling = if bits == DefaultConfig::BITS_PER_SAMPLE {
      DefaultConfig::SCALING
    } else {
      (1_u32 << (bits.clamp(1, 32) - 1)) as f32
    };
    Self { reader, scaling }
  }

  /// sample rate of the file, in Hz
  pub fn sample_rate(&self) -> u32 {
    self.reader.spec().sample_rate
  }
}

impl HoundInStream<BufReader<File>> {
  pub fn open<P>(filename: P) -> Result<Self, WavError>
  where
    P: AsRef<Path>,
  {
    WavReader::open(filename).map(Self::new)
  }
}

impl<W: Write + Seek> HoundOutStream<W> {
  pub fn new(writer: WavWriter<W>) -> Self {
    Self(writer)
  }

  /// A 16-bit mono WAV stream at the sample rate of `config`.
  pub fn with_config(sink: W, config: &Configuration) -> Result<Self, WavError> {
    WavWriter::new(sink, config.into()).map(Self)
  }

  /// Write the final header. Dropping the stream does so too, ignoring errors.
  pub fn finalize(self) -> Result<(), WavError> {
    self.0.finalize()
  }
}

impl HoundOutStream<BufWriter<File>> {
  pub fn create<P>(filename: P, config: &Configuration) -> Result<Self, WavError>
  where
    P: AsRef<Path>,
  {
    WavWriter::create(filename, config.into()).map(Self)
  }
}

impl<R: Read> InStream<f32, WavError> for HoundInStream<R> {
  fn read(&mut self, buf: &mut [f32]) -> Result<usize, WavError> {
    let mut n = 0;
    match self.reader.spec().sample_format {
      SampleFormat::Float => {
        for (x, sample) in buf.iter_mut().zip(self.reader.samples::<f32>()) {
          *x = sample?;
          n += 1;
        }
      }
      SampleFormat::Int => {
        for (x, sample) in buf.iter_mut().zip(self.reader.samples::<i32>()) {
          *x = sample? as f32 / self.scaling;
          n += 1;
        }
      }
    }
    Ok(n)
  }
}

impl<W: Write + Seek> OutStream<f32, WavError> for HoundOutStream<W> {
  fn write(&mut self, buf: &[f32]) -> Result<usize, WavError> {
    for x in buf {
      let pcm = (x * DefaultConfig::SCALING).round().clamp(i16::MIN as f32, i16::MAX as f32);
      self.0.write_sample(pcm as i16)?;
    }
    Ok(buf.len())
  }

  fn write_exact(&mut self, buf: &[f32]) -> Result<(), WavError> {
    self.write(buf).map(|_| ())
  }

  fn flush(&mut self) -> Result<(), WavError> {
    self.0.flush()
  }
}
