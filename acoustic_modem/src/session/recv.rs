use std::{
  io::Write,
  time::{Duration, Instant},
};

use log::{debug, error, info};

use super::ReconfRecord;
use crate::{
  config::Configuration,
  error::{NegotiationError, Result},
  framing::{bitstream, Framer},
  traits::{Bits, Detection, PhyRx, Samples},
};

/// Statistics of a receive session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecvReport {
  /// payload bytes written to the sink
  pub bytes: usize,
  /// number of data frames decoded
  pub frames: usize,
  /// most symbol errors corrected in one frame
  pub max_errors: usize,
  pub elapsed: Duration,
}

/// Decodes payload frames into a byte sink.
///
/// Dropping the receiver flushes the sink and logs the statistics,
/// whichever way the session ended.
pub struct Receiver<'w, W: Write> {
  output: &'w mut W,
  framer: Framer,
  output_size: usize,
  frames: usize,
  started: Instant,
}

impl<'w, W: Write> Receiver<'w, W> {
  pub fn new(output: &'w mut W) -> Self {
    Self {
      output,
      framer: Framer::new(),
      output_size: 0,
      frames: 0,
      started: Instant::now(),
    }
  }

  /// Decode `bits` up to the EOF frame, writing every block as it arrives.
  pub fn run(&mut self, bits: Bits<'_>) -> Result<()> {
    for block in bitstream::decode(bits, &mut self.framer) {
      let block = block?;
      self.output.write_all(&block)?;
      self.output_size += block.len();
      self.frames += 1;
    }
    Ok(())
  }

  pub fn flush(&mut self) -> Result<()> {
    self.output.flush()?;
    Ok(())
  }

  pub fn report(&self) -> RecvReport {
    RecvReport {
      bytes: self.output_size,
      frames: self.frames,
      max_errors: self.framer.max_errors(),
      elapsed: self.started.elapsed(),
    }
  }
}

impl<'w, W: Write> Drop for Receiver<'w, W> {
  fn drop(&mut self) {
    if let Err(e) = self.output.flush() {
      error!("failed to flush the output: {e}");
    }
    let report = self.report();
    let secs = report.elapsed.as_secs_f64();
    info!(
      "Received {:.3} kB @ {:.3} seconds = {:.3} kB/s, {} frames, max errors corrected: {}",
      report.bytes as f64 / 1e3,
      secs,
      report.bytes as f64 / 1e3 / secs.max(f64::EPSILON),
      report.frames,
      report.max_errors
    );
  }
}

/// detect the carrier of `config` and demodulate what follows
fn carrier<'a, P: PhyRx>(config: &Configuration, signal: Samples<'a>, rx: &mut P) -> Result<Bits<'a>> {
  info!("Waiting for carrier tone: {:.1} kHz", config.fc() / 1e3);
  let Detection {
    signal,
    amplitude,
    freq_error,
  } = rx.detect(config, signal)?;
  let freq = 1.0 / (1.0 + freq_error);
  debug!("Frequency correction: {:.3} ppm", (freq - 1.0) * 1e6);
  debug!("Gain correction: {:.3}", 1.0 / amplitude);
  let samples = rx.resample(signal, freq);
  rx.demodulate(config, samples, 1.0 / amplitude)
}

/// decode the reconfiguration record sent over `bootstrap`
fn negotiate<P: PhyRx>(bootstrap: &Configuration, signal: &mut Samples<'_>, rx: &mut P) -> Result<Configuration> {
  let bits = carrier(bootstrap, Box::new(signal.by_ref()), rx)?;
  let blocks: Vec<_> = bitstream::decode(bits, &mut Framer::new()).collect::<Result<_, _>>()?;
  let record = ReconfRecord::from_bytes(&blocks.concat())?;
  let config = record.into_config().map_err(NegotiationError::from)?;
  info!("Reconfigured to: {config}");
  Ok(config)
}

fn receive<W: Write, P: PhyRx>(
  config: &Configuration,
  mut signal: Samples<'_>,
  rx: &mut P,
  receiver: &mut Receiver<'_, W>,
  reconfigure: bool,
) -> Result<()> {
  debug!("Skipping {:.3} seconds", config.skip_start());
  signal.by_ref().take(config.samples_for(config.skip_start())).for_each(drop);

  let config = if reconfigure {
    negotiate(config, &mut signal, rx)?
  } else {
    config.clone()
  };
  let bits = carrier(&config, signal, rx)?;
  receiver.run(bits)
}

/// Receive a payload from `signal` into `output`.
///
/// With `reconfigure`, `config` is the bootstrap configuration
/// and the working one is read from the [`ReconfRecord`] in front of the payload.
/// The output is flushed and the statistics logged on every exit path.
pub fn recv<'s, I, P, W>(
  config: &Configuration,
  signal: I,
  rx: &mut P,
  output: &mut W,
  reconfigure: bool,
) -> Result<RecvReport>
where
  I: IntoIterator<Item = f32>,
  I::IntoIter: 's,
  P: PhyRx,
  W: Write,
{
  let signal: Samples<'s> = Box::new(signal.into_iter());
  let mut receiver = Receiver::new(output);
  match receive(config, signal, rx, &mut receiver, reconfigure) {
    Ok(()) => {
      receiver.flush()?;
      Ok(receiver.report())
    }
    Err(e) => {
      error!("Decoding failed: {e}");
      Err(e)
    }
  }
}
