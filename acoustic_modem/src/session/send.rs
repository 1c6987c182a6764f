use std::io::Read;

use log::info;

use super::{ReconfRecord, RECONF_SILENCE};
use crate::{
  config::Configuration,
  error::Result,
  framing::{bitstream, Framer},
  sample_stream::ByteSource,
  traits::Modulator,
};

/// Statistics of a finished transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendReport {
  /// payload bytes read from the source
  pub bytes: usize,
  /// samples of leading silence and training, in the working configuration
  pub training: usize,
  /// samples carrying the payload frames
  pub data: usize,
  /// sample rate of the working configuration, in Hz
  pub fs: f64,
}

impl SendReport {
  /// seconds of payload audio
  pub fn data_duration(&self) -> f64 {
    self.data as f64 / self.fs
  }
}

/// Transmit everything `src` yields with `modulator`.
///
/// With a `bootstrap` configuration, the working configuration `config` is
/// first sent as a [`ReconfRecord`] over `bootstrap`.
/// `extra_silence` seconds are added to the leading silence.
/// A read error of `src` ends the payload; it is returned once the
/// stream is properly terminated.
pub fn send<R, M>(
  config: &Configuration,
  src: R,
  modulator: &mut M,
  extra_silence: f64,
  bootstrap: Option<&Configuration>,
) -> Result<SendReport>
where
  R: Read,
  M: Modulator,
{
  match bootstrap {
    Some(bootstrap) => {
      let record = ReconfRecord::from_config(config)?;
      modulator.reconfigure(bootstrap)?;
      modulator.silence(bootstrap.samples_for(bootstrap.silence_start() + extra_silence))?;
      info!(
        "Sending {:.3} seconds of training audio",
        modulator.offset() as f64 / bootstrap.fs()
      );
      info!("Sending reconfiguration via: {bootstrap}");
      modulator.start()?;
      modulator.modulate(bitstream::encode(record.to_bytes(), &Framer::new()))?;
      modulator.silence(bootstrap.samples_for(RECONF_SILENCE))?;
      modulator.reconfigure(config)?;
    }
    None => {
      modulator.reconfigure(config)?;
      modulator.silence(config.samples_for(config.silence_start() + extra_silence))?;
    }
  }

  modulator.start()?;
  let training = modulator.offset();
  info!("Sending {:.3} seconds of training audio", training as f64 / config.fs());

  let mut source = ByteSource::from_reader(src);
  info!("Starting modulation: {config}");
  modulator.modulate(bitstream::encode(source.by_ref(), &Framer::new()))?;

  let report = SendReport {
    bytes: source.total(),
    training,
    data: modulator.offset() - training,
    fs: config.fs(),
  };
  info!(
    "Sent {:.3} kB @ {:.3} seconds",
    report.bytes as f64 / 1e3,
    report.data_duration()
  );

  modulator.silence(config.samples_for(config.silence_stop()))?;
  if let Some(e) = source.take_error() {
    return Err(e.into());
  }
  Ok(report)
}
