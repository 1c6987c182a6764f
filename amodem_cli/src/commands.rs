use std::path::Path;

use acoustic_modem::{
  config::{self, Configuration},
  line_code::LineCode,
  sample_stream::{Dump, HoundInStream, HoundOutStream, SampleReader},
  session::{self, RecvReport, SendReport},
  Error, Result,
};
use log::{info, warn};

use crate::cli_util::{note_prompt, open_input, open_output, title_prompt};

/// Print the bitrate presets.
pub fn bitrates() {
  println!("{}", title_prompt(format!("{:>6}  parameters", "kb/s")));
  for (kbps, config) in config::bitrates() {
    println!(
      "{:>6}  {} {}",
      kbps,
      config,
      note_prompt(format!("{} samples/symbol", config.samples_per_symbol()))
    );
  }
}

/// Modulate the content of `input` (stdin without one) into the WAV file at `output`.
pub fn send(
  config: &Configuration,
  input: Option<&Path>,
  output: &Path,
  bootstrap: Option<&Configuration>,
  gain: f32,
  extra_silence: f64,
) -> Result<SendReport> {
  info!("Running at {config}");
  let src = open_input(input)?;
  let wav = HoundOutStream::create(output, config)?;
  let mut modulator: LineCode<_, hound::Error> = LineCode::new(wav, config).with_gain(gain);
  let report = session::send(config, src, &mut modulator, extra_silence, bootstrap);
  // the header is written on failure too
  modulator.into_sink().finalize()?;
  report
}

/// Demodulate the WAV file at `input` into `output` (stdout without one).
/// With `dump`, the received audio is copied to another WAV file.
pub fn recv(
  config: &Configuration,
  input: &Path,
  output: Option<&Path>,
  reconfigure: bool,
  dump: Option<&Path>,
) -> Result<RecvReport> {
  info!("Running at {config}");
  let stream = HoundInStream::open(input)?;
  if stream.sample_rate() as f64 != config.fs() && !reconfigure {
    warn!(
      "{} is sampled at {} Hz, expected {} Hz",
      input.display(),
      stream.sample_rate(),
      config.fs()
    );
  }
  let mut samples: SampleReader<_, hound::Error> = SampleReader::new(stream);
  let mut dst = open_output(output)?;
  let mut rx = LineCode::receiver();

  let report = match dump {
    Some(path) => {
      let sink = HoundOutStream::create(path, config)?;
      let mut dumped: Dump<_, _, hound::Error> = Dump::new(samples.by_ref(), sink);
      let report = session::recv(config, &mut dumped, &mut rx, &mut dst, reconfigure);
      let dump = dumped.finish().and_then(HoundOutStream::finalize);
      keep_receive_error(report, dump)?
    }
    None => session::recv(config, samples.by_ref(), &mut rx, &mut dst, reconfigure)?,
  };
  if let Some(e) = samples.take_error() {
    return Err(e.into());
  }
  Ok(report)
}

/// The receive error wins over a failed audio dump, which is only logged then.
pub(crate) fn keep_receive_error<T, E>(report: Result<T>, dump: std::result::Result<(), E>) -> Result<T>
where
  Error: From<E>,
  E: std::fmt::Display,
{
  match (report, dump) {
    (Err(e), Err(dump)) => {
      warn!("audio dump failed: {dump}");
      Err(e)
    }
    (Ok(_), Err(dump)) => Err(dump.into()),
    (report, Ok(())) => report,
  }
}
